// Thumbnail strip view model: (items, current index) -> thumbs.
//
// Rendering is idempotent; the caller owns the current index.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorItem {
    pub label: String,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumb {
    pub index: usize,
    pub label: String,
    pub image_url: String,
    pub active: bool,
    /// Shown under the active thumb only.
    pub caption: Option<String>,
}

const BUTTON_BASE: &str =
    "shrink-0 group flex flex-col items-center gap-2 transition-transform active:scale-95";

impl Thumb {
    pub fn button_class(&self, kind: &str) -> String {
        if self.active {
            format!("{kind}-btn {BUTTON_BASE} active -translate-y-3 relative z-10")
        } else {
            format!("{kind}-btn {BUTTON_BASE}")
        }
    }

    pub fn frame_class(&self) -> &'static str {
        if self.active {
            "w-24 h-24 border-2 border-primary rounded-2xl bg-[#2a2620] overflow-hidden relative shadow-lg"
        } else {
            "w-16 h-16 border border-white/10 rounded-2xl bg-[#2a2620] overflow-hidden relative group-hover:border-primary/60 transition-colors shadow-lg"
        }
    }

    pub fn label_class(&self) -> &'static str {
        if self.active {
            "text-sm font-bold text-primary uppercase tracking-wider"
        } else {
            "text-[11px] font-medium text-white/60 group-hover:text-white uppercase tracking-wider"
        }
    }
}

/// Build the strip. `current` past the end leaves every thumb inactive.
pub fn strip_view(items: &[SelectorItem], current: usize, active_caption: &str) -> Vec<Thumb> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let active = index == current;
            Thumb {
                index,
                label: item.label.clone(),
                image_url: item.image_url.clone(),
                active,
                caption: active.then(|| active_caption.to_string()),
            }
        })
        .collect()
}

/// Index to load after a click, or `None` when the click selects what is already shown.
#[inline]
pub fn on_click(current: usize, clicked: usize, len: usize) -> Option<usize> {
    (clicked != current && clicked < len).then_some(clicked)
}

/// Attribute carrying a thumb's index, read back by the strip's single click listener.
pub const THUMB_INDEX_ATTR: &str = "data-index";

/// Resolve a clicked thumb's `data-index` to an item of a strip of `len` items.
pub fn picked_index(attr: Option<&str>, len: usize) -> Option<usize> {
    attr?.trim().parse::<usize>().ok().filter(|&i| i < len)
}
