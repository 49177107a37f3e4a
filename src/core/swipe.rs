// Swipe-card gesture state machine and the cyclic card stack it reorders.
//
// The gesture produces effects; applying them to the DOM is the caller's job.

use crate::constants::{
    SWIPE_AXIS_LOCK_PX, SWIPE_COMMIT_PX, SWIPE_ROTATION_DEG_PER_PX, SWIPE_TAP_MAX_PX,
};
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Scrolling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// CSS class that animates a card off-screen in this direction.
    pub fn fly_out_class(self) -> &'static str {
        match self {
            SwipeDirection::Left => "fly-out-left",
            SwipeDirection::Right => "fly-out-right",
        }
    }
}

/// What the view should do in response to one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEffect {
    /// Turn off transform transitions so the card follows the pointer 1:1.
    DisableTransition,
    /// Place the card at `translateX(dx) rotate(rotation_deg)`.
    Track { dx: f64, rotation_deg: f64 },
    /// Cancel the browser's default handling of this event.
    PreventDefault,
    /// Animate the card back to its rest transform.
    SnapBack,
    /// Tap: open the card's target.
    Navigate,
    /// Animate the card off-screen, then send it to the back of the stack.
    Discard(SwipeDirection),
}

impl SwipeEffect {
    pub fn css_transform(dx: f64, rotation_deg: f64) -> String {
        format!("translateX({dx}px) rotate({rotation_deg}deg)")
    }
}

pub type Effects = SmallVec<[SwipeEffect; 2]>;

/// Ephemeral per-gesture state; exists only between press and release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub pointer_id: i32,
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub phase: SwipePhase,
    moved: bool,
    suppress_default: bool,
}

impl DragState {
    fn new(pointer_id: i32, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
            phase: SwipePhase::Dragging,
            moved: false,
            suppress_default: false,
        }
    }

    /// Horizontal displacement; 0 if the pointer never moved.
    #[inline]
    pub fn dx(&self) -> f64 {
        if self.moved {
            self.current_x - self.start_x
        } else {
            0.0
        }
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        if self.moved {
            self.current_y - self.start_y
        } else {
            0.0
        }
    }
}

/// How a release resolved the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    Tap,
    Discard(SwipeDirection),
    SnapBack,
    /// The gesture turned into a vertical scroll; the card is already at rest.
    Scrolled,
    /// Release from a pointer that does not own the gesture, or no gesture at all.
    Ignored,
}

/// Classify a horizontal displacement at release time.
pub fn classify_release(dx: f64) -> Release {
    let mag = dx.abs();
    if mag < SWIPE_TAP_MAX_PX {
        Release::Tap
    } else if mag >= SWIPE_COMMIT_PX {
        Release::Discard(if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else {
        Release::SnapBack
    }
}

/// Gesture state machine for a single card: Idle -> Dragging -> {Idle, Scrolling}.
#[derive(Clone, Debug, Default)]
pub struct SwipeGesture {
    drag: Option<DragState>,
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SwipePhase {
        self.drag.map(|d| d.phase).unwrap_or(SwipePhase::Idle)
    }

    #[cfg(test)]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Pointer/touch down. A press while another pointer owns the gesture is ignored.
    pub fn press(&mut self, pointer_id: i32, x: f64, y: f64) -> Effects {
        let mut fx = Effects::new();
        if self.drag.is_some() {
            return fx;
        }
        self.drag = Some(DragState::new(pointer_id, x, y));
        fx.push(SwipeEffect::DisableTransition);
        fx
    }

    pub fn motion(&mut self, pointer_id: i32, x: f64, y: f64) -> Effects {
        let mut fx = Effects::new();
        let Some(d) = self.drag.as_mut() else {
            return fx;
        };
        if d.pointer_id != pointer_id || d.phase != SwipePhase::Dragging {
            return fx;
        }
        d.current_x = x;
        d.current_y = y;
        d.moved = true;
        let dx = d.dx();
        let dy = d.dy();

        if dy.abs() > dx.abs() && dy.abs() > SWIPE_AXIS_LOCK_PX {
            d.phase = SwipePhase::Scrolling;
            fx.push(SwipeEffect::SnapBack);
            return fx;
        }
        if dx.abs() > SWIPE_AXIS_LOCK_PX {
            d.suppress_default = true;
        }
        if d.suppress_default {
            fx.push(SwipeEffect::PreventDefault);
        }
        fx.push(SwipeEffect::Track {
            dx,
            rotation_deg: dx * SWIPE_ROTATION_DEG_PER_PX,
        });
        fx
    }

    /// Pointer/touch up. Always returns the gesture to Idle for the owning pointer.
    pub fn release(&mut self, pointer_id: i32) -> (Release, Effects) {
        let mut fx = Effects::new();
        let Some(d) = self.drag else {
            return (Release::Ignored, fx);
        };
        if d.pointer_id != pointer_id {
            return (Release::Ignored, fx);
        }
        self.drag = None;
        if d.phase == SwipePhase::Scrolling {
            return (Release::Scrolled, fx);
        }
        let outcome = classify_release(d.dx());
        match outcome {
            Release::Tap => fx.push(SwipeEffect::Navigate),
            Release::Discard(dir) => fx.push(SwipeEffect::Discard(dir)),
            Release::SnapBack => fx.push(SwipeEffect::SnapBack),
            Release::Scrolled | Release::Ignored => {}
        }
        (outcome, fx)
    }

    /// Pointer cancelled by the browser: return to rest without navigating.
    pub fn cancel(&mut self) -> Effects {
        let mut fx = Effects::new();
        if self.drag.take().is_some() {
            fx.push(SwipeEffect::SnapBack);
        }
        fx
    }
}

/// Ordered cards, front at index 0. Cards are only ever rotated, never dropped.
#[derive(Clone, Debug, Default)]
pub struct CardStack<T> {
    cards: VecDeque<T>,
}

impl<T> CardStack<T> {
    pub fn new(cards: impl IntoIterator<Item = T>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.cards.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cards.iter()
    }

    /// Move the card at `pos` to the back. Returns false if `pos` is out of range.
    pub fn send_to_back(&mut self, pos: usize) -> bool {
        match self.cards.remove(pos) {
            Some(card) => {
                self.cards.push_back(card);
                true
            }
            None => false,
        }
    }

    /// Move the first card matching `pred` to the back.
    pub fn send_to_back_where(&mut self, pred: impl FnMut(&T) -> bool) -> bool {
        match self.cards.iter().position(pred) {
            Some(pos) => self.send_to_back(pos),
            None => false,
        }
    }
}
