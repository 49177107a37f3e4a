// Asynchronous asset-load bookkeeping: request sequencing so a stale completion
// never replaces a newer one, and progress reporting for the loading overlay.

use crate::constants::{PROGRESS_STAGE_1, PROGRESS_STAGE_2};

/// Identifies one load request. Later requests carry larger values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Hands out tickets and decides which completions may be applied.
#[derive(Clone, Debug, Default)]
pub struct LoadSequencer {
    issued: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// True only for the most recently issued ticket.
    #[inline]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// Where a panorama swap currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanoramaStatus {
    #[default]
    Empty,
    Loading { room: usize, ticket: LoadTicket },
    Ready { room: usize },
    /// The last request failed; `shown` is whatever is still on screen.
    Failed { room: usize, shown: Option<usize> },
}

/// Tracks the room on screen across overlapping texture requests.
#[derive(Clone, Debug, Default)]
pub struct PanoramaLoads {
    seq: LoadSequencer,
    status: PanoramaStatus,
    shown: Option<usize>,
}

impl PanoramaLoads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PanoramaStatus {
        self.status
    }

    /// Room whose texture is currently bound to the sphere.
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn request(&mut self, room: usize) -> LoadTicket {
        let ticket = self.seq.begin();
        self.status = PanoramaStatus::Loading { room, ticket };
        ticket
    }

    #[inline]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.seq.is_current(ticket)
    }

    /// Record a successful load. Returns false (and changes nothing) for a stale ticket.
    pub fn complete(&mut self, ticket: LoadTicket, room: usize) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.shown = Some(room);
        self.status = PanoramaStatus::Ready { room };
        true
    }

    /// Record a failed load. The previously shown room stays on screen.
    pub fn fail(&mut self, ticket: LoadTicket, room: usize) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.status = PanoramaStatus::Failed {
            room,
            shown: self.shown,
        };
        true
    }
}

/// Percent complete, or `None` when the total size is unknown.
pub fn percent(loaded: f64, total: f64) -> Option<f64> {
    if !(total > 0.0) || !loaded.is_finite() {
        return None;
    }
    Some((loaded / total * 100.0).clamp(0.0, 100.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStage {
    Home,
    ViewInAr,
    Apartment,
}

impl ProgressStage {
    pub fn for_percent(p: f64) -> Self {
        if p < PROGRESS_STAGE_1 {
            ProgressStage::Home
        } else if p < PROGRESS_STAGE_2 {
            ProgressStage::ViewInAr
        } else {
            ProgressStage::Apartment
        }
    }

    /// Material Symbols glyph name shown in the loading overlay.
    pub fn icon(self) -> &'static str {
        match self {
            ProgressStage::Home => "home",
            ProgressStage::ViewInAr => "view_in_ar",
            ProgressStage::Apartment => "apartment",
        }
    }
}

pub fn percent_label(p: f64) -> String {
    format!("{}%", p.round() as i64)
}
