//! Virtual page record.
//!
//! A page is either resident in a real-memory frame or parked in a swap slot,
//! never both and never neither. [`Location`] encodes that rule in the type, and
//! the optional accessors used by reporting are derived from it.

use std::fmt;

use crate::common::constants::ABSENT_SLOT;
use crate::common::ids::{FrameId, PageId, SwapSlot};

/// Where a page currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Resident in a real-memory frame.
    Frame(FrameId),
    /// Stored in a swap slot.
    Swap(SwapSlot),
}

/// One unit of virtual memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    id: PageId,
    location: Location,
    /// 8-bit usage history; bit 7 is the most recent tick.
    pub counter: u8,
}

impl Page {
    /// Creates a page at `location` with a zero usage counter.
    pub const fn new(id: PageId, location: Location) -> Self {
        Self {
            id,
            location,
            counter: 0,
        }
    }

    /// Returns the page's stable id.
    #[inline]
    pub const fn id(&self) -> PageId {
        self.id
    }

    /// Returns where the page currently lives.
    #[inline]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Moves the page. Only the swap executor relocates pages.
    #[inline]
    pub(crate) const fn relocate(&mut self, location: Location) {
        self.location = location;
    }

    /// Returns `true` if the page holds a real-memory frame.
    #[inline]
    pub const fn is_resident(&self) -> bool {
        matches!(self.location, Location::Frame(_))
    }

    /// Returns the real-memory frame, if resident.
    #[inline]
    pub const fn frame(&self) -> Option<FrameId> {
        match self.location {
            Location::Frame(frame) => Some(frame),
            Location::Swap(_) => None,
        }
    }

    /// Returns the swap slot, if not resident.
    #[inline]
    pub const fn swap_slot(&self) -> Option<SwapSlot> {
        match self.location {
            Location::Frame(_) => None,
            Location::Swap(slot) => Some(slot),
        }
    }
}

impl fmt::Display for Page {
    /// Renders the fixed-width trace record, using `-1` for the absent location.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame().map_or(ABSENT_SLOT, |frame| frame.val() as i64);
        let slot = self.swap_slot().map_or(ABSENT_SLOT, |slot| slot.val() as i64);
        write!(
            f,
            "| ID: {:<5} | Position in Real Memory: {:<5} | Position in Swap Memory: {:<5} | Counter: {:<3} |",
            self.id, frame, slot, self.counter
        )
    }
}
