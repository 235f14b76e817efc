//! Page, Frame, and Swap Slot identifiers.
//!
//! This module defines strong types for the three index spaces of the simulator so
//! they cannot be mixed up by accident. It provides the following:
//! 1. **Type Safety:** Distinguishes virtual page ids, real-memory frames, and swap slots.
//! 2. **Raw Access:** Helpers for recovering the underlying index.
//! 3. **Display:** Plain decimal formatting for trace output.

use std::fmt;

/// Stable identity of a virtual page.
///
/// Assigned at creation in ascending order starting at 0 and never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(pub usize);

/// Index of a frame in real (physical) memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub usize);

/// Index of a slot in swap storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwapSlot(pub usize);

impl PageId {
    /// Creates a page id from a raw index.
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw page index.
    #[inline(always)]
    pub const fn val(self) -> usize {
        self.0
    }
}

impl FrameId {
    /// Creates a frame id from a raw index.
    #[inline(always)]
    pub const fn new(frame: usize) -> Self {
        Self(frame)
    }

    /// Returns the raw frame index.
    #[inline(always)]
    pub const fn val(self) -> usize {
        self.0
    }
}

impl SwapSlot {
    /// Creates a swap slot from a raw index.
    #[inline(always)]
    pub const fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Returns the raw slot index.
    #[inline(always)]
    pub const fn val(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for SwapSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
