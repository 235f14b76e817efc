//! Swap Executor.
//!
//! Exchanges the locations of a missing page and its victim: the target takes
//! the victim's frame, the victim takes the target's swap slot. No page contents
//! exist in this model, only the bookkeeping of where each page lives, so the
//! resident count is unchanged by construction.

use crate::common::error::InvariantViolation;
use crate::common::ids::{FrameId, PageId, SwapSlot};
use crate::mm::{Location, PageTable};

/// Record of one completed swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapEvent {
    /// Page that was accessed and loaded.
    pub target: PageId,
    /// Page that was evicted.
    pub victim: PageId,
    /// Frame handed from the victim to the target.
    pub frame: FrameId,
    /// Swap slot handed from the target to the victim.
    pub slot: SwapSlot,
}

/// Loads `target` into `victim`'s frame and moves `victim` into `target`'s slot.
///
/// Both preconditions are checked before anything is written, so a rejected swap
/// leaves the table untouched.
///
/// # Errors
///
/// - [`InvariantViolation::UnknownPage`] if either id is outside the table.
/// - [`InvariantViolation::TargetResident`] if `target` already holds a frame.
/// - [`InvariantViolation::VictimNotResident`] if `victim` holds no frame.
pub fn swap_in(
    table: &mut PageTable,
    target: PageId,
    victim: PageId,
) -> Result<SwapEvent, InvariantViolation> {
    let len = table.len();
    let target_location = table
        .get(target)
        .ok_or(InvariantViolation::UnknownPage { page: target, len })?
        .location();
    let victim_location = table
        .get(victim)
        .ok_or(InvariantViolation::UnknownPage { page: victim, len })?
        .location();

    let Location::Swap(slot) = target_location else {
        return Err(InvariantViolation::TargetResident(target));
    };
    let Location::Frame(frame) = victim_location else {
        return Err(InvariantViolation::VictimNotResident(victim));
    };

    if let Some(page) = table.get_mut(target) {
        page.relocate(Location::Frame(frame));
    }
    if let Some(page) = table.get_mut(victim) {
        page.relocate(Location::Swap(slot));
    }

    Ok(SwapEvent {
        target,
        victim,
        frame,
        slot,
    })
}
