//! Victim Selection.
//!
//! NFU evicts the resident page with the smallest usage counter. Ties go to the
//! lowest page id, which falls out of a stable ascending scan.
//!
//! # Performance
//!
//! - **Time Complexity:** O(N), a full scan on every miss
//! - **Space Complexity:** O(1)
//!
//! No ordering structure is kept between calls: every counter changes every tick,
//! so any index would be rebuilt from scratch anyway.

use crate::common::ids::PageId;
use crate::mm::{Page, PageTable};

/// Returns the resident page with the lowest counter, lowest id first on ties.
///
/// Returns `None` only when no page is resident, which a validated simulation
/// never reaches.
pub fn select_victim(table: &PageTable) -> Option<PageId> {
    table
        .iter()
        .filter(|page| page.is_resident())
        .min_by_key(|page| page.counter)
        .map(Page::id)
}
