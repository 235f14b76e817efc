//! Counter Aging.
//!
//! Every tick, every page's counter is shifted right by one bit and the top bit
//! is set if the page was used. The counter therefore holds the page's use
//! history for the last eight ticks, newest in bit 7.
//!
//! # Performance
//!
//! - **Time Complexity:** O(N) per tick where N is the number of pages
//! - **Space Complexity:** O(N) for the decision vector, rebuilt every tick

use tracing::trace;

use crate::common::constants::COUNTER_MSB;
use crate::mm::PageTable;

use super::access::AccessPattern;

/// Ages one counter.
///
/// Returns `(counter >> 1) + 128` when `used`, otherwise `counter >> 1`. The
/// shifted value is at most 127, so the sum never exceeds 255.
#[inline]
pub const fn age_counter(counter: u8, used: bool) -> u8 {
    (counter >> 1) + if used { COUNTER_MSB } else { 0 }
}

/// Draws this tick's access decisions and ages every counter.
///
/// Decisions are drawn from each page's counter *before* it is aged. Residency
/// plays no part here; resident and swapped pages age alike.
///
/// # Returns
///
/// One decision per page, indexed by page id.
pub fn age(table: &mut PageTable, pattern: &mut dyn AccessPattern, tick: u64) -> Vec<bool> {
    let decisions: Vec<bool> = table.iter().map(|page| pattern.decide(page)).collect();
    for (page, &used) in table.iter().zip(&decisions) {
        if used {
            trace!(tick, page = page.id().val(), "page scheduled for use");
        }
    }
    apply(table, &decisions);
    decisions
}

/// Ages every counter using caller-supplied decisions.
///
/// `decisions[i]` applies to page `i`; missing entries count as unused.
pub fn apply(table: &mut PageTable, decisions: &[bool]) {
    for (i, page) in table.iter_mut().enumerate() {
        let used = decisions.get(i).copied().unwrap_or(false);
        page.counter = age_counter(page.counter, used);
    }
}
