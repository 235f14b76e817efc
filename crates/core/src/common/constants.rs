//! Global Simulator Constants.
//!
//! This module defines constants used across the simulator. It includes:
//! 1. **Counter Constants:** The bit layout of the 8-bit usage counter.
//! 2. **Access Constants:** The range of the biased access draw.
//! 3. **Report Constants:** Headers and sentinels used by the trace and CSV output.

/// Most significant bit of the 8-bit usage counter (128).
///
/// Added to a page's counter after the right shift when the page was used during
/// the tick, so the most recent tick always carries the highest weight.
pub const COUNTER_MSB: u8 = (u8::MAX / 2) + 1;

/// Exclusive upper bound of the biased access draw.
///
/// Each tick a page draws uniformly from `0..DRAW_RANGE` and is used when the
/// draw is strictly less than its counter plus one.
pub const DRAW_RANGE: u32 = 255;

/// Value printed in the trace for an absent frame or swap slot.
pub const ABSENT_SLOT: i64 = -1;

/// Header row of the per-tick CSV summary.
pub const TICK_CSV_HEADER: &str = "clockTick,hitCount,missCount";

/// Header row of the batch analysis CSV.
pub const BATCH_CSV_HEADER: &str = "run,hitCount,missCount";

/// Separator line framing every page table dump in the trace.
pub const TABLE_RULE: &str =
    "================================================================================================";
