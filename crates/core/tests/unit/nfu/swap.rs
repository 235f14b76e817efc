use nfusim_core::common::error::InvariantViolation;
use nfusim_core::common::ids::{FrameId, PageId, SwapSlot};
use nfusim_core::mm::PageTable;
use nfusim_core::nfu::{SwapEvent, swap_in};
use nfusim_core::report::AccessOutcome;
use pretty_assertions::assert_eq;

use crate::common::harness::{force, with_counters};
use crate::common::recorder::Recorder;

#[test]
fn test_swap_exchanges_frame_and_slot() {
    let mut table = PageTable::new(4, 2);
    let event = swap_in(&mut table, PageId::new(3), PageId::new(0)).unwrap();
    assert_eq!(
        event,
        SwapEvent {
            target: PageId::new(3),
            victim: PageId::new(0),
            frame: FrameId::new(0),
            slot: SwapSlot::new(1),
        }
    );

    let target = table.get(PageId::new(3)).unwrap();
    assert_eq!(target.frame(), Some(FrameId::new(0)));
    assert_eq!(target.swap_slot(), None);
    let victim = table.get(PageId::new(0)).unwrap();
    assert_eq!(victim.frame(), None);
    assert_eq!(victim.swap_slot(), Some(SwapSlot::new(1)));
    assert!(table.check_invariants(2).is_ok());
}

#[test]
fn test_swap_keeps_counters() {
    let mut table = PageTable::new(3, 1);
    table.get_mut(PageId::new(0)).unwrap().counter = 9;
    table.get_mut(PageId::new(2)).unwrap().counter = 130;
    swap_in(&mut table, PageId::new(2), PageId::new(0)).unwrap();
    assert_eq!(table.counters(), vec![9, 0, 130]);
}

#[test]
fn test_resident_target_rejected_without_change() {
    let mut table = PageTable::new(4, 2);
    let before = table.clone();
    assert_eq!(
        swap_in(&mut table, PageId::new(1), PageId::new(0)),
        Err(InvariantViolation::TargetResident(PageId::new(1)))
    );
    assert_eq!(table, before);
}

#[test]
fn test_swapped_victim_rejected_without_change() {
    let mut table = PageTable::new(4, 2);
    let before = table.clone();
    assert_eq!(
        swap_in(&mut table, PageId::new(2), PageId::new(3)),
        Err(InvariantViolation::VictimNotResident(PageId::new(3)))
    );
    assert_eq!(table, before);
}

#[test]
fn test_unknown_page_rejected() {
    let mut table = PageTable::new(4, 2);
    assert_eq!(
        swap_in(&mut table, PageId::new(8), PageId::new(0)),
        Err(InvariantViolation::UnknownPage {
            page: PageId::new(8),
            len: 4,
        })
    );
    assert_eq!(
        swap_in(&mut table, PageId::new(2), PageId::new(4)),
        Err(InvariantViolation::UnknownPage {
            page: PageId::new(4),
            len: 4,
        })
    );
}

/// Counters [50, 10, 0, 0] with only page 2 used: after aging they read
/// [25, 5, 128, 0], so page 1 is the victim and hands its frame to page 2.
#[test]
fn test_miss_swaps_with_nfu_page() {
    let mut sim = with_counters(2, 1, &[50, 10, 0, 0]);
    let mut recorder = Recorder::default();
    let summary = sim.tick_with(&force(4, &[2]), &mut recorder).unwrap();

    assert_eq!(summary.hits, 0);
    assert_eq!(summary.misses, 1);
    assert_eq!(recorder.swaps(), vec![(PageId::new(2), PageId::new(1))]);

    let table = sim.page_table();
    assert_eq!(table.counters(), vec![25, 5, 128, 0]);
    assert_eq!(table.get(PageId::new(2)).unwrap().frame(), Some(FrameId::new(1)));
    assert_eq!(table.get(PageId::new(2)).unwrap().swap_slot(), None);
    assert_eq!(table.get(PageId::new(1)).unwrap().swap_slot(), Some(SwapSlot::new(0)));
    assert_eq!(table.get(PageId::new(0)).unwrap().frame(), Some(FrameId::new(0)));
    assert_eq!(table.get(PageId::new(3)).unwrap().swap_slot(), Some(SwapSlot::new(1)));
}

#[test]
fn test_miss_outcome_carries_event() {
    let mut sim = with_counters(1, 1, &[0, 0]);
    let mut recorder = Recorder::default();
    sim.tick_with(&force(2, &[1]), &mut recorder).unwrap();

    let outcome = recorder.events.iter().find_map(|e| match e {
        crate::common::recorder::Event::Access { outcome, .. } => Some(*outcome),
        _ => None,
    });
    assert_eq!(
        outcome,
        Some(AccessOutcome::Miss(SwapEvent {
            target: PageId::new(1),
            victim: PageId::new(0),
            frame: FrameId::new(0),
            slot: SwapSlot::new(0),
        }))
    );
}
