//! # Simulator Tests
//!
//! Tick lifecycle, hit/miss accounting, reporting order, and batch analysis.

use nfusim_core::Simulator;
use nfusim_core::common::error::{ConfigError, SimError};
use nfusim_core::common::ids::PageId;
use nfusim_core::config::{AccessModel, Config};
use nfusim_core::report::{AccessOutcome, NullReporter, TableStage};
use nfusim_core::sim::Phase;
use nfusim_core::sim::analysis::{run_batch, summarize};
use nfusim_core::stats::TickSummary;
use pretty_assertions::assert_eq;

use crate::common::harness::{ScriptedAccess, TEST_SEED, force, init_tracing, seeded, with_counters};
use crate::common::recorder::{Event, Recorder};

#[test]
fn test_new_simulator_is_running() {
    let sim = seeded(6, 2, 3);
    assert_eq!(sim.phase(), Phase::Running { next_tick: 0 });
    assert!(!sim.is_terminated());
    assert_eq!(sim.stats().ticks, 0);
    assert_eq!(sim.page_table().resident_count(), 2);
    assert_eq!(sim.config().clock_count, 3);
}

#[test]
fn test_phase_advances_to_terminated() {
    let mut sim = seeded(6, 2, 2);
    sim.tick(&mut NullReporter).unwrap();
    assert_eq!(sim.phase(), Phase::Running { next_tick: 1 });
    sim.tick(&mut NullReporter).unwrap();
    assert_eq!(sim.phase(), Phase::Terminated { ticks: 2 });
    assert!(matches!(
        sim.tick(&mut NullReporter),
        Err(SimError::Terminated(2))
    ));
}

#[test]
fn test_zero_clocks_starts_terminated() {
    let mut sim = seeded(4, 2, 0);
    assert!(sim.is_terminated());
    assert!(matches!(
        sim.tick_with(&force(4, &[]), &mut NullReporter),
        Err(SimError::Terminated(0))
    ));

    let mut recorder = Recorder::default();
    let stats = sim.run(&mut recorder).unwrap();
    assert_eq!(stats.ticks, 0);
    assert_eq!(
        recorder.events,
        vec![
            Event::Begin { resident: 2 },
            Event::Finish { hits: 0, misses: 0 },
        ]
    );
}

#[test]
fn test_rejected_config_builds_nothing() {
    assert!(matches!(
        Simulator::new(Config::new(3, 5, 1)),
        Err(ConfigError::RealMemoryNotSmaller { .. })
    ));
    assert!(matches!(
        Simulator::with_access(Config::new(3, 0, 1), Box::new(ScriptedAccess::default())),
        Err(ConfigError::NoRealMemory)
    ));
}

#[test]
fn test_resident_access_is_hit() {
    let mut sim = with_counters(2, 3, &[0, 0, 0, 0]);
    let before = sim.page_table().clone();
    let summary = sim.tick_with(&force(4, &[0, 1]), &mut NullReporter).unwrap();

    assert_eq!(summary, TickSummary { tick: 0, hits: 2, misses: 0 });
    assert_eq!(sim.stats().evictions, 0);
    for (old, new) in before.iter().zip(sim.page_table()) {
        assert_eq!(old.location(), new.location());
    }
}

#[test]
fn test_unused_tick_changes_only_counters() {
    let mut sim = with_counters(2, 2, &[255, 64, 8, 1]);
    let summary = sim.tick_with(&force(4, &[]), &mut NullReporter).unwrap();
    assert_eq!(summary, TickSummary { tick: 0, hits: 0, misses: 0 });
    assert_eq!(sim.page_table().counters(), vec![127, 32, 4, 0]);
}

#[test]
fn test_decision_count_checked() {
    let mut sim = seeded(4, 2, 1);
    let err = sim.tick_with(&[true, false], &mut NullReporter).unwrap_err();
    assert!(matches!(
        err,
        SimError::DecisionCount { expected: 4, found: 2 }
    ));
    // Nothing ran.
    assert_eq!(sim.phase(), Phase::Running { next_tick: 0 });
    assert_eq!(sim.page_table().counters(), vec![0, 0, 0, 0]);
}

#[test]
fn test_page_loaded_earlier_in_tick_can_be_evicted() {
    // One frame: page 1 evicts page 0, then page 2 evicts page 1.
    let mut sim = with_counters(1, 1, &[0, 0, 0]);
    let mut recorder = Recorder::default();
    let summary = sim.tick_with(&force(3, &[1, 2]), &mut recorder).unwrap();

    assert_eq!(summary.misses, 2);
    assert_eq!(
        recorder.swaps(),
        vec![
            (PageId::new(1), PageId::new(0)),
            (PageId::new(2), PageId::new(1)),
        ]
    );
    assert!(sim.page_table().get(PageId::new(2)).unwrap().is_resident());
    assert!(sim.page_table().check_invariants(1).is_ok());
}

#[test]
fn test_miss_counted_together_with_its_swap() {
    let config = Config::new(7, 2, 25)
        .with_seed(TEST_SEED)
        .with_access_model(AccessModel::Uniform);
    let mut sim = Simulator::new(config).unwrap();
    let mut recorder = Recorder::default();
    while !sim.is_terminated() {
        let summary = sim.tick(&mut recorder).unwrap();
        assert_eq!(summary.misses, sim.stats().evictions);
        assert_eq!(summary.misses, recorder.swaps().len() as u64);
    }
    assert!(sim.stats().misses > 0);
}

#[test]
fn test_event_order_within_tick() {
    let mut sim = with_counters(1, 2, &[0, 0, 0]);
    let mut recorder = Recorder::default();
    sim.tick_with(&force(3, &[0, 2]), &mut recorder).unwrap();

    assert_eq!(recorder.swaps(), vec![(PageId::new(2), PageId::new(0))]);
    let swap_event = match &recorder.events[5] {
        Event::Access {
            outcome: AccessOutcome::Miss(event),
            ..
        } => *event,
        other => panic!("expected a miss, got {other:?}"),
    };

    assert_eq!(
        recorder.events,
        vec![
            Event::Begin { resident: 1 },
            Event::Scheduled { tick: 0, page: PageId::new(0) },
            Event::Scheduled { tick: 0, page: PageId::new(2) },
            Event::Table { stage: TableStage::Aged, tick: 0, resident: 1 },
            Event::Access { tick: 0, page: PageId::new(0), outcome: AccessOutcome::Hit },
            Event::Access {
                tick: 0,
                page: PageId::new(2),
                outcome: AccessOutcome::Miss(swap_event),
            },
            Event::Table { stage: TableStage::Swapped, tick: 0, resident: 1 },
            Event::TickEnd(TickSummary { tick: 0, hits: 1, misses: 1 }),
        ]
    );

    // Initial, aged, and swapped snapshots.
    assert_eq!(recorder.tables.len(), 3);
    assert_eq!(recorder.tables[0].counters(), vec![0, 0, 0]);
    assert_eq!(recorder.tables[1].counters(), vec![128, 0, 128]);
    assert!(!recorder.tables[1].get(PageId::new(2)).unwrap().is_resident());
    assert!(recorder.tables[2].get(PageId::new(2)).unwrap().is_resident());
}

#[test]
fn test_begin_reported_once() {
    init_tracing();
    let mut sim = seeded(5, 2, 4);
    let mut recorder = Recorder::default();
    sim.tick(&mut recorder).unwrap();
    sim.run(&mut recorder).unwrap();

    let begins = recorder
        .events
        .iter()
        .filter(|e| matches!(e, Event::Begin { .. }))
        .count();
    assert_eq!(begins, 1);
    assert_eq!(recorder.summaries().len(), 4);
    assert!(matches!(recorder.events.last(), Some(Event::Finish { .. })));
}

#[test]
fn test_scripted_run() {
    let script = vec![
        vec![false, false, true, false],
        vec![true, false, true, true],
        vec![false, false, false, false],
    ];
    let mut sim = Simulator::with_access(
        Config::new(4, 2, 3),
        Box::new(ScriptedAccess::new(script)),
    )
    .unwrap();
    let mut recorder = Recorder::default();
    let stats = sim.run(&mut recorder).unwrap();

    // Tick 0: counters [0,0,128,0]; page 2 evicts page 0 (lowest id among zeros).
    // Tick 1: counters [128,0,192,128]; page 0 evicts page 1, hit on 2, page 3 evicts page 0.
    assert_eq!(
        recorder.swaps(),
        vec![
            (PageId::new(2), PageId::new(0)),
            (PageId::new(0), PageId::new(1)),
            (PageId::new(3), PageId::new(0)),
        ]
    );
    assert_eq!(
        recorder.summaries(),
        vec![
            TickSummary { tick: 0, hits: 0, misses: 1 },
            TickSummary { tick: 1, hits: 1, misses: 3 },
            TickSummary { tick: 2, hits: 1, misses: 3 },
        ]
    );
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 3);
    assert_eq!(stats.ticks, 3);
}

#[test]
fn test_same_seed_same_run() {
    let config = Config::new(12, 4, 30).with_seed(TEST_SEED);
    let mut a = Simulator::new(config.clone()).unwrap();
    let mut b = Simulator::new(config).unwrap();
    let mut left = Recorder::default();
    let mut right = Recorder::default();
    a.run(&mut left).unwrap();
    b.run(&mut right).unwrap();

    assert_eq!(left.events, right.events);
    assert_eq!(a.page_table(), b.page_table());
}

#[test]
fn test_uniform_model_runs() {
    let config = Config::new(10, 3, 50)
        .with_seed(TEST_SEED)
        .with_access_model(AccessModel::Uniform);
    let mut sim = Simulator::new(config).unwrap();
    let stats = sim.run(&mut NullReporter).unwrap();
    // Roughly half of the pages are used every tick.
    assert!(stats.accesses() > 150 && stats.accesses() < 350);
    assert!(sim.page_table().check_invariants(3).is_ok());
}

#[test]
fn test_batch_runs_are_independent_and_seeded() {
    let config = Config::new(8, 3, 25).with_seed(100);
    let outcomes = run_batch(&config, 4).unwrap();

    assert_eq!(outcomes.len(), 4);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.run, i);
        assert_eq!(outcome.seed, Some(100 + i as u64));

        let single = Config::new(8, 3, 25).with_seed(100 + i as u64);
        let stats = Simulator::new(single).unwrap().run(&mut NullReporter).unwrap();
        assert_eq!((outcome.hits, outcome.misses), (stats.hits, stats.misses));
    }
    assert_eq!(run_batch(&config, 4).unwrap(), outcomes);
}

#[test]
fn test_batch_rejects_bad_geometry() {
    assert!(matches!(
        run_batch(&Config::new(2, 2, 5), 3),
        Err(SimError::Config(ConfigError::RealMemoryNotSmaller { .. }))
    ));
}

#[test]
fn test_batch_of_zero_runs() {
    let outcomes = run_batch(&Config::new(4, 1, 5).with_seed(1), 0).unwrap();
    assert!(outcomes.is_empty());
    assert_eq!(summarize(&outcomes), None);
}

#[test]
fn test_summarize() {
    use nfusim_core::sim::analysis::RunOutcome;

    let outcomes = [
        RunOutcome { run: 0, seed: None, hits: 3, misses: 1 },
        RunOutcome { run: 1, seed: None, hits: 1, misses: 3 },
        RunOutcome { run: 2, seed: None, hits: 0, misses: 0 },
    ];
    let summary = summarize(&outcomes).unwrap();
    assert_eq!(summary.runs, 3);
    assert!((summary.mean_hits - 4.0 / 3.0).abs() < 1e-9);
    assert!((summary.mean_misses - 4.0 / 3.0).abs() < 1e-9);
    assert!((summary.mean_hit_rate - 1.0 / 3.0).abs() < 1e-9);
    assert!((summary.min_hit_rate - 0.0).abs() < 1e-9);
    assert!((summary.max_hit_rate - 0.75).abs() < 1e-9);
}
