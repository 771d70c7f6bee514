//! Property tests for the scan state machine

use aac_board::BoardCatalog;
use aac_scan::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Act(ScanAction),
    Tick(u64),
    Stop,
    Start,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Act(ScanAction::MoveNext)),
        3 => Just(Step::Act(ScanAction::SelectCurrent)),
        2 => Just(Step::Act(ScanAction::GoBack)),
        2 => (0u64..6000).prop_map(Step::Tick),
        1 => Just(Step::Stop),
        1 => Just(Step::Start),
    ]
}

fn method() -> impl Strategy<Value = ScanMethod> {
    prop_oneof![Just(ScanMethod::Auto), Just(ScanMethod::Step)]
}

proptest! {
    #[test]
    fn position_stays_in_range(method in method(), steps in prop::collection::vec(step(), 0..80)) {
        let clock = ManualClock::new();
        let config = ScanningConfig { method, ..Default::default() };
        let mut scan = ScanningController::new(BoardCatalog::with_defaults(), config)
            .with_clock(clock.clone());
        scan.start();

        for step in steps {
            match step {
                Step::Act(action) => scan.perform(action),
                Step::Tick(ms) => {
                    clock.advance(ms);
                    scan.poll();
                }
                Step::Stop => scan.stop(),
                Step::Start => scan.start(),
            }

            prop_assert!(scan.pending_timers() <= 1);
            if scan.is_active() {
                prop_assert!(scan.current_index() < scan.item_count());
                prop_assert_eq!(scan.pending_timers(), usize::from(method == ScanMethod::Auto));
            } else {
                prop_assert_eq!(scan.pending_timers(), 0);
            }
            if scan.phase() == ScanPhase::Modal {
                prop_assert!(!scan.store().message().is_empty());
            }
        }
    }
}
