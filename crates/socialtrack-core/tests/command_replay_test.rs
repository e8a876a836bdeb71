//! Replay determinism: the reducer over explicit command values must
//! produce identical records for identical command sequences.

use socialtrack_core::catalog::PlanId;
use socialtrack_core::month::{Command, CountField, MonthData};

fn sample_sequence() -> Vec<Command> {
    vec![
        Command::SelectPlan(PlanId::Growth),
        Command::TogglePost { week: 1, slot: 0 },
        Command::TogglePost { week: 1, slot: 1 },
        Command::TogglePost { week: 1, slot: 1 }, // toggled back off
        Command::SetCount { week: 2, field: CountField::Stories, value: 4 },
        Command::SetCount { week: 2, field: CountField::Stories, value: 2 },
        Command::ToggleReel { slot: 0 },
        Command::SetCount { week: 3, field: CountField::Comments, value: -5 },
        Command::SelectPlan(PlanId::Authority),
    ]
}

#[test]
fn identical_sequences_produce_identical_records() {
    let mut a = MonthData::pristine_named("Replay".into());
    let mut b = MonthData::pristine_named("Replay".into());

    for cmd in sample_sequence() {
        a.apply(cmd).unwrap();
    }
    for cmd in sample_sequence() {
        b.apply(cmd).unwrap();
    }

    assert_eq!(a, b);
}

#[test]
fn replay_reaches_the_expected_state() {
    let mut month = MonthData::pristine_named("Replay".into());
    for cmd in sample_sequence() {
        month.apply(cmd).unwrap();
    }

    assert_eq!(month.selected_plan, Some(PlanId::Authority));
    assert_eq!(month.weeks[0].posts, [true, false, false, false]);
    assert_eq!(month.weeks[1].stories_count, 2);
    assert_eq!(month.weeks[2].comments_count, 0);
    assert_eq!(month.reels, [true, false, false, false]);
}

#[test]
fn failed_commands_leave_the_record_unchanged() {
    let mut month = MonthData::pristine_named("Replay".into());
    month.apply(Command::SelectPlan(PlanId::Basic)).unwrap();

    let before = month.clone();
    assert!(month.apply(Command::TogglePost { week: 7, slot: 0 }).is_err());
    assert!(month.apply(Command::ToggleReel { slot: 99 }).is_err());
    assert_eq!(month, before);
}
