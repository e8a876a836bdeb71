//! Integration tests for the snapshot store: the load/save round trip
//! must be lossless for every field, including both signature states.

use chrono::{TimeZone, Utc};

use socialtrack_core::catalog::PlanId;
use socialtrack_core::month::{Command, CountField, MonthData};
use socialtrack_test_utils::{month_with_plan, temp_store};

#[test]
fn round_trip_preserves_every_field() {
    let fixture = temp_store();

    let mut month = month_with_plan(PlanId::Authority);
    month.apply(Command::TogglePost { week: 1, slot: 0 }).unwrap();
    month.apply(Command::TogglePost { week: 4, slot: 3 }).unwrap();
    month.apply(Command::ToggleReel { slot: 2 }).unwrap();
    month
        .apply(Command::SetCount { week: 2, field: CountField::Stories, value: 11 })
        .unwrap();
    month
        .apply(Command::SetCount { week: 3, field: CountField::Comments, value: 4 })
        .unwrap();
    month.ai_observation = "a solid month overall".into();

    fixture.store.save(&month).unwrap();
    let loaded = fixture.store.load();
    assert_eq!(loaded, month);
}

#[test]
fn round_trip_preserves_signed_state() {
    let fixture = temp_store();

    let mut month = month_with_plan(PlanId::Growth);
    month.client_signature = Some("89504e470d0a1a0a".into());
    month.signature_date = Some(Utc.with_ymd_and_hms(2026, 3, 31, 17, 45, 0).unwrap());

    fixture.store.save(&month).unwrap();
    let loaded = fixture.store.load();
    assert_eq!(loaded.client_signature, month.client_signature);
    assert_eq!(loaded.signature_date, month.signature_date);
}

#[test]
fn round_trip_preserves_unsigned_state() {
    let fixture = temp_store();

    let month = month_with_plan(PlanId::Basic);
    assert!(!month.is_signed());

    fixture.store.save(&month).unwrap();
    let loaded = fixture.store.load();
    assert_eq!(loaded.client_signature, None);
    assert_eq!(loaded.signature_date, None);
}

#[test]
fn save_is_idempotent() {
    let fixture = temp_store();

    let month = month_with_plan(PlanId::Growth);
    fixture.store.save(&month).unwrap();
    let first = std::fs::read_to_string(fixture.store.snapshot_path()).unwrap();

    fixture.store.save(&month).unwrap();
    let second = std::fs::read_to_string(fixture.store.snapshot_path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_after_each_command_reflects_the_latest_state() {
    let fixture = temp_store();
    let mut month = MonthData::pristine_named("Lifecycle".into());

    let commands = [
        Command::SelectPlan(PlanId::Growth),
        Command::TogglePost { week: 1, slot: 0 },
        Command::SetCount { week: 1, field: CountField::Stories, value: 2 },
    ];
    for cmd in commands {
        month.apply(cmd).unwrap();
        fixture.store.save(&month).unwrap();
    }

    let loaded = fixture.store.load();
    assert_eq!(loaded, month);
}

#[test]
fn reset_then_load_is_pristine() {
    let fixture = temp_store();

    let mut month = month_with_plan(PlanId::Authority);
    month.apply(Command::Sign("payload".into())).unwrap();
    fixture.store.save(&month).unwrap();

    fixture.store.reset().unwrap();
    let loaded = fixture.store.load();
    assert_eq!(loaded.selected_plan, None);
    assert!(!loaded.is_signed());
}
