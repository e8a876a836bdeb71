//! Shared test utilities for socialtrack integration tests.
//!
//! Provides a temp-directory-backed store fixture and month record
//! builders used across crates.

use tempfile::TempDir;

use socialtrack_core::catalog::PlanId;
use socialtrack_core::month::{Command, MonthData};
use socialtrack_store::MonthStore;

/// A [`MonthStore`] rooted in a temp directory that lives as long as the
/// fixture.
pub struct TempStoreFixture {
    pub store: MonthStore,
    /// Held to keep the directory alive for the fixture's lifetime.
    _dir: TempDir,
}

/// Create a store in a fresh temp directory.
pub fn temp_store() -> TempStoreFixture {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = MonthStore::new(dir.path().join("socialtrack"));
    TempStoreFixture { store, _dir: dir }
}

/// A month record with a fixed name and the given plan selected.
pub fn month_with_plan(plan: PlanId) -> MonthData {
    let mut month = MonthData::pristine_named("Fixture Month".into());
    month
        .apply(Command::SelectPlan(plan))
        .expect("selecting a plan cannot fail");
    month
}

/// A month record with the plan's full post quota marked done, spread
/// across the weeks at the plan's weekly cadence.
pub fn month_at_full_posts(plan: PlanId) -> MonthData {
    let mut month = month_with_plan(plan);
    let config = plan.config();

    let mut remaining = config.total_posts as usize;
    for week in 1..=4u8 {
        for slot in 0..config.posts_per_week.min(remaining) {
            month
                .apply(Command::TogglePost { week, slot })
                .expect("slot within the fixed array");
        }
        remaining = remaining.saturating_sub(config.posts_per_week);
    }
    month
}
