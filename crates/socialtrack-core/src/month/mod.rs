//! The month record: the one mutable data structure the whole system
//! tracks. One live instance represents the month currently in progress;
//! there is no history and no per-month archive.

pub mod commands;

pub use commands::{Command, CommandError, CountField};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::PlanId;

/// Weeks tracked per month.
pub const WEEKS_PER_MONTH: usize = 4;
/// Post slots stored per week. Only the first `posts_per_week` of the
/// active plan are shown, but all four are always stored.
pub const POST_SLOTS_PER_WEEK: usize = 4;
/// Reel slots stored per month. Only the first `total_reels` of the
/// active plan count toward progress.
pub const REEL_SLOTS: usize = 4;

/// One week of recorded deliverables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyData {
    /// Week number, 1 through 4.
    pub id: u8,
    /// Done flags for the week's post slots.
    pub posts: [bool; POST_SLOTS_PER_WEEK],
    pub stories_count: u32,
    pub comments_count: u32,
}

impl WeeklyData {
    fn empty(id: u8) -> Self {
        Self {
            id,
            posts: [false; POST_SLOTS_PER_WEEK],
            stories_count: 0,
            comments_count: 0,
        }
    }

    /// Count of post slots marked done, over the full slot array.
    pub fn posts_done(&self) -> u32 {
        self.posts.iter().filter(|p| **p).count() as u32
    }
}

/// The full record for the tracked month.
///
/// Invariant: `client_signature` and `signature_date` are always set and
/// cleared together; [`commands`] is the only mutation path and preserves
/// this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthData {
    /// `None` means no plan chosen yet; the UI must show plan selection.
    pub selected_plan: Option<PlanId>,
    /// Free-text display label for the period, e.g. "March 2026".
    pub month_name: String,
    /// Exactly four weeks, in week order.
    pub weeks: [WeeklyData; WEEKS_PER_MONTH],
    /// Monthly reel done flags.
    pub reels: [bool; REEL_SLOTS],
    /// Opaque encoded signature image, uninterpreted by the core.
    pub client_signature: Option<String>,
    pub signature_date: Option<DateTime<Utc>>,
    /// Strategy narrative; empty string when absent.
    pub ai_observation: String,
}

impl MonthData {
    /// The pristine default: no plan, everything unchecked and zeroed,
    /// month name taken from the system clock.
    pub fn pristine() -> Self {
        Self::pristine_named(default_month_name())
    }

    /// Pristine default with an explicit month label.
    pub fn pristine_named(month_name: String) -> Self {
        Self {
            selected_plan: None,
            month_name,
            weeks: std::array::from_fn(|i| WeeklyData::empty(i as u8 + 1)),
            reels: [false; REEL_SLOTS],
            client_signature: None,
            signature_date: None,
            ai_observation: String::new(),
        }
    }

    /// Whether the client has signed the current report.
    pub fn is_signed(&self) -> bool {
        self.client_signature.is_some()
    }

    /// Look up a week by its 1-based id.
    pub fn week(&self, id: u8) -> Option<&WeeklyData> {
        self.weeks.iter().find(|w| w.id == id)
    }
}

impl Default for MonthData {
    fn default() -> Self {
        Self::pristine()
    }
}

/// Display label for the current month, e.g. "August 2026".
pub fn default_month_name() -> String {
    Utc::now().format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pristine_has_no_plan_and_no_activity() {
        let month = MonthData::pristine();
        assert_eq!(month.selected_plan, None);
        assert!(month.weeks.iter().all(|w| w.posts_done() == 0));
        assert!(month.weeks.iter().all(|w| w.stories_count == 0 && w.comments_count == 0));
        assert!(month.reels.iter().all(|r| !r));
        assert_eq!(month.client_signature, None);
        assert_eq!(month.signature_date, None);
        assert_eq!(month.ai_observation, "");
    }

    #[test]
    fn weeks_are_numbered_one_through_four() {
        let month = MonthData::pristine();
        let ids: Vec<u8> = month.weeks.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn week_lookup_by_id() {
        let month = MonthData::pristine_named("Test".into());
        assert_eq!(month.week(3).map(|w| w.id), Some(3));
        assert_eq!(month.week(5), None);
    }

    #[test]
    fn snapshot_round_trips_losslessly() {
        let mut month = MonthData::pristine_named("March 2026".into());
        month.selected_plan = Some(crate::catalog::PlanId::Growth);
        month.weeks[0].posts[1] = true;
        month.weeks[2].stories_count = 7;
        month.reels[0] = true;
        month.ai_observation = "steady month".into();

        let json = serde_json::to_string(&month).unwrap();
        let back: MonthData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }

    #[test]
    fn snapshot_round_trips_absent_signature() {
        let month = MonthData::pristine_named("March 2026".into());
        let json = serde_json::to_string(&month).unwrap();
        let back: MonthData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.client_signature, None);
        assert_eq!(back.signature_date, None);
    }
}
