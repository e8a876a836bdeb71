//! TUI application state and data model.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use socialtrack_core::catalog::PlanId;
use socialtrack_core::month::{Command, CountField, MonthData};
use socialtrack_core::narrative::{NarrativeGenerator, observation_or_fallback};
use socialtrack_core::send::{IDLE_DELAY, SENT_DELAY, SendStatus, check_send_allowed};
use socialtrack_core::stats::{DashboardStats, compute_stats};
use socialtrack_store::MonthStore;

use crate::export::{self, ExportFormat};

/// Which view the TUI is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    PlanSelection,
    Dashboard,
    Tracker,
    Report,
    Help,
}

/// One selectable row of the tracker checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerItem {
    /// `week` is 1-based, `slot` 0-based.
    Post { week: u8, slot: usize },
    /// `slot` is 0-based.
    Reel { slot: usize },
    Stories { week: u8 },
    Comments { week: u8 },
}

/// Application state for the TUI.
pub struct App {
    pub store: MonthStore,
    pub export_dir: PathBuf,
    pub month: MonthData,
    pub view: View,
    pub plan_cursor: usize,
    pub tracker_cursor: usize,
    pub send_status: SendStatus,
    send_started: Option<Instant>,
    pub confirm_reset: bool,
    pub tick_rate: Duration,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: MonthStore, export_dir: PathBuf) -> Self {
        let month = store.load();
        let view = if month.selected_plan.is_none() {
            View::PlanSelection
        } else {
            View::Dashboard
        };
        Self {
            store,
            export_dir,
            month,
            view,
            plan_cursor: 0,
            tracker_cursor: 0,
            send_status: SendStatus::Idle,
            send_started: None,
            confirm_reset: false,
            tick_rate: Duration::from_millis(250),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn stats(&self) -> DashboardStats {
        compute_stats(&self.month)
    }

    /// The tracker checklist for the active plan, in display order: each
    /// week's visible post slots and counters, then the monthly reels.
    pub fn tracker_items(&self) -> Vec<TrackerItem> {
        let Some(plan) = self.month.selected_plan else {
            return Vec::new();
        };
        let config = plan.config();

        let mut items = Vec::new();
        for week in &self.month.weeks {
            for slot in 0..config.posts_per_week {
                items.push(TrackerItem::Post { week: week.id, slot });
            }
            items.push(TrackerItem::Stories { week: week.id });
            items.push(TrackerItem::Comments { week: week.id });
        }
        for slot in 0..config.total_reels {
            items.push(TrackerItem::Reel { slot });
        }
        items
    }

    /// Apply a command and persist the result. Failures surface in the
    /// status bar rather than tearing down the UI.
    fn apply(&mut self, command: Command) {
        if let Err(e) = self.month.apply(command) {
            self.status_message = Some(format!("Rejected: {e}"));
            return;
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.month) {
            self.status_message = Some(format!("Save failed: {e}"));
        }
    }

    // -- Navigation --

    pub fn navigate_back(&mut self) {
        if self.confirm_reset {
            self.confirm_reset = false;
            return;
        }
        match self.view {
            View::PlanSelection => {
                // With a plan already chosen this is just a detour.
                if self.month.selected_plan.is_some() {
                    self.view = View::Dashboard;
                } else {
                    self.should_quit = true;
                }
            }
            View::Dashboard => self.should_quit = true,
            View::Tracker | View::Report | View::Help => self.view = View::Dashboard,
        }
    }

    pub fn move_up(&mut self) {
        match self.view {
            View::PlanSelection => {
                if self.plan_cursor > 0 {
                    self.plan_cursor -= 1;
                }
            }
            View::Tracker => {
                if self.tracker_cursor > 0 {
                    self.tracker_cursor -= 1;
                }
            }
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.view {
            View::PlanSelection => {
                if self.plan_cursor + 1 < PlanId::ALL.len() {
                    self.plan_cursor += 1;
                }
            }
            View::Tracker => {
                let len = self.tracker_items().len();
                if len > 0 && self.tracker_cursor + 1 < len {
                    self.tracker_cursor += 1;
                }
            }
            _ => {}
        }
    }

    pub fn cycle_view(&mut self) {
        self.view = match self.view {
            View::Dashboard => View::Tracker,
            View::Tracker => View::Report,
            View::Report => View::Dashboard,
            other => other,
        };
    }

    pub fn show_help(&mut self) {
        if self.view != View::PlanSelection {
            self.view = View::Help;
        }
    }

    /// Open plan selection from the dashboard to switch plans mid-month.
    pub fn open_plan_selection(&mut self) {
        self.plan_cursor = self
            .month
            .selected_plan
            .and_then(|p| PlanId::ALL.iter().position(|id| *id == p))
            .unwrap_or(0);
        self.view = View::PlanSelection;
    }

    // -- Actions --

    /// Enter / Space: select a plan, or toggle the highlighted item.
    pub fn activate(&mut self) {
        match self.view {
            View::PlanSelection => {
                if let Some(plan) = PlanId::ALL.get(self.plan_cursor).copied() {
                    self.apply(Command::SelectPlan(plan));
                    self.tracker_cursor = 0;
                    self.view = View::Dashboard;
                    self.status_message =
                        Some(format!("Selected {}", plan.config().name));
                }
            }
            View::Tracker => match self.tracker_items().get(self.tracker_cursor).copied() {
                Some(TrackerItem::Post { week, slot }) => {
                    self.apply(Command::TogglePost { week, slot });
                }
                Some(TrackerItem::Reel { slot }) => {
                    self.apply(Command::ToggleReel { slot });
                }
                Some(TrackerItem::Stories { .. }) | Some(TrackerItem::Comments { .. }) => {
                    self.adjust_count(1);
                }
                None => {}
            },
            _ => {}
        }
    }

    /// +/- on a counter row.
    pub fn adjust_count(&mut self, delta: i64) {
        if self.view != View::Tracker {
            return;
        }
        let (week, field) = match self.tracker_items().get(self.tracker_cursor).copied() {
            Some(TrackerItem::Stories { week }) => (week, CountField::Stories),
            Some(TrackerItem::Comments { week }) => (week, CountField::Comments),
            _ => return,
        };
        let current = match field {
            CountField::Stories => self.month.week(week).map(|w| w.stories_count),
            CountField::Comments => self.month.week(week).map(|w| w.comments_count),
        };
        if let Some(current) = current {
            let value = i64::from(current) + delta;
            self.apply(Command::SetCount { week, field, value });
        }
    }

    /// Start a simulated send from the report view.
    ///
    /// Time-based: the event loop's tick advances the status, so the UI
    /// keeps rendering while the send is in flight.
    pub fn start_send(&mut self) {
        if self.send_status != SendStatus::Idle {
            return;
        }
        if check_send_allowed(&self.month).is_err() {
            self.status_message =
                Some("The client must sign the report before it can be sent".to_string());
            return;
        }
        self.send_status = SendStatus::Sending;
        self.send_started = Some(Instant::now());
    }

    /// Advance the send status on the fixed delay schedule.
    pub fn tick(&mut self) {
        let Some(started) = self.send_started else {
            return;
        };
        let elapsed = started.elapsed();
        if elapsed >= SENT_DELAY + IDLE_DELAY {
            self.send_status = SendStatus::Idle;
            self.send_started = None;
        } else if elapsed >= SENT_DELAY {
            self.send_status = SendStatus::Sent;
        }
    }

    /// Clear the signature from the report view.
    pub fn clear_signature(&mut self) {
        if !self.month.is_signed() {
            self.status_message = Some("The report is not signed".to_string());
            return;
        }
        self.apply(Command::ClearSignature);
        self.status_message = Some("Signature cleared".to_string());
    }

    /// Rewrite the strategy observation and persist it.
    pub async fn regenerate_narrative(&mut self, generator: &dyn NarrativeGenerator) {
        let stats = self.stats();
        self.month.ai_observation =
            observation_or_fallback(generator, &stats, &self.month.month_name).await;
        self.persist();
        self.status_message = Some("Observation regenerated".to_string());
    }

    /// Export the report artifact into the configured output directory.
    pub fn export(&mut self, format: ExportFormat) {
        match export::run_export(&self.store, format, &self.export_dir) {
            Ok(path) => {
                self.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                self.status_message = Some(format!("Export failed: {e}"));
            }
        }
    }

    // -- Reset flow --

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    pub fn confirm_reset_now(&mut self) {
        self.confirm_reset = false;
        match self.store.reset() {
            Ok(month) => {
                self.month = month;
                self.plan_cursor = 0;
                self.tracker_cursor = 0;
                self.view = View::PlanSelection;
                self.status_message = Some("Month data cleared".to_string());
            }
            Err(e) => {
                self.status_message = Some(format!("Reset failed: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
