//! Mutation commands for the month record.
//!
//! All state transitions go through [`MonthData::apply`], a single
//! reducer-style entry point over explicit command values. That keeps the
//! mutation surface enumerable and lets tests replay a command sequence
//! deterministically.
//!
//! Out-of-range week or slot indices are programming errors in the calling
//! layer (the UI derives indices from the fixed-length arrays); they are
//! rejected loudly with [`CommandError`] rather than silently ignored.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;

use super::{MonthData, POST_SLOTS_PER_WEEK, REEL_SLOTS, WEEKS_PER_MONTH};
use crate::catalog::PlanId;

/// Which weekly counter a [`Command::SetCount`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Stories,
    Comments,
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stories => "stories",
            Self::Comments => "comments",
        };
        f.write_str(s)
    }
}

impl FromStr for CountField {
    type Err = CountFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stories" => Ok(Self::Stories),
            "comments" => Ok(Self::Comments),
            other => Err(CountFieldParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`CountField`] string.
#[derive(Debug, Clone)]
pub struct CountFieldParseError(pub String);

impl fmt::Display for CountFieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid counter {:?} (expected stories or comments)", self.0)
    }
}

impl std::error::Error for CountFieldParseError {}

// ---------------------------------------------------------------------------

/// A single user action against the month record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose a plan. Existing checklist progress is kept.
    SelectPlan(PlanId),
    /// Flip one post done-flag. `week` is 1-based, `slot` 0-based.
    TogglePost { week: u8, slot: usize },
    /// Set a weekly counter. Negative values clamp to zero; there is no
    /// upper bound.
    SetCount { week: u8, field: CountField, value: i64 },
    /// Flip one monthly reel done-flag.
    ToggleReel { slot: usize },
    /// Record the client signature together with the signing time.
    Sign(String),
    /// Remove the signature and its timestamp together.
    ClearSignature,
    /// Wipe the record back to the pristine default.
    Reset,
}

/// Precondition violations raised by [`MonthData::apply`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("week {0} out of range (expected 1..={max})", max = WEEKS_PER_MONTH)]
    WeekOutOfRange(u8),

    #[error("post slot {0} out of range (expected 0..{max})", max = POST_SLOTS_PER_WEEK)]
    PostSlotOutOfRange(usize),

    #[error("reel slot {0} out of range (expected 0..{max})", max = REEL_SLOTS)]
    ReelSlotOutOfRange(usize),
}

impl MonthData {
    /// Apply one command to the record.
    ///
    /// Every command is synchronous and total; persistence is the caller's
    /// responsibility after a successful apply.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::SelectPlan(plan) => {
                self.selected_plan = Some(plan);
            }
            Command::TogglePost { week, slot } => {
                if slot >= POST_SLOTS_PER_WEEK {
                    return Err(CommandError::PostSlotOutOfRange(slot));
                }
                let week = self.week_mut(week)?;
                week.posts[slot] = !week.posts[slot];
            }
            Command::SetCount { week, field, value } => {
                let clamped = value.clamp(0, u32::MAX as i64) as u32;
                let week = self.week_mut(week)?;
                match field {
                    CountField::Stories => week.stories_count = clamped,
                    CountField::Comments => week.comments_count = clamped,
                }
            }
            Command::ToggleReel { slot } => {
                if slot >= REEL_SLOTS {
                    return Err(CommandError::ReelSlotOutOfRange(slot));
                }
                self.reels[slot] = !self.reels[slot];
            }
            Command::Sign(payload) => {
                self.client_signature = Some(payload);
                self.signature_date = Some(Utc::now());
            }
            Command::ClearSignature => {
                self.client_signature = None;
                self.signature_date = None;
            }
            Command::Reset => {
                *self = MonthData::pristine();
            }
        }
        Ok(())
    }

    fn week_mut(&mut self, id: u8) -> Result<&mut super::WeeklyData, CommandError> {
        self.weeks
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(CommandError::WeekOutOfRange(id))
    }
}
