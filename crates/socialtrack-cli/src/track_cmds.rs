//! `strack post`, `strack reel` and `strack count`: record deliverables.
//!
//! Week and slot numbers are 1-based on the command line; the core reducer
//! takes 0-based slot indices.

use anyhow::{Context, Result, bail};

use socialtrack_core::catalog::PlanId;
use socialtrack_core::month::{Command, CountField, MonthData};
use socialtrack_core::stats::compute_stats;
use socialtrack_store::MonthStore;

/// Change to apply to a weekly counter. Exactly one is given.
#[derive(Debug, Clone, Copy)]
pub enum CountChange {
    Set(i64),
    Add(u32),
    Sub(u32),
}

fn require_plan(month: &MonthData) -> Result<PlanId> {
    month
        .selected_plan
        .context("no plan selected; run `strack plan select <plan>` first")
}

fn slot_index(slot: usize) -> Result<usize> {
    slot.checked_sub(1)
        .context("slots are numbered from 1")
}

/// Toggle one post slot. `week` and `slot` are 1-based.
pub fn run_post(store: &MonthStore, week: u8, slot: usize) -> Result<()> {
    let mut month = store.load();
    let plan = require_plan(&month)?;
    let index = slot_index(slot)?;

    if slot > plan.config().posts_per_week {
        tracing::warn!(
            week,
            slot,
            plan = %plan,
            "slot beyond the plan's weekly cadence; recorded anyway"
        );
    }

    month.apply(Command::TogglePost { week, slot: index })?;
    store.save(&month)?;

    let state = if month.weeks[usize::from(week) - 1].posts[index] {
        "done"
    } else {
        "not done"
    };
    let stats = compute_stats(&month);
    println!(
        "Week {week} post {slot}: {state}. Posts {}/{}, completion {}%.",
        stats.posts_completed, stats.total_posts, stats.progress_percentage
    );
    Ok(())
}

/// Toggle one monthly reel slot. `slot` is 1-based.
pub fn run_reel(store: &MonthStore, slot: usize) -> Result<()> {
    let mut month = store.load();
    let plan = require_plan(&month)?;
    let index = slot_index(slot)?;

    if plan.config().total_reels == 0 {
        bail!(
            "the {} plan has no reel deliverables",
            plan.config().name
        );
    }

    month.apply(Command::ToggleReel { slot: index })?;
    store.save(&month)?;

    let state = if month.reels[index] { "done" } else { "not done" };
    let stats = compute_stats(&month);
    println!(
        "Reel {slot}: {state}. Reels {}/{}, completion {}%.",
        stats.reels_completed, stats.total_reels, stats.progress_percentage
    );
    Ok(())
}

/// Set or adjust a weekly counter.
pub fn run_count(store: &MonthStore, week: u8, field: CountField, change: CountChange) -> Result<()> {
    let mut month = store.load();
    require_plan(&month)?;

    let current = match month.week(week) {
        Some(w) => match field {
            CountField::Stories => w.stories_count,
            CountField::Comments => w.comments_count,
        },
        None => bail!("week {week} out of range (expected 1..=4)"),
    };

    let value = match change {
        CountChange::Set(v) => v,
        CountChange::Add(n) => i64::from(current) + i64::from(n),
        CountChange::Sub(n) => i64::from(current) - i64::from(n),
    };

    month.apply(Command::SetCount { week, field, value })?;
    store.save(&month)?;

    let updated = match field {
        CountField::Stories => month.weeks[usize::from(week) - 1].stories_count,
        CountField::Comments => month.weeks[usize::from(week) - 1].comments_count,
    };
    let stats = compute_stats(&month);
    println!("Week {week} {field}: {updated}. Completion {}%.", stats.progress_percentage);
    Ok(())
}
