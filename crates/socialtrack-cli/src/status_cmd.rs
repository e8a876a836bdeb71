//! `strack status` command: show the month's progress at a glance.

use anyhow::Result;

use socialtrack_core::month::MonthData;
use socialtrack_core::stats::{compute_stats, weekly_activity};
use socialtrack_store::MonthStore;

/// Run the status command.
pub fn run_status(store: &MonthStore) -> Result<()> {
    let month = store.load();

    let Some(plan_id) = month.selected_plan else {
        println!("No plan selected for {}.", month.month_name);
        println!("Run `strack plan select <basic|growth|authority>` to begin.");
        return Ok(());
    };
    let config = plan_id.config();
    let stats = compute_stats(&month);

    println!("Month: {}", month.month_name);
    println!("Plan:  {} ({}$ / month)", config.name, config.price);
    println!();

    println!(
        "Completion: {:>3}%  [{}]",
        stats.progress_percentage,
        progress_bar(stats.progress_percentage, 30)
    );
    println!("  posts={}/{} reels={}/{} stories={} replies={}",
        stats.posts_completed,
        stats.total_posts,
        stats.reels_completed,
        stats.total_reels,
        stats.stories_total,
        stats.comments_total,
    );
    println!();

    println!("Weeks:");
    for week in weekly_activity(&month) {
        let slots = post_slot_icons(&month, week.week, config.posts_per_week);
        println!(
            "  Week {}: posts [{}] stories={} replies={}",
            week.week, slots, week.stories, week.comments
        );
    }

    if config.total_reels > 0 {
        let reels: String = month.reels[..config.total_reels]
            .iter()
            .map(|r| if *r { '+' } else { '.' })
            .collect();
        println!("  Reels:  [{reels}]");
    }
    println!();

    match month.signature_date {
        Some(date) => println!("Signed: {}", date.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Signed: no"),
    }
    Ok(())
}

/// ASCII progress bar, `width` cells wide.
fn progress_bar(percentage: u8, width: usize) -> String {
    let filled = (usize::from(percentage) * width) / 100;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}

/// Done/pending icons for a week's visible post slots.
fn post_slot_icons(month: &MonthData, week_id: u8, visible: usize) -> String {
    match month.week(week_id) {
        Some(week) => week.posts[..visible]
            .iter()
            .map(|p| if *p { '+' } else { '.' })
            .collect(),
        None => String::new(),
    }
}
