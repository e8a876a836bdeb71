//! `strack plan` subcommands: list the catalog, select a plan, show one.

use anyhow::{Context, Result};

use socialtrack_core::catalog::{PlanConfig, PlanId};
use socialtrack_core::month::Command;
use socialtrack_store::MonthStore;

use crate::PlanCommands;

/// Run a plan subcommand.
pub fn run_plan_command(command: PlanCommands, store: &MonthStore) -> Result<()> {
    match command {
        PlanCommands::List => run_list(store),
        PlanCommands::Select { plan } => run_select(store, &plan),
        PlanCommands::Show { plan } => run_show(store, plan.as_deref()),
    }
}

/// List the catalog with the currently selected plan marked.
fn run_list(store: &MonthStore) -> Result<()> {
    let month = store.load();

    println!(
        "  {:<11} {:<18} {:>7} {:>7} {:>7}",
        "ID", "NAME", "PRICE", "POSTS", "REELS"
    );
    println!("  {}", "-".repeat(55));
    for id in PlanId::ALL {
        let config = id.config();
        let marker = if month.selected_plan == Some(id) { "*" } else { " " };
        println!(
            "{} {:<11} {:<18} {:>6}$ {:>7} {:>7}",
            marker, id, config.name, config.price, config.total_posts, config.total_reels
        );
    }
    if month.selected_plan.is_none() {
        println!();
        println!("No plan selected. Run `strack plan select <id>` to begin.");
    }
    Ok(())
}

/// Select a plan for the current month. Existing checklist progress is kept.
fn run_select(store: &MonthStore, plan_str: &str) -> Result<()> {
    let plan: PlanId = plan_str
        .parse()
        .with_context(|| format!("invalid plan ID: {plan_str}"))?;

    let mut month = store.load();
    let previous = month.selected_plan;
    month
        .apply(Command::SelectPlan(plan))
        .context("failed to select plan")?;
    store.save(&month)?;

    let config = plan.config();
    match previous {
        Some(old) if old != plan => {
            println!(
                "Switched from {} to {} ({}$ / month). Recorded progress is kept.",
                old.config().name,
                config.name,
                config.price
            );
        }
        Some(_) => println!("Plan unchanged: {}.", config.name),
        None => println!("Selected {} ({}$ / month).", config.name, config.price),
    }
    Ok(())
}

/// Show one plan's details, defaulting to the selected plan.
fn run_show(store: &MonthStore, plan_str: Option<&str>) -> Result<()> {
    let plan: PlanId = match plan_str {
        Some(s) => s.parse().with_context(|| format!("invalid plan ID: {s}"))?,
        None => {
            let month = store.load();
            match month.selected_plan {
                Some(p) => p,
                None => {
                    println!("No plan selected. Pass a plan ID or run `strack plan select`.");
                    return Ok(());
                }
            }
        }
    };

    print_plan(plan.config());
    Ok(())
}

fn print_plan(config: &PlanConfig) {
    println!("{} ({})", config.name, config.id);
    println!("Price: {}$ / month", config.price);
    println!(
        "Deliverables: {} posts ({} per week), {} reels",
        config.total_posts, config.posts_per_week, config.total_reels
    );
    println!("Includes:");
    for feature in config.features {
        println!("  - {feature}");
    }
}
