mod config;
mod export;
mod plan_cmds;
mod report_cmd;
mod reset_cmd;
mod send_cmd;
mod status_cmd;
#[cfg(test)]
mod test_util;
mod track_cmds;
mod tui;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use socialtrack_core::month::CountField;
use socialtrack_core::narrative::TemplateNarrative;
use socialtrack_store::MonthStore;

use config::StrackConfig;
use export::ExportFormat;
use track_cmds::CountChange;

#[derive(Parser)]
#[command(name = "strack", about = "Monthly social media service plan tracker")]
struct Cli {
    /// Data directory (overrides STRACK_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a strack config file
    Init {
        /// Data directory to record in the config
        #[arg(long)]
        storage_dir: Option<String>,
        /// Export output directory to record in the config
        #[arg(long)]
        export_dir: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Plan catalog and selection
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Toggle a feed post slot (1-based week and slot)
    Post {
        /// Week number, 1-4
        week: u8,
        /// Post slot within the week, from 1
        slot: usize,
    },
    /// Toggle a monthly reel slot (1-based)
    Reel {
        /// Reel slot, from 1
        slot: usize,
    },
    /// Set or adjust a weekly engagement counter
    Count {
        /// Week number, 1-4
        week: u8,
        /// Counter to change: stories or comments
        field: String,
        /// Set the counter to an absolute value
        #[arg(long)]
        set: Option<i64>,
        /// Increase the counter
        #[arg(long)]
        add: Option<u32>,
        /// Decrease the counter (floors at zero)
        #[arg(long)]
        sub: Option<u32>,
    },
    /// Show the month's progress
    Status,
    /// Print the monthly report
    Report {
        /// Regenerate the strategy observation before printing
        #[arg(long)]
        narrative: bool,
    },
    /// Record the client signature from an image file
    Sign {
        /// Path to the signature image
        image: PathBuf,
    },
    /// Clear the client signature
    Unsign,
    /// Export the report artifact
    Export {
        /// Artifact format: pdf or docx
        #[arg(long, default_value = "pdf")]
        format: String,
        /// Output directory (defaults to the configured export dir)
        #[arg(long)]
        output: Option<String>,
    },
    /// Send the report to the client (simulated)
    Send,
    /// Clear all data for the current month
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Launch the interactive TUI dashboard
    Dashboard,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List the plan catalog
    List,
    /// Select a plan for the current month
    Select {
        /// Plan ID: basic, growth or authority
        plan: String,
    },
    /// Show a plan's details (defaults to the selected plan)
    Show {
        /// Plan ID to show (omit for the selected plan)
        plan: Option<String>,
    },
}

/// Execute the `strack init` command: write the config file.
fn cmd_init(storage_dir: Option<&str>, export_dir: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let data_dir = storage_dir
        .map(PathBuf::from)
        .unwrap_or_else(MonthStore::default_data_dir);
    let output_dir = export_dir.unwrap_or(".");

    let cfg = config::ConfigFile {
        storage: config::StorageSection {
            data_dir: data_dir.display().to_string(),
        },
        export: config::ExportSection {
            output_dir: output_dir.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  storage.data_dir = {}", data_dir.display());
    println!("  export.output_dir = {output_dir}");
    println!();
    println!("Next: run `strack plan select <basic|growth|authority>`.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init {
        storage_dir,
        export_dir,
        force,
    } = &cli.command
    {
        return cmd_init(storage_dir.as_deref(), export_dir.as_deref(), *force);
    }

    let resolved = StrackConfig::resolve(cli.data_dir.as_deref())?;
    let store = MonthStore::new(resolved.data_dir.clone());

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Plan { command } => {
            plan_cmds::run_plan_command(command, &store)?;
        }
        Commands::Post { week, slot } => {
            track_cmds::run_post(&store, week, slot)?;
        }
        Commands::Reel { slot } => {
            track_cmds::run_reel(&store, slot)?;
        }
        Commands::Count {
            week,
            field,
            set,
            add,
            sub,
        } => {
            let field: CountField = field
                .parse()
                .with_context(|| format!("invalid counter: {field}"))?;
            let change = match (set, add, sub) {
                (Some(v), None, None) => CountChange::Set(v),
                (None, Some(n), None) => CountChange::Add(n),
                (None, None, Some(n)) => CountChange::Sub(n),
                _ => anyhow::bail!("pass exactly one of --set, --add or --sub"),
            };
            track_cmds::run_count(&store, week, field, change)?;
        }
        Commands::Status => {
            status_cmd::run_status(&store)?;
        }
        Commands::Report { narrative } => {
            report_cmd::run_report(&store, narrative, &TemplateNarrative).await?;
        }
        Commands::Sign { image } => {
            report_cmd::run_sign(&store, &image)?;
        }
        Commands::Unsign => {
            report_cmd::run_unsign(&store)?;
        }
        Commands::Export { format, output } => {
            let format: ExportFormat = format.parse()?;
            let output_dir = output.map(PathBuf::from).unwrap_or(resolved.export_dir);
            let path = export::run_export(&store, format, &output_dir)?;
            println!("Report written to {}", path.display());
        }
        Commands::Send => {
            send_cmd::run_send(&store).await?;
        }
        Commands::Reset { yes } => {
            reset_cmd::run_reset(&store, yes)?;
        }
        Commands::Dashboard => {
            tui::run_dashboard(store, resolved.export_dir).await?;
        }
    }

    Ok(())
}
