use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use splitbook::cli::{
    handle_budget, handle_delete_project, handle_export, handle_import, handle_report,
    handle_scan, handle_settle, handle_totals, ImportMode, TotalsBy,
};
use splitbook::registry::ALL_PROJECTS;

#[derive(Parser)]
#[command(
    name = "splitbook",
    version,
    about = "Expense ledger with budget tracking and dutch-pay settlement",
    long_about = "splitbook records expense line items against projects and \
                  categories, compares spend to budget, splits cost fairly \
                  among participants, and renders a printable expense \
                  statement. Ledgers travel as ten-column CSV files."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the expense statement for a ledger
    Report {
        /// Ledger CSV file (canonical ten-column format)
        ledger: PathBuf,
        /// Project to report on; default is all projects
        #[arg(short, long, default_value = ALL_PROJECTS)]
        project: String,
        /// Statement title
        #[arg(long)]
        title: Option<String>,
        /// Activity period string printed in the header
        #[arg(long)]
        period: Option<String>,
        /// Budget JSON file for the remaining-budget summary
        #[arg(short, long)]
        budget: Option<PathBuf>,
        /// Start of an inclusive date range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of an inclusive date range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Dutch-pay settlement among the participants
    Settle {
        /// Ledger CSV file
        ledger: PathBuf,
        /// Project to settle; default is all projects
        #[arg(short, long, default_value = ALL_PROJECTS)]
        project: String,
    },

    /// Per-category or per-date spending totals
    Totals {
        /// Ledger CSV file
        ledger: PathBuf,
        /// Project to aggregate; default is all projects
        #[arg(short, long, default_value = ALL_PROJECTS)]
        project: String,
        /// Group by category (descending) or date (ascending)
        #[arg(long, value_enum, default_value = "category")]
        by: TotalsBy,
        /// Start of an inclusive date range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of an inclusive date range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Review spend against budget ceilings
    Budget {
        /// Ledger CSV file
        ledger: PathBuf,
        /// Budget JSON file, e.g. {"total": 100000, "식비": 30000}
        config: PathBuf,
        /// Project to review; default is all projects
        #[arg(short, long, default_value = ALL_PROJECTS)]
        project: String,
    },

    /// Re-export a ledger in canonical form (BOM, ten columns)
    Export {
        /// Ledger CSV file
        ledger: PathBuf,
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate and merge an import file, emitting the resulting ledger
    Import {
        /// Import CSV file
        input: PathBuf,
        /// Existing ledger to merge into (bulk mode); omit to start empty
        #[arg(short, long)]
        ledger: Option<PathBuf>,
        /// Bulk registration (additive) or full replacement
        #[arg(short, long, value_enum, default_value = "bulk")]
        mode: ImportMode,
        /// Selected project for rows without one (bulk mode)
        #[arg(short, long, default_value = ALL_PROJECTS)]
        project: String,
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a project and its expenses (administrator only)
    DeleteProject {
        /// Ledger CSV file
        ledger: PathBuf,
        /// Project name to delete
        name: String,
        /// Expected administrator secret
        #[arg(
            long,
            env = "SPLITBOOK_ADMIN_SECRET",
            default_value = "admin123",
            hide_default_value = true
        )]
        admin_secret: String,
        /// Administrator password to present
        #[arg(long, env = "SPLITBOOK_ADMIN_PASSWORD")]
        password: String,
        /// Destination file for the surviving ledger; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a candidate date and amount from receipt text
    Scan {
        /// File containing OCR-extracted receipt text
        text: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            ledger,
            project,
            title,
            period,
            budget,
            from,
            to,
        } => handle_report(
            &ledger,
            &project,
            title.as_deref(),
            period.as_deref(),
            budget.as_deref(),
            from.as_deref(),
            to.as_deref(),
        )?,
        Commands::Settle { ledger, project } => handle_settle(&ledger, &project)?,
        Commands::Totals {
            ledger,
            project,
            by,
            from,
            to,
        } => handle_totals(&ledger, &project, by, from.as_deref(), to.as_deref())?,
        Commands::Budget {
            ledger,
            config,
            project,
        } => handle_budget(&ledger, &config, &project)?,
        Commands::Export { ledger, output } => handle_export(&ledger, output.as_deref())?,
        Commands::Import {
            input,
            ledger,
            mode,
            project,
            output,
        } => handle_import(
            ledger.as_deref(),
            &input,
            mode,
            &project,
            output.as_deref(),
        )?,
        Commands::DeleteProject {
            ledger,
            name,
            admin_secret,
            password,
            output,
        } => handle_delete_project(&ledger, &name, &admin_secret, &password, output.as_deref())?,
        Commands::Scan { text } => handle_scan(&text)?,
    }

    Ok(())
}
