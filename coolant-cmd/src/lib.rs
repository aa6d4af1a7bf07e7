//! Command implementations for the Coolant Pro CLI.
//!
//! Each subcommand is one request/response pass against the shop database:
//! log or preview a visit, browse history, export a shop report, chart a
//! machine's trend, or import an earlier report.

use clap::{Args, Subcommand};
use coolant_core::chemistry::Targets;
use coolant_core::config::AppConfig;
use coolant_db::Database;
use std::path::PathBuf;

pub mod chart;
pub mod history;
pub mod report;
pub mod visit;

/// Per-run overrides of the configured chemistry targets.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Minimum acceptable concentration percent
    #[arg(long = "target-conc")]
    pub target_conc_pct: Option<f64>,

    /// Minimum acceptable pH
    #[arg(long = "target-ph")]
    pub target_min_ph: Option<f64>,
}

impl TargetArgs {
    pub fn resolve(&self, configured: &Targets) -> Targets {
        Targets {
            target_conc_pct: self.target_conc_pct.unwrap_or(configured.target_conc_pct),
            target_min_ph: self.target_min_ph.unwrap_or(configured.target_min_ph),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a machine visit and print the recommendations
    Log {
        #[command(flatten)]
        visit: visit::VisitArgs,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute concentration and recommendations without saving
    Analyze {
        #[command(flatten)]
        visit: visit::VisitArgs,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List readings for a shop, optionally one machine
    History {
        #[arg(short, long)]
        shop: String,

        #[arg(short, long)]
        machine: Option<String>,

        /// Show only the N most recent entries, newest first
        #[arg(long)]
        recent: Option<usize>,

        /// Print the readings as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every shop with recorded readings
    Shops,

    /// List a shop's machines with visit counts
    Machines {
        #[arg(short, long)]
        shop: String,
    },

    /// List every coolant product on record
    Products,

    /// Show the pre-filled sump volume and RI factor for a machine
    Defaults {
        #[arg(short, long)]
        shop: String,

        #[arg(short, long)]
        machine: String,
    },

    /// List the quick-note phrases accepted by --quick
    QuickNotes,

    /// Export a shop's readings as a flagged CSV report
    Export {
        #[arg(short, long)]
        shop: String,

        /// Output path for the CSV report
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        targets: TargetArgs,
    },

    /// Render a machine's concentration and pH trend as SVG
    Chart {
        #[arg(short, long)]
        shop: String,

        #[arg(short, long)]
        machine: String,

        /// Output path for the SVG chart
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        targets: TargetArgs,
    },

    /// Load readings from a previously exported CSV report
    Import {
        /// Path to the CSV report
        #[arg(short, long)]
        input: PathBuf,
    },
}

pub fn run(command: Command, db: &Database, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Log { visit, json } => visit::run_log(db, config, &visit, json),
        Command::Analyze { visit, json } => visit::run_analyze(db, config, &visit, json),
        Command::History {
            shop,
            machine,
            recent,
            json,
        } => history::run_history(db, &shop, machine.as_deref(), recent, json),
        Command::Shops => history::run_shops(db),
        Command::Machines { shop } => history::run_machines(db, &shop),
        Command::Products => history::run_products(db),
        Command::Defaults { shop, machine } => history::run_defaults(db, config, &shop, &machine),
        Command::QuickNotes => history::run_quick_notes(),
        Command::Export {
            shop,
            output,
            targets,
        } => report::run_export(db, &shop, &output, &targets.resolve(&config.targets)),
        Command::Chart {
            shop,
            machine,
            output,
            targets,
        } => chart::run_chart(db, &shop, &machine, &output, &targets.resolve(&config.targets)),
        Command::Import { input } => report::run_import(db, &input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_args_override_only_what_is_given() {
        let configured = Targets {
            target_conc_pct: 7.0,
            target_min_ph: 9.0,
        };
        let args = TargetArgs {
            target_conc_pct: Some(6.5),
            target_min_ph: None,
        };
        let resolved = args.resolve(&configured);
        assert_eq!(resolved.target_conc_pct, 6.5);
        assert_eq!(resolved.target_min_ph, 9.0);
        assert_eq!(TargetArgs::default().resolve(&configured), configured);
    }
}
