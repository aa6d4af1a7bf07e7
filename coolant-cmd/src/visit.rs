//! `log` and `analyze`: run one machine visit through the chemistry engine.

use chrono::NaiveDate;
use clap::Args;
use coolant_core::chemistry::{ConcentrationStatus, Targets};
use coolant_core::config::AppConfig;
use coolant_core::notes::{compose_notes, QuickNote};
use coolant_core::visit::{log_visit, preview_visit, ShopProfile, VisitOutcome, VisitRequest};
use coolant_core::MetalCategory;
use coolant_db::Database;
use coolant_utils::dates::{format_date, today};
use std::fmt::{self, Write};

use crate::TargetArgs;

#[derive(Args, Debug, Clone)]
pub struct VisitArgs {
    /// Shop or customer name
    #[arg(short, long)]
    pub shop: String,

    /// Machine identifier
    #[arg(short, long)]
    pub machine: String,

    /// Shop-wide coolant product
    #[arg(long)]
    pub coolant: Option<String>,

    /// Coolant product for this machine only
    #[arg(long)]
    pub machine_coolant: Option<String>,

    /// Workpiece metal, e.g. "Aluminum 6XXX" or cast-iron
    #[arg(long)]
    pub metal: Option<MetalCategory>,

    /// Specific alloy, e.g. 6061-T6
    #[arg(long)]
    pub alloy: Option<String>,

    /// Sump volume in gallons (defaults to the machine's last visit)
    #[arg(long = "sump")]
    pub sump_volume_gal: Option<f64>,

    /// Refractive-index factor (defaults to the machine's last visit)
    #[arg(long = "ri")]
    pub ri_factor: Option<f64>,

    /// Brix reading, 0 when not measured
    #[arg(long, default_value_t = 0.0)]
    pub brix: f64,

    /// pH reading, 0 when not measured
    #[arg(long, default_value_t = 0.0)]
    pub ph: f64,

    /// Free-text note
    #[arg(long)]
    pub note: Option<String>,

    /// Quick note by key, phrase or index (repeatable)
    #[arg(long = "quick")]
    pub quick: Vec<QuickNote>,

    /// Service date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub targets: TargetArgs,
}

impl VisitArgs {
    pub fn to_request(&self, configured: &Targets) -> VisitRequest {
        VisitRequest {
            profile: ShopProfile {
                name: self.shop.clone(),
                coolant_product: self.coolant.clone(),
                targets: self.targets.resolve(configured),
            },
            machine: self.machine.clone(),
            machine_coolant: self.machine_coolant.clone(),
            metal: self.metal,
            alloy: self.alloy.clone(),
            sump_volume_gal: self.sump_volume_gal,
            ri_factor: self.ri_factor,
            brix: self.brix,
            ph: self.ph,
            notes: compose_notes(self.note.as_deref(), &self.quick),
            service_date: self.date.unwrap_or_else(today),
        }
    }
}

pub fn run_log(db: &Database, config: &AppConfig, args: &VisitArgs, json: bool) -> anyhow::Result<()> {
    let request = args.to_request(&config.targets);
    let outcome = log_visit(db, &request, &config.defaults)?;
    print_outcome(&outcome, &request.profile.targets, json)
}

pub fn run_analyze(db: &Database, config: &AppConfig, args: &VisitArgs, json: bool) -> anyhow::Result<()> {
    let request = args.to_request(&config.targets);
    let outcome = preview_visit(db, &request, &config.defaults)?;
    print_outcome(&outcome, &request.profile.targets, json)
}

fn print_outcome(outcome: &VisitOutcome, targets: &Targets, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", outcome_json(outcome)?);
    } else {
        print!("{}", format_outcome(outcome, targets)?);
    }
    Ok(())
}

pub fn outcome_json(outcome: &VisitOutcome) -> anyhow::Result<String> {
    let value = serde_json::json!({
        "id": outcome.id,
        "reading": outcome.reading,
        "analysis": outcome.analysis,
        "instructions": outcome.instructions(),
        "prior_service_date": outcome.prior.as_ref().map(|p| format_date(&p.service_date)),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Plain-text report of a visit, one line per finding.
pub fn format_outcome(outcome: &VisitOutcome, targets: &Targets) -> Result<String, fmt::Error> {
    let reading = &outcome.reading;
    let analysis = &outcome.analysis;
    let mut out = String::new();

    writeln!(
        out,
        "{} / {} on {}",
        reading.shop,
        reading.machine,
        format_date(&reading.service_date)
    )?;
    if let Some(product) = &reading.coolant_product {
        writeln!(out, "  Coolant:       {}", product)?;
    }
    match (&reading.metal, &reading.alloy) {
        (Some(metal), Some(alloy)) => writeln!(out, "  Metal:         {} ({})", metal, alloy)?,
        (Some(metal), None) => writeln!(out, "  Metal:         {}", metal)?,
        (None, Some(alloy)) => writeln!(out, "  Alloy:         {}", alloy)?,
        (None, None) => {}
    }
    writeln!(
        out,
        "  Sump:          {} gal, RI {}",
        reading.sump_volume_gal, reading.ri_factor
    )?;

    match analysis.concentration_status {
        ConcentrationStatus::NotMeasured => writeln!(out, "  Concentration: not measured")?,
        status => writeln!(
            out,
            "  Concentration: {}% ({}, target {}%)",
            analysis.concentration_pct, status, targets.target_conc_pct
        )?,
    }
    if reading.ph > 0.0 {
        writeln!(
            out,
            "  pH:            {} ({}, min {})",
            reading.ph, analysis.ph_status, targets.target_min_ph
        )?;
    } else {
        writeln!(out, "  pH:            not measured")?;
    }
    if !reading.notes.is_empty() {
        writeln!(out, "  Notes:         {}", reading.notes)?;
    }

    for line in outcome.instructions() {
        writeln!(out, "  -> {}", line)?;
    }

    if let Some(prior) = &outcome.prior {
        writeln!(out, "  Previous visit {}", format_date(&prior.service_date))?;
    }
    match outcome.id {
        Some(id) => writeln!(out, "Saved reading #{}", id)?,
        None => writeln!(out, "Not saved")?,
    }
    Ok(out)
}
