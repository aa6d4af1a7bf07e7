//! Query result and report row structs.
//!
//! All structs derive `Serialize` so they can be written to CSV reports or
//! JSON for charting front ends.

use coolant_core::chemistry::{self, ConcentrationStatus, PhStatus, Targets};
use coolant_core::ServiceReading;
use coolant_utils::dates::format_date;
use serde::{Deserialize, Serialize};

/// One point on a machine's trend chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    /// Service date (YYYY-MM-DD).
    pub date: String,
    /// Concentration percent; `0` when Brix was not measured.
    pub concentration_pct: f64,
    /// pH; `0` when not measured.
    pub ph: f64,
}

/// Per-machine overview for a shop.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MachineSummary {
    pub machine: String,
    pub visits: i64,
    /// Date of the latest visit (YYYY-MM-DD).
    pub last_service_date: String,
}

/// A row of the shop report.
///
/// Carries the persisted columns plus `conc_flag` and `ph_flag`:
/// `LOW` below target, `OK` at or above it, empty when not measured.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub shop: String,
    pub machine: String,
    pub coolant_product: String,
    pub metal: String,
    pub alloy: String,
    pub sump_volume_gal: f64,
    pub ri_factor: f64,
    pub brix: f64,
    pub concentration_pct: f64,
    pub ph: f64,
    pub notes: String,
    pub service_date: String,
    pub conc_flag: &'static str,
    pub ph_flag: &'static str,
}

impl ReportRow {
    pub fn from_reading(reading: &ServiceReading, targets: &Targets) -> Self {
        let sample = reading.sample();
        let conc_flag = match chemistry::concentration_status(&sample, targets) {
            ConcentrationStatus::Low => "LOW",
            ConcentrationStatus::OnTarget => "OK",
            ConcentrationStatus::NotMeasured => "",
        };
        let ph_flag = match chemistry::ph_status(reading.ph, targets) {
            PhStatus::Low => "LOW",
            PhStatus::Healthy => "OK",
            PhStatus::NotMeasured => "",
        };
        Self {
            shop: reading.shop.clone(),
            machine: reading.machine.clone(),
            coolant_product: reading.coolant_product.clone().unwrap_or_default(),
            metal: reading.metal.map(|m| m.label().to_string()).unwrap_or_default(),
            alloy: reading.alloy.clone().unwrap_or_default(),
            sump_volume_gal: reading.sump_volume_gal,
            ri_factor: reading.ri_factor,
            brix: reading.brix,
            concentration_pct: reading.concentration_pct(),
            ph: reading.ph,
            notes: reading.notes.clone(),
            service_date: format_date(&reading.service_date),
            conc_flag,
            ph_flag,
        }
    }
}

/// A row read back from a report CSV.
///
/// Columns are matched by header name; any extra columns (including
/// `concentration_pct` and the flags) are ignored, since the concentration
/// is recomputed from `brix` and `ri_factor`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ImportRow {
    #[serde(default)]
    pub shop: String,
    #[serde(default)]
    pub machine: String,
    #[serde(default)]
    pub coolant_product: Option<String>,
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub alloy: Option<String>,
    pub sump_volume_gal: f64,
    pub ri_factor: f64,
    #[serde(default)]
    pub brix: f64,
    #[serde(default)]
    pub ph: f64,
    #[serde(default)]
    pub notes: String,
    pub service_date: String,
}
