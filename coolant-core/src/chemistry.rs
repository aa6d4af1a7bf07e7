//! Coolant chemistry engine.
//!
//! Pure functions turning raw refractometer and pH readings into a
//! concentration percentage and a list of dosing recommendations.
//!
//! # Sentinel convention
//!
//! A Brix or pH of `0` means "not measured". A zero Brix never produces a
//! recharge (it is not "0% concentration"), and a zero pH never produces a
//! pH boost or counts toward a persistent low-pH fault.
//!
//! # Rounding
//!
//! All quantities round half away from zero (`f64::round`).

use coolant_utils::numbers::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default minimum acceptable concentration percent.
pub const DEFAULT_TARGET_CONC_PCT: f64 = 8.0;

/// Default minimum acceptable pH.
pub const DEFAULT_TARGET_MIN_PH: f64 = 8.8;

/// pH booster dose in ounces per 100 gallons of sump volume.
pub const PH_BOOST_DOSE_OZ_PER_100GAL: f64 = 16.0;

/// Product name used in recommendation text for the pH booster.
pub const PH_BOOST_PRODUCT: &str = "pH Boost 95";

/// Shop-level chemistry targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    /// Minimum acceptable concentration percent.
    pub target_conc_pct: f64,
    /// Minimum acceptable pH.
    pub target_min_ph: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            target_conc_pct: DEFAULT_TARGET_CONC_PCT,
            target_min_ph: DEFAULT_TARGET_MIN_PH,
        }
    }
}

/// Raw sensor inputs for one machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub brix: f64,
    pub ri_factor: f64,
    pub ph: f64,
    pub sump_volume_gal: f64,
}

impl Sample {
    pub fn concentration_pct(&self) -> f64 {
        compute_concentration(self.brix, self.ri_factor)
    }
}

/// A dosing action for the technician.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Add concentrate to bring the sump back up to target.
    Recharge { gallons: f64 },
    /// Add pH booster, dosed by sump volume.
    PhBoost { ounces: f64 },
    /// pH has been low on two consecutive visits.
    Biocide,
}

impl Recommendation {
    /// Instruction text, naming `product` for a recharge.
    pub fn describe(&self, product: Option<&str>) -> String {
        match self {
            Recommendation::Recharge { gallons } => {
                format!("Add {:?} Gal of {}", gallons, product.unwrap_or("concentrate"))
            }
            Recommendation::PhBoost { ounces } => {
                format!("Add {:.1} oz of {}", ounces, PH_BOOST_PRODUCT)
            }
            Recommendation::Biocide => {
                "pH low on consecutive visits: treat with biocide".to_string()
            }
        }
    }
}

/// Concentration relative to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationStatus {
    NotMeasured,
    Low,
    OnTarget,
}

/// pH relative to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhStatus {
    NotMeasured,
    Low,
    Healthy,
}

impl fmt::Display for PhStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhStatus::NotMeasured => "not measured",
            PhStatus::Low => "low",
            PhStatus::Healthy => "pH is Healthy",
        };
        f.write_str(s)
    }
}

impl fmt::Display for ConcentrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConcentrationStatus::NotMeasured => "not measured",
            ConcentrationStatus::Low => "low",
            ConcentrationStatus::OnTarget => "on target",
        };
        f.write_str(s)
    }
}

/// Full result of assessing one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub concentration_pct: f64,
    pub concentration_status: ConcentrationStatus,
    pub ph_status: PhStatus,
    pub persistent_fault: bool,
    /// Recharge, then pH boost, then biocide.
    pub recommendations: Vec<Recommendation>,
}

/// Concentration percent from a Brix reading: `round(brix * ri_factor, 2)`.
pub fn compute_concentration(brix: f64, ri_factor: f64) -> f64 {
    round_to(brix * ri_factor, 2)
}

/// Gallons of concentrate needed to lift `concentration_pct` to `target_conc_pct`.
///
/// Linear mixing: the added concentrate is assumed not to change the sump volume.
pub fn recharge_gallons(concentration_pct: f64, target_conc_pct: f64, sump_volume_gal: f64) -> f64 {
    round_to(
        ((target_conc_pct - concentration_pct) / 100.0) * sump_volume_gal,
        2,
    )
}

/// Ounces of pH booster for a sump, independent of how low the pH is.
pub fn ph_boost_ounces(sump_volume_gal: f64) -> f64 {
    round_to((sump_volume_gal / 100.0) * PH_BOOST_DOSE_OZ_PER_100GAL, 1)
}

fn is_low_ph(ph: f64, target_min_ph: f64) -> bool {
    ph > 0.0 && ph < target_min_ph
}

/// Dosing recommendations for one sample, recharge before pH boost.
///
/// Returns nothing when no Brix reading was taken.
pub fn recommend(sample: &Sample, targets: &Targets) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    if sample.brix <= 0.0 {
        return recommendations;
    }

    let concentration_pct = sample.concentration_pct();
    if concentration_pct < targets.target_conc_pct {
        recommendations.push(Recommendation::Recharge {
            gallons: recharge_gallons(
                concentration_pct,
                targets.target_conc_pct,
                sample.sump_volume_gal,
            ),
        });
    }

    if is_low_ph(sample.ph, targets.target_min_ph) {
        recommendations.push(Recommendation::PhBoost {
            ounces: ph_boost_ounces(sample.sump_volume_gal),
        });
    }

    recommendations
}

/// True when both this visit and the previous one measured a low pH.
///
/// Unmeasured pH (`0`) on either visit never counts as low.
pub fn check_persistent_fault(current_ph: f64, target_min_ph: f64, prior_ph: Option<f64>) -> bool {
    is_low_ph(current_ph, target_min_ph)
        && prior_ph.is_some_and(|prior| is_low_ph(prior, target_min_ph))
}

pub fn concentration_status(sample: &Sample, targets: &Targets) -> ConcentrationStatus {
    if sample.brix <= 0.0 {
        ConcentrationStatus::NotMeasured
    } else if sample.concentration_pct() < targets.target_conc_pct {
        ConcentrationStatus::Low
    } else {
        ConcentrationStatus::OnTarget
    }
}

pub fn ph_status(ph: f64, targets: &Targets) -> PhStatus {
    if ph <= 0.0 {
        PhStatus::NotMeasured
    } else if ph < targets.target_min_ph {
        PhStatus::Low
    } else {
        PhStatus::Healthy
    }
}

/// Assess a sample against targets, escalating to a biocide treatment when
/// the previous visit's pH (`prior_ph`) was also low.
///
/// Like [`recommend`], a sample without a Brix reading gets no escalation.
pub fn assess(sample: &Sample, targets: &Targets, prior_ph: Option<f64>) -> Analysis {
    let mut recommendations = recommend(sample, targets);
    let persistent_fault = sample.brix > 0.0
        && check_persistent_fault(sample.ph, targets.target_min_ph, prior_ph);
    if persistent_fault {
        recommendations.push(Recommendation::Biocide);
    }
    Analysis {
        concentration_pct: sample.concentration_pct(),
        concentration_status: concentration_status(sample, targets),
        ph_status: ph_status(sample.ph, targets),
        persistent_fault,
        recommendations,
    }
}
