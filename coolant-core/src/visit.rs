//! Service visit flow: validate identity, recall history, assess, persist.

use chrono::NaiveDate;

use crate::chemistry::{assess, Analysis, Targets};
use crate::config::ShopDefaults;
use crate::error::CoolantError;
use crate::reading::{non_blank, MetalCategory, ServiceReading};
use crate::recall::{most_recent_on_or_before, MachineDefaults};
use crate::store::RecordStore;

/// A shop and its chemistry targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopProfile {
    pub name: String,
    /// Shop-wide coolant product.
    pub coolant_product: Option<String>,
    pub targets: Targets,
}

/// Technician input for one machine.
///
/// `sump_volume_gal` and `ri_factor` fall back to the machine's previous
/// reading, then to the shop defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRequest {
    pub profile: ShopProfile,
    pub machine: String,
    /// Overrides the shop-wide product for this machine.
    pub machine_coolant: Option<String>,
    pub metal: Option<MetalCategory>,
    pub alloy: Option<String>,
    pub sump_volume_gal: Option<f64>,
    pub ri_factor: Option<f64>,
    pub brix: f64,
    pub ph: f64,
    pub notes: String,
    pub service_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisitOutcome {
    /// Insertion identifier, `None` for a preview.
    pub id: Option<i64>,
    pub reading: ServiceReading,
    pub analysis: Analysis,
    pub prior: Option<ServiceReading>,
}

impl VisitOutcome {
    /// Recommendation lines ready for display.
    pub fn instructions(&self) -> Vec<String> {
        self.analysis
            .recommendations
            .iter()
            .map(|r| r.describe(self.reading.coolant_product.as_deref()))
            .collect()
    }
}

fn require(value: &str, field: &'static str) -> Result<String, CoolantError> {
    non_blank(Some(value)).ok_or(CoolantError::MissingIdentity { field })
}

/// Build and assess the reading without saving it.
pub fn preview_visit<S: RecordStore + ?Sized>(
    store: &S,
    request: &VisitRequest,
    defaults: &ShopDefaults,
) -> anyhow::Result<VisitOutcome> {
    let shop = require(&request.profile.name, "shop name")?;
    let machine = require(&request.machine, "machine ID")?;

    let prior = most_recent_on_or_before(store, &shop, &machine, request.service_date)?;
    let fallback = MachineDefaults::from_prior(prior.as_ref(), defaults);

    let coolant_product = non_blank(request.machine_coolant.as_deref())
        .or_else(|| non_blank(request.profile.coolant_product.as_deref()))
        .or(fallback.coolant_product);

    let reading = ServiceReading {
        id: None,
        shop,
        machine,
        coolant_product,
        metal: request.metal,
        alloy: non_blank(request.alloy.as_deref()),
        sump_volume_gal: request.sump_volume_gal.unwrap_or(fallback.sump_volume_gal),
        ri_factor: request.ri_factor.unwrap_or(fallback.ri_factor),
        brix: request.brix,
        ph: request.ph,
        notes: request.notes.trim().to_string(),
        service_date: request.service_date,
    };

    let analysis = assess(
        &reading.sample(),
        &request.profile.targets,
        prior.as_ref().map(|p| p.ph),
    );

    Ok(VisitOutcome {
        id: None,
        reading,
        analysis,
        prior,
    })
}

/// Assess the reading and append it to the store.
///
/// Fails with [`CoolantError::MissingIdentity`] before touching the store
/// when the shop or machine is blank.
pub fn log_visit<S: RecordStore + ?Sized>(
    store: &S,
    request: &VisitRequest,
    defaults: &ShopDefaults,
) -> anyhow::Result<VisitOutcome> {
    let mut outcome = preview_visit(store, request, defaults)?;
    let id = store.append(&outcome.reading)?;
    outcome.id = Some(id);
    outcome.reading.id = Some(id);
    log::info!(
        "[Coolant] visit: logged {}/{} as {} ({}% conc, pH {})",
        outcome.reading.shop,
        outcome.reading.machine,
        id,
        outcome.analysis.concentration_pct,
        outcome.reading.ph
    );
    if outcome.analysis.persistent_fault {
        log::warn!(
            "[Coolant] visit: persistent low pH on {}/{}",
            outcome.reading.shop,
            outcome.reading.machine
        );
    }
    Ok(outcome)
}
