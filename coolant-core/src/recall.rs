//! History recall: the latest prior reading for a shop and machine.

use chrono::NaiveDate;

use crate::config::ShopDefaults;
use crate::reading::ServiceReading;
use crate::store::{ReadingQuery, RecordStore};

/// Most recent reading for `(shop, machine)`: latest service date, and the
/// latest insertion among readings on that date.
pub fn most_recent<S: RecordStore + ?Sized>(
    store: &S,
    shop: &str,
    machine: &str,
) -> anyhow::Result<Option<ServiceReading>> {
    latest_matching(store, ReadingQuery::shop(shop).machine(machine))
}

/// Most recent reading for `(shop, machine)` serviced on or before `date`.
///
/// A back-dated visit recalls what preceded it, not readings taken later.
pub fn most_recent_on_or_before<S: RecordStore + ?Sized>(
    store: &S,
    shop: &str,
    machine: &str,
    date: NaiveDate,
) -> anyhow::Result<Option<ServiceReading>> {
    latest_matching(
        store,
        ReadingQuery::shop(shop).machine(machine).on_or_before(date),
    )
}

fn latest_matching<S: RecordStore + ?Sized>(
    store: &S,
    query: ReadingQuery,
) -> anyhow::Result<Option<ServiceReading>> {
    let query = query.descending().limit(1);
    let latest = store.query(&query)?.into_iter().next();
    log::debug!(
        "[Coolant] recall: {}/{} -> {:?}",
        query.shop,
        query.machine.as_deref().unwrap_or(""),
        latest.as_ref().and_then(|r| r.id)
    );
    Ok(latest)
}

/// Pre-filled inputs for the next visit to a machine.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefaults {
    pub sump_volume_gal: f64,
    pub ri_factor: f64,
    pub coolant_product: Option<String>,
    /// Whether the values came from a previous reading.
    pub recalled: bool,
}

impl MachineDefaults {
    pub fn from_prior(prior: Option<&ServiceReading>, defaults: &ShopDefaults) -> Self {
        match prior {
            Some(reading) => Self {
                sump_volume_gal: reading.sump_volume_gal,
                ri_factor: reading.ri_factor,
                coolant_product: reading.coolant_product.clone(),
                recalled: true,
            },
            None => Self {
                sump_volume_gal: defaults.sump_volume_gal,
                ri_factor: defaults.ri_factor,
                coolant_product: Some(defaults.coolant_product.clone()),
                recalled: false,
            },
        }
    }
}

/// Defaults for a machine, from its last reading or the shop defaults.
pub fn machine_defaults<S: RecordStore + ?Sized>(
    store: &S,
    shop: &str,
    machine: &str,
    defaults: &ShopDefaults,
) -> anyhow::Result<MachineDefaults> {
    let prior = most_recent(store, shop, machine)?;
    Ok(MachineDefaults::from_prior(prior.as_ref(), defaults))
}
