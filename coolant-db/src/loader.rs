//! CSV import for populating the database from earlier shop reports.
//!
//! # CSV Format
//!
//! Headers are required and matched by name; see [`crate::models::ImportRow`].
//! The report written by the `export` command loads back unchanged:
//!
//! ```text
//! shop,machine,coolant_product,metal,alloy,sump_volume_gal,ri_factor,brix,concentration_pct,ph,notes,service_date,conc_flag,ph_flag
//! Acme,CNC-01,Coolant A,Stainless,,100,1.0,6.0,6.0,8.0,,2024-01-05,LOW,LOW
//! ```
//!
//! Dates may be `YYYY-MM-DD` or `YYYYMMDD`.

use coolant_core::reading::non_blank;
use coolant_core::{RecordStore, ServiceReading};
use coolant_utils::dates::parse_date_lenient;

use crate::models::ImportRow;
use crate::Database;

impl Database {
    /// Append every valid row of a report CSV, returning how many were loaded.
    ///
    /// Rows without a shop or machine, with an unparseable date, or with
    /// non-numeric readings are skipped. An unknown metal label is kept as
    /// "no metal recorded".
    pub fn load_readings(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let mut count = 0usize;
        let mut skipped = 0usize;
        for result in rdr.deserialize::<ImportRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("[Coolant] loader: skipping row: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            let (Some(shop), Some(machine)) =
                (non_blank(Some(&row.shop)), non_blank(Some(&row.machine)))
            else {
                skipped += 1;
                continue;
            };

            let service_date = match parse_date_lenient(&row.service_date) {
                Ok(date) => date,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let reading = ServiceReading {
                id: None,
                shop,
                machine,
                coolant_product: non_blank(row.coolant_product.as_deref()),
                metal: row.metal.as_deref().and_then(|m| m.parse().ok()),
                alloy: non_blank(row.alloy.as_deref()),
                sump_volume_gal: row.sump_volume_gal,
                ri_factor: row.ri_factor,
                brix: row.brix,
                ph: row.ph,
                notes: row.notes,
                service_date,
            };
            self.append(&reading)?;
            count += 1;
        }
        log::info!(
            "[Coolant] loader: Loaded {} readings, skipped {} invalid",
            count,
            skipped
        );
        Ok(count)
    }
}
