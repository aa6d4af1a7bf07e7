//! Typed query methods for reports and charts.
//!
//! All queries return typed structs from [`crate::models`].

use coolant_core::chemistry::Targets;
use coolant_core::{ReadingQuery, RecordStore};
use rusqlite::params;

use crate::models::{MachineSummary, ReportRow, TrendPoint};
use crate::Database;

impl Database {
    /// Concentration and pH history of one machine, oldest first.
    pub fn query_trend(&self, shop: &str, machine: &str) -> anyhow::Result<Vec<TrendPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT service_date, concentration_pct, ph FROM service_readings
             WHERE shop = ?1 AND machine = ?2
             ORDER BY service_date, id",
        )?;
        let rows = stmt
            .query_map(params![shop, machine], |row| {
                Ok(TrendPoint {
                    date: row.get(0)?,
                    concentration_pct: row.get(1)?,
                    ph: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[Coolant] query: query_trend returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Visit count and latest visit date per machine of a shop, by machine name.
    pub fn query_machine_summaries(&self, shop: &str) -> anyhow::Result<Vec<MachineSummary>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT machine, COUNT(*), MAX(service_date) FROM service_readings
             WHERE shop = ?1
             GROUP BY machine
             ORDER BY machine",
        )?;
        let rows = stmt
            .query_map(params![shop], |row| {
                Ok(MachineSummary {
                    machine: row.get(0)?,
                    visits: row.get(1)?,
                    last_service_date: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[Coolant] query: query_machine_summaries returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// All readings of a shop as flagged report rows, oldest first.
    pub fn query_shop_report(&self, shop: &str, targets: &Targets) -> anyhow::Result<Vec<ReportRow>> {
        let rows: Vec<ReportRow> = self
            .query(&ReadingQuery::shop(shop))?
            .iter()
            .map(|r| ReportRow::from_reading(r, targets))
            .collect();
        log::info!(
            "[Coolant] query: query_shop_report returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}
