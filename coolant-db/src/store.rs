//! [`RecordStore`] implementation backed by the `service_readings` table.

use chrono::NaiveDate;
use coolant_core::{ReadingQuery, RecordStore, ServiceReading, SortOrder};
use coolant_utils::dates::{format_date, ISO_FORMAT};
use rusqlite::types::Type;
use rusqlite::{params, Row};
use std::collections::BTreeSet;

use crate::Database;

pub(crate) const READING_COLUMNS: &str = "id, shop, machine, coolant_product, metal, alloy, \
     sump_volume_gal, ri_factor, brix, ph, notes, service_date";

/// Map a row selected with [`READING_COLUMNS`] to a reading.
pub(crate) fn row_to_reading(row: &Row<'_>) -> rusqlite::Result<ServiceReading> {
    let metal: Option<String> = row.get(4)?;
    let date_str: String = row.get(11)?;
    let service_date = NaiveDate::parse_from_str(&date_str, ISO_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;
    Ok(ServiceReading {
        id: row.get(0)?,
        shop: row.get(1)?,
        machine: row.get(2)?,
        coolant_product: row.get(3)?,
        metal: metal.and_then(|label| match label.parse() {
            Ok(metal) => Some(metal),
            Err(e) => {
                log::warn!("[Coolant] store: ignoring stored metal: {}", e);
                None
            }
        }),
        alloy: row.get(5)?,
        sump_volume_gal: row.get(6)?,
        ri_factor: row.get(7)?,
        brix: row.get(8)?,
        ph: row.get(9)?,
        notes: row.get(10)?,
        service_date,
    })
}

impl Database {
    fn distinct_column(&self, sql: &str, shop: Option<&str>) -> anyhow::Result<BTreeSet<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(sql)?;
        let values = match shop {
            Some(shop) => stmt
                .query_map(params![shop], |row| row.get(0))?
                .collect::<Result<BTreeSet<String>, _>>()?,
            None => stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<BTreeSet<String>, _>>()?,
        };
        Ok(values)
    }
}

impl RecordStore for Database {
    fn append(&self, reading: &ServiceReading) -> anyhow::Result<i64> {
        let conn = self.conn.borrow();
        conn.execute(
            "INSERT INTO service_readings
             (shop, machine, coolant_product, metal, alloy, sump_volume_gal, ri_factor,
              brix, concentration_pct, ph, notes, service_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                reading.shop,
                reading.machine,
                reading.coolant_product,
                reading.metal.map(|m| m.label()),
                reading.alloy,
                reading.sump_volume_gal,
                reading.ri_factor,
                reading.brix,
                reading.concentration_pct(),
                reading.ph,
                reading.notes,
                format_date(&reading.service_date),
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!(
            "[Coolant] store: appended reading {} for {}/{}",
            id,
            reading.shop,
            reading.machine
        );
        Ok(id)
    }

    /// Readings ordered by `service_date` then `id`, in the query's direction.
    fn query(&self, query: &ReadingQuery) -> anyhow::Result<Vec<ServiceReading>> {
        let direction = match query.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        // SQLite treats a negative LIMIT as "no limit".
        let limit: i64 = query
            .limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);
        // ISO dates compare correctly as text
        let on_or_before = query.on_or_before.as_ref().map(format_date);
        let sql = format!(
            "SELECT {READING_COLUMNS} FROM service_readings
             WHERE shop = ?1 AND (?2 IS NULL OR machine = ?2)
               AND (?3 IS NULL OR service_date <= ?3)
             ORDER BY service_date {direction}, id {direction}
             LIMIT ?4"
        );
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![query.shop, query.machine, on_or_before, limit],
                row_to_reading,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "[Coolant] store: query {:?} returned {} records",
            query,
            rows.len()
        );
        Ok(rows)
    }

    fn distinct_shops(&self) -> anyhow::Result<BTreeSet<String>> {
        self.distinct_column("SELECT DISTINCT shop FROM service_readings", None)
    }

    fn distinct_machines(&self, shop: &str) -> anyhow::Result<BTreeSet<String>> {
        self.distinct_column(
            "SELECT DISTINCT machine FROM service_readings WHERE shop = ?1",
            Some(shop),
        )
    }

    fn distinct_products(&self) -> anyhow::Result<BTreeSet<String>> {
        self.distinct_column(
            "SELECT DISTINCT coolant_product FROM service_readings
             WHERE coolant_product IS NOT NULL AND coolant_product != ''",
            None,
        )
    }
}
