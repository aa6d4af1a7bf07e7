//! Shop report export and import.

use anyhow::Context;
use coolant_core::chemistry::Targets;
use coolant_db::models::ReportRow;
use coolant_db::Database;
use log::info;
use std::path::Path;

/// Write `rows` as a headered CSV file.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn run_export(db: &Database, shop: &str, output: &Path, targets: &Targets) -> anyhow::Result<()> {
    let rows = db.query_shop_report(shop, targets)?;
    if rows.is_empty() {
        anyhow::bail!("no readings recorded for shop {}", shop);
    }
    write_report(output, &rows)?;
    info!(
        "[Coolant] export: wrote {} rows for {} to {}",
        rows.len(),
        shop,
        output.display()
    );
    println!("Exported {} readings to {}", rows.len(), output.display());
    Ok(())
}

pub fn run_import(db: &Database, input: &Path) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let count = db.load_readings(&data)?;
    println!("Imported {} readings from {}", count, input.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use coolant_core::{ReadingQuery, RecordStore, ServiceReading};

    fn reading(machine: &str, day: u32, brix: f64, ph: f64) -> ServiceReading {
        ServiceReading {
            id: None,
            shop: "Acme".to_string(),
            machine: machine.to_string(),
            coolant_product: Some("Coolant A".to_string()),
            metal: None,
            alloy: Some("6061-T6".to_string()),
            sump_volume_gal: 120.0,
            ri_factor: 1.2,
            brix,
            ph,
            notes: "Added pH Boost.".to_string(),
            service_date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
        }
    }

    #[test]
    fn export_flags_low_values() {
        let db = Database::new().unwrap();
        db.append(&reading("CNC-01", 1, 5.0, 8.0)).unwrap();
        db.append(&reading("CNC-01", 2, 7.0, 9.2)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.csv");
        run_export(&db, "Acme", &path, &Targets::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("shop,machine,coolant_product"));
        assert!(header.ends_with("conc_flag,ph_flag"));
        assert!(lines.next().unwrap().ends_with("LOW,LOW"));
        assert!(lines.next().unwrap().ends_with("OK,OK"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn export_of_unknown_shop_fails() {
        let db = Database::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.csv");
        assert!(run_export(&db, "Nobody", &path, &Targets::default()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn exported_report_imports_into_a_fresh_database() {
        let source = Database::new().unwrap();
        source.append(&reading("CNC-01", 1, 5.0, 8.0)).unwrap();
        source.append(&reading("CNC-02", 3, 7.5, 0.0)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.csv");
        run_export(&source, "Acme", &path, &Targets::default()).unwrap();

        let target = Database::new().unwrap();
        run_import(&target, &path).unwrap();

        let original = source.query(&ReadingQuery::shop("Acme")).unwrap();
        let imported = target.query(&ReadingQuery::shop("Acme")).unwrap();
        assert_eq!(imported.len(), 2);
        for (a, b) in original.iter().zip(&imported) {
            assert_eq!(a.machine, b.machine);
            assert_eq!(a.alloy, b.alloy);
            assert_eq!(a.notes, b.notes);
            assert_eq!(a.concentration_pct(), b.concentration_pct());
            assert_eq!(a.service_date, b.service_date);
        }
    }
}
