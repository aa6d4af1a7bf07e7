//! SQL schema definitions for the service reading database.
//!
//! The schema is applied as a single batch each time a database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// Creates the `service_readings` table plus its indexes. The table is
/// append-only: triggers abort any `UPDATE` or `DELETE`.
///
/// `concentration_pct` is written alongside its inputs for reporting
/// consumers, always equal to `round(brix * ri_factor, 2)`.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS service_readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        shop TEXT NOT NULL,
        machine TEXT NOT NULL,
        coolant_product TEXT,
        metal TEXT,
        alloy TEXT,
        sump_volume_gal REAL NOT NULL,
        ri_factor REAL NOT NULL,
        brix REAL NOT NULL,
        concentration_pct REAL NOT NULL,
        ph REAL NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        service_date TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_readings_shop_machine
        ON service_readings(shop, machine, service_date, id);
    CREATE INDEX IF NOT EXISTS idx_readings_product ON service_readings(coolant_product);

    CREATE TRIGGER IF NOT EXISTS trg_readings_no_update
        BEFORE UPDATE ON service_readings
    BEGIN
        SELECT RAISE(ABORT, 'service_readings is append-only');
    END;

    CREATE TRIGGER IF NOT EXISTS trg_readings_no_delete
        BEFORE DELETE ON service_readings
    BEGIN
        SELECT RAISE(ABORT, 'service_readings is append-only');
    END;
    "#
}
