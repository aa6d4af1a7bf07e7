//! SQLite record store for coolant service readings.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability; the tool is
//!   single-threaded and every command is one request/response pass
//! - On-disk SQLite file for the shop log, in-memory SQLite for tests
//! - [`coolant_core::RecordStore`] implemented on [`Database`], so the visit
//!   flow in `coolant-core` runs unchanged against it
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use coolant_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_readings(
//!     "shop,machine,coolant_product,metal,alloy,sump_volume_gal,ri_factor,brix,concentration_pct,ph,notes,service_date,conc_flag,ph_flag\n\
//!      Acme,CNC-01,Coolant A,Stainless,,100,1.0,8.5,8.5,9.1,,2024-01-05,OK,OK\n",
//! ).unwrap();
//! let trend = db.query_trend("Acme", "CNC-01").unwrap();
//! assert_eq!(trend.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `service_readings` - append-only log of technician visits

pub mod schema;
mod loader;
mod queries;
mod store;
pub mod models;

use anyhow::Context;
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// SQLite database holding the service reading log.
///
/// This struct is cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_schema(conn)
    }

    /// Open (or create) the database file at `path` and apply the schema.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        log::info!("[Coolant] db: opened {}", path.display());
        Self::with_schema(conn)
    }

    fn with_schema(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
