//! Read-only listings: history, shops, machines, products, defaults.

use coolant_core::config::AppConfig;
use coolant_core::notes::QuickNote;
use coolant_core::recall::machine_defaults;
use coolant_core::{ReadingQuery, RecordStore, ServiceReading};
use coolant_db::Database;
use coolant_utils::dates::format_date;
use log::info;

pub fn history_query(shop: &str, machine: Option<&str>, recent: Option<usize>) -> ReadingQuery {
    let mut query = ReadingQuery::shop(shop);
    if let Some(machine) = machine {
        query = query.machine(machine);
    }
    // "recent entries" are newest first; a full history reads oldest first
    if let Some(n) = recent {
        query = query.descending().limit(n);
    }
    query
}

pub fn format_reading(reading: &ServiceReading) -> String {
    let brix = if reading.brix > 0.0 {
        format!("{:>6}%", reading.concentration_pct())
    } else {
        format!("{:>7}", "-")
    };
    let ph = if reading.ph > 0.0 {
        format!("{:>5}", reading.ph)
    } else {
        format!("{:>5}", "-")
    };
    format!(
        "{}  {:<12} {} pH {}  {:>7} gal  {}",
        format_date(&reading.service_date),
        reading.machine,
        brix,
        ph,
        reading.sump_volume_gal,
        reading.notes
    )
    .trim_end()
    .to_string()
}

pub fn run_history(
    db: &Database,
    shop: &str,
    machine: Option<&str>,
    recent: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let readings = db.query(&history_query(shop, machine, recent))?;
    info!("[Coolant] history: {} readings for {}", readings.len(), shop);
    if json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }
    if readings.is_empty() {
        println!("No readings recorded for {}", shop);
    }
    for reading in &readings {
        println!("{}", format_reading(reading));
    }
    Ok(())
}

pub fn run_shops(db: &Database) -> anyhow::Result<()> {
    for shop in db.distinct_shops()? {
        println!("{}", shop);
    }
    Ok(())
}

pub fn run_machines(db: &Database, shop: &str) -> anyhow::Result<()> {
    for summary in db.query_machine_summaries(shop)? {
        println!(
            "{:<16} {:>4} visits, last {}",
            summary.machine, summary.visits, summary.last_service_date
        );
    }
    Ok(())
}

pub fn run_products(db: &Database) -> anyhow::Result<()> {
    for product in db.distinct_products()? {
        println!("{}", product);
    }
    Ok(())
}

pub fn run_defaults(db: &Database, config: &AppConfig, shop: &str, machine: &str) -> anyhow::Result<()> {
    let defaults = machine_defaults(db, shop, machine, &config.defaults)?;
    let source = if defaults.recalled {
        "last visit"
    } else {
        "shop defaults"
    };
    println!("Sump volume: {} gal", defaults.sump_volume_gal);
    println!("RI factor:   {}", defaults.ri_factor);
    if let Some(product) = &defaults.coolant_product {
        println!("Coolant:     {}", product);
    }
    println!("Source:      {}", source);
    Ok(())
}

pub fn run_quick_notes() -> anyhow::Result<()> {
    for (index, note) in QuickNote::ALL.iter().enumerate() {
        println!("{}  {:<10} {}", index, note.key(), note.phrase());
    }
    Ok(())
}
