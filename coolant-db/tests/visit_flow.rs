//! End-to-end visit scenarios against the SQLite store.

use chrono::NaiveDate;
use coolant_core::chemistry::{Recommendation, Targets};
use coolant_core::config::ShopDefaults;
use coolant_core::recall::most_recent;
use coolant_core::visit::{log_visit, ShopProfile, VisitRequest};
use coolant_core::{CoolantError, ReadingQuery, RecordStore};
use coolant_db::Database;

fn request(machine: &str, brix: f64, ph: f64, sump: f64, day: u32) -> VisitRequest {
    VisitRequest {
        profile: ShopProfile {
            name: "Acme".to_string(),
            coolant_product: Some("Coolant A".to_string()),
            targets: Targets::default(),
        },
        machine: machine.to_string(),
        machine_coolant: None,
        metal: None,
        alloy: None,
        sump_volume_gal: Some(sump),
        ri_factor: Some(1.0),
        brix,
        ph,
        notes: String::new(),
        service_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
    }
}

#[test]
fn scenario_a_on_target_needs_nothing() {
    let db = Database::new().unwrap();
    let outcome = log_visit(&db, &request("CNC-01", 8.5, 9.0, 100.0, 1), &ShopDefaults::default()).unwrap();
    assert_eq!(outcome.analysis.concentration_pct, 8.5);
    assert!(outcome.analysis.recommendations.is_empty());
}

#[test]
fn scenario_b_recharges_three_gallons() {
    let db = Database::new().unwrap();
    let outcome = log_visit(&db, &request("CNC-01", 6.0, 9.0, 150.0, 1), &ShopDefaults::default()).unwrap();
    assert_eq!(outcome.analysis.concentration_pct, 6.0);
    assert_eq!(
        outcome.analysis.recommendations,
        vec![Recommendation::Recharge { gallons: 3.0 }]
    );
    assert_eq!(outcome.instructions(), vec!["Add 3.0 Gal of Coolant A".to_string()]);
}

#[test]
fn scenario_c_boosts_thirty_two_ounces() {
    let db = Database::new().unwrap();
    let outcome = log_visit(&db, &request("CNC-01", 8.5, 8.0, 200.0, 1), &ShopDefaults::default()).unwrap();
    assert_eq!(
        outcome.analysis.recommendations,
        vec![Recommendation::PhBoost { ounces: 32.0 }]
    );
}

#[test]
fn scenario_d_consecutive_low_ph_is_persistent() {
    let db = Database::new().unwrap();
    let defaults = ShopDefaults::default();

    let first = log_visit(&db, &request("CNC-01", 8.5, 8.0, 100.0, 1), &defaults).unwrap();
    assert!(!first.analysis.persistent_fault, "isolated low pH must not escalate");

    let second = log_visit(&db, &request("CNC-01", 8.5, 8.0, 100.0, 8), &defaults).unwrap();
    assert!(second.analysis.persistent_fault);
    assert_eq!(second.prior.as_ref().and_then(|p| p.id), first.id);
    assert_eq!(
        second.analysis.recommendations.last(),
        Some(&Recommendation::Biocide)
    );
}

#[test]
fn low_ph_after_healthy_visit_is_not_persistent() {
    let db = Database::new().unwrap();
    let defaults = ShopDefaults::default();
    log_visit(&db, &request("CNC-01", 8.5, 9.2, 100.0, 1), &defaults).unwrap();
    let outcome = log_visit(&db, &request("CNC-01", 8.5, 8.0, 100.0, 2), &defaults).unwrap();
    assert!(!outcome.analysis.persistent_fault);
}

#[test]
fn round_trip_keeps_submitted_concentration() {
    let db = Database::new().unwrap();
    let mut req = request("CNC-01", 6.45, 9.0, 100.0, 1);
    req.ri_factor = Some(1.3);
    let outcome = log_visit(&db, &req, &ShopDefaults::default()).unwrap();

    let stored = db
        .query(&ReadingQuery::shop("Acme").machine("CNC-01"))
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, outcome.id);
    assert_eq!(stored[0].concentration_pct(), outcome.analysis.concentration_pct);
    assert_eq!(stored[0], outcome.reading);
}

#[test]
fn missing_machine_saves_nothing() {
    let db = Database::new().unwrap();
    let err = log_visit(&db, &request("   ", 8.5, 9.0, 100.0, 1), &ShopDefaults::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoolantError>(),
        Some(CoolantError::MissingIdentity { .. })
    ));
    assert!(db.distinct_shops().unwrap().is_empty());
}

#[test]
fn recall_prefers_latest_date_then_latest_insert() {
    let db = Database::new().unwrap();
    let defaults = ShopDefaults::default();
    log_visit(&db, &request("CNC-01", 8.5, 9.0, 100.0, 20), &defaults).unwrap();
    log_visit(&db, &request("CNC-01", 8.5, 9.1, 100.0, 5), &defaults).unwrap();
    let tie = log_visit(&db, &request("CNC-01", 8.5, 9.3, 100.0, 20), &defaults).unwrap();

    let latest = most_recent(&db, "Acme", "CNC-01").unwrap().unwrap();
    assert_eq!(latest.id, tie.id);
    assert_eq!(latest.ph, 9.3);
}

#[test]
fn consecutive_low_ph_without_brix_is_not_escalated() {
    let db = Database::new().unwrap();
    let defaults = ShopDefaults::default();
    log_visit(&db, &request("CNC-01", 0.0, 8.0, 100.0, 1), &defaults).unwrap();
    let second = log_visit(&db, &request("CNC-01", 0.0, 8.0, 100.0, 2), &defaults).unwrap();
    assert!(!second.analysis.persistent_fault);
    assert!(second.analysis.recommendations.is_empty());
}

#[test]
fn back_filled_visit_recalls_only_earlier_readings() {
    let db = Database::new().unwrap();
    let defaults = ShopDefaults::default();
    let early = log_visit(&db, &request("CNC-01", 8.5, 9.2, 100.0, 1), &defaults).unwrap();
    log_visit(&db, &request("CNC-01", 8.5, 8.0, 100.0, 20), &defaults).unwrap();

    let back_filled = log_visit(&db, &request("CNC-01", 8.5, 8.0, 100.0, 10), &defaults).unwrap();
    assert_eq!(back_filled.prior.as_ref().and_then(|p| p.id), early.id);
    assert!(!back_filled.analysis.persistent_fault);
    assert_eq!(
        back_filled.analysis.recommendations,
        vec![Recommendation::PhBoost { ounces: 16.0 }]
    );
}
