//! Persistence contract for service readings.
//!
//! The store is an append-only log. Readings are never updated or deleted.
//! Implementations must order results by service date and then by insertion
//! identifier, in the direction requested by [`SortOrder`].

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::reading::ServiceReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first, for trend display.
    #[default]
    Ascending,
    /// Newest first, for "recent entries" views and recall.
    Descending,
}

/// Selection of readings for one shop, optionally one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingQuery {
    pub shop: String,
    pub machine: Option<String>,
    /// Only readings serviced on or before this date.
    pub on_or_before: Option<NaiveDate>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl ReadingQuery {
    pub fn shop(shop: &str) -> Self {
        Self {
            shop: shop.to_string(),
            machine: None,
            on_or_before: None,
            order: SortOrder::Ascending,
            limit: None,
        }
    }

    pub fn machine(mut self, machine: &str) -> Self {
        self.machine = Some(machine.to_string());
        self
    }

    pub fn on_or_before(mut self, date: NaiveDate) -> Self {
        self.on_or_before = Some(date);
        self
    }

    pub fn descending(mut self) -> Self {
        self.order = SortOrder::Descending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub trait RecordStore {
    /// Persist a reading, returning its insertion identifier.
    fn append(&self, reading: &ServiceReading) -> anyhow::Result<i64>;

    fn query(&self, query: &ReadingQuery) -> anyhow::Result<Vec<ServiceReading>>;

    fn distinct_shops(&self) -> anyhow::Result<BTreeSet<String>>;

    fn distinct_machines(&self, shop: &str) -> anyhow::Result<BTreeSet<String>>;

    fn distinct_products(&self) -> anyhow::Result<BTreeSet<String>>;
}
