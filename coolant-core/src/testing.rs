//! In-memory [`RecordStore`] used by this crate's unit tests.

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::reading::ServiceReading;
use crate::store::{ReadingQuery, RecordStore, SortOrder};

#[derive(Default)]
pub struct VecStore {
    rows: RefCell<Vec<ServiceReading>>,
}

impl VecStore {
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl RecordStore for VecStore {
    fn append(&self, reading: &ServiceReading) -> anyhow::Result<i64> {
        let mut rows = self.rows.borrow_mut();
        let id = rows.len() as i64 + 1;
        let mut stored = reading.clone();
        stored.id = Some(id);
        rows.push(stored);
        Ok(id)
    }

    fn query(&self, query: &ReadingQuery) -> anyhow::Result<Vec<ServiceReading>> {
        let mut rows: Vec<ServiceReading> = self
            .rows
            .borrow()
            .iter()
            .filter(|r| r.shop == query.shop)
            .filter(|r| query.machine.as_ref().map_or(true, |m| &r.machine == m))
            .filter(|r| query.on_or_before.map_or(true, |d| r.service_date <= d))
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.service_date, r.id));
        if query.order == SortOrder::Descending {
            rows.reverse();
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn distinct_shops(&self) -> anyhow::Result<BTreeSet<String>> {
        Ok(self.rows.borrow().iter().map(|r| r.shop.clone()).collect())
    }

    fn distinct_machines(&self, shop: &str) -> anyhow::Result<BTreeSet<String>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|r| r.shop == shop)
            .map(|r| r.machine.clone())
            .collect())
    }

    fn distinct_products(&self) -> anyhow::Result<BTreeSet<String>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter_map(|r| r.coolant_product.clone())
            .collect())
    }
}
