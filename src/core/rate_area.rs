use crate::domain::model::{CountyRateEntry, CountyRow, ResolvedArea};
use std::collections::HashMap;

/// ZIP code to every county/rate-area association seen for it, in input order.
#[derive(Debug, Clone, Default)]
pub struct RateAreaIndex {
    entries: HashMap<String, Vec<CountyRateEntry>>,
}

impl RateAreaIndex {
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CountyRow>,
    {
        let mut entries: HashMap<String, Vec<CountyRateEntry>> = HashMap::new();
        for row in rows {
            let zipcode = row.zipcode.clone();
            entries.entry(zipcode).or_default().push(row.into());
        }

        tracing::debug!("Indexed {} distinct ZIP codes", entries.len());
        Self { entries }
    }

    pub fn lookup(&self, zipcode: &str) -> Option<&[CountyRateEntry]> {
        self.entries.get(zipcode).map(Vec::as_slice)
    }

    /// The single (rate area, state) every entry of `zipcode` agrees on, if any.
    pub fn resolve_area(&self, zipcode: &str) -> Option<ResolvedArea> {
        self.lookup(zipcode).and_then(agreed_area)
    }

    /// Distinct (rate area, state) pairs for `zipcode`, first-seen order.
    pub fn distinct_areas(&self, zipcode: &str) -> Vec<ResolvedArea> {
        self.lookup(zipcode).map(distinct_areas).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stops at the first entry that disagrees with the first one.
pub fn agreed_area(entries: &[CountyRateEntry]) -> Option<ResolvedArea> {
    let (first, rest) = entries.split_first()?;
    let area = ResolvedArea::of(first);
    rest.iter().all(|entry| area.matches(entry)).then_some(area)
}

pub fn distinct_areas(entries: &[CountyRateEntry]) -> Vec<ResolvedArea> {
    let mut areas: Vec<ResolvedArea> = Vec::new();
    for entry in entries {
        if !areas.iter().any(|area| area.matches(entry)) {
            areas.push(ResolvedArea::of(entry));
        }
    }
    areas
}
