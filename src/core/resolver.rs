use crate::core::plan_catalog::PlanCatalog;
use crate::core::rate_area::{agreed_area, distinct_areas, RateAreaIndex};
use crate::domain::model::{Plan, QueryRow, Resolution, ResolvedArea, SlcspResult};
use rust_decimal::Decimal;

pub const SILVER: &str = "Silver";

/// Second-lowest-cost Silver plan lookup over two immutable reference indexes.
///
/// Built once per batch; every query only reads, so a shared `&SlcspResolver`
/// can serve any number of callers.
#[derive(Debug, Clone)]
pub struct SlcspResolver {
    rate_areas: RateAreaIndex,
    catalog: PlanCatalog,
}

impl SlcspResolver {
    pub fn new(rate_areas: RateAreaIndex, catalog: PlanCatalog) -> Self {
        Self {
            rate_areas,
            catalog,
        }
    }

    pub fn rate_areas(&self) -> &RateAreaIndex {
        &self.rate_areas
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// The SLCSP rate for `zipcode`, or `None` when the ZIP is unknown,
    /// ambiguous, or has fewer than two matching Silver plans.
    pub fn resolve(&self, zipcode: &str) -> Option<Decimal> {
        self.explain(zipcode).rate()
    }

    pub fn explain(&self, zipcode: &str) -> Resolution {
        let Some(entries) = self.rate_areas.lookup(zipcode) else {
            return Resolution::UnknownZip;
        };

        let Some(area) = agreed_area(entries) else {
            return Resolution::AmbiguousArea {
                areas: distinct_areas(entries),
            };
        };

        let plans = self.silver_plans_by_rate(&area);
        let candidates = plans.len();

        // Index 1 after sorting: a tie for cheapest yields that same rate again.
        match plans.get(1) {
            Some(second) => Resolution::Rate {
                rate_area: area.rate_area,
                state: area.state,
                rate: second.rate,
                candidates,
            },
            None => Resolution::InsufficientPlans {
                rate_area: area.rate_area,
                state: area.state,
                candidates,
            },
        }
    }

    /// Silver plans for `area`, ascending by rate. Equal rates keep catalog order.
    pub fn silver_plans_by_rate(&self, area: &ResolvedArea) -> Vec<&Plan> {
        let mut plans = self.catalog.query(&area.rate_area, &area.state, SILVER);
        plans.sort_by_key(|plan| plan.rate);
        plans
    }

    /// Resolves every query in input order; duplicates are answered again, not merged.
    pub fn resolve_all(&self, queries: &[QueryRow]) -> Vec<SlcspResult> {
        queries
            .iter()
            .map(|query| {
                let resolution = self.explain(&query.zipcode);
                tracing::debug!(
                    zipcode = %query.zipcode,
                    outcome = resolution.label(),
                    "Resolved ZIP code"
                );
                SlcspResult {
                    zipcode: query.zipcode.clone(),
                    resolution,
                }
            })
            .collect()
    }
}
