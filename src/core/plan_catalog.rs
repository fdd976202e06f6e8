use crate::domain::model::{Plan, PlanRow};
use crate::utils::error::{Result, SlcspError};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    /// Parses every rate up front so later comparisons are numeric, never lexicographic.
    /// `source` names the plan file in errors.
    pub fn build<I>(source: &str, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = PlanRow>,
    {
        let mut plans = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            // +2: 1-indexed, plus the header row
            let line = idx as u64 + 2;
            let rate = parse_rate(&row.rate).ok_or_else(|| {
                SlcspError::invalid_record(
                    source,
                    line,
                    format!("rate '{}' of plan {} is not a decimal number", row.rate, row.plan_id),
                )
            })?;

            plans.push(Plan {
                plan_id: row.plan_id,
                state: row.state,
                metal_level: row.metal_level,
                rate,
                raw_rate: row.rate,
                rate_area: row.rate_area,
            });
        }

        tracing::debug!("Catalogued {} plans", plans.len());
        Ok(Self { plans })
    }

    /// Plans matching all three fields exactly, in catalog order.
    pub fn query(&self, rate_area: &str, state: &str, metal_level: &str) -> Vec<&Plan> {
        self.plans
            .iter()
            .filter(|plan| {
                plan.rate_area == rate_area && plan.state == state && plan.metal_level == metal_level
            })
            .collect()
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

fn parse_rate(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
