use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the ZIP/county reference file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyRow {
    pub zipcode: String,
    pub state: String,
    pub county_code: String,
    pub name: String,
    pub rate_area: String,
}

/// One row of the plan catalog file. `rate` stays textual until the catalog parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    pub plan_id: String,
    pub state: String,
    pub metal_level: String,
    pub rate: String,
    pub rate_area: String,
}

/// A customer ZIP code to resolve. Any other column in the query file is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRow {
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyRateEntry {
    pub rate_area: String,
    pub state: String,
    pub county_code: String,
    pub name: String,
}

impl From<CountyRow> for CountyRateEntry {
    fn from(row: CountyRow) -> Self {
        Self {
            rate_area: row.rate_area,
            state: row.state,
            county_code: row.county_code,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub plan_id: String,
    pub state: String,
    pub metal_level: String,
    pub rate: Decimal,
    pub raw_rate: String,
    pub rate_area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedArea {
    pub rate_area: String,
    pub state: String,
}

impl ResolvedArea {
    pub fn of(entry: &CountyRateEntry) -> Self {
        Self {
            rate_area: entry.rate_area.clone(),
            state: entry.state.clone(),
        }
    }

    pub fn matches(&self, entry: &CountyRateEntry) -> bool {
        self.rate_area == entry.rate_area && self.state == entry.state
    }
}

/// Why a ZIP code did or did not produce a rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Rate {
        rate_area: String,
        state: String,
        rate: Decimal,
        candidates: usize,
    },
    UnknownZip,
    AmbiguousArea {
        areas: Vec<ResolvedArea>,
    },
    InsufficientPlans {
        rate_area: String,
        state: String,
        candidates: usize,
    },
}

impl Resolution {
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            Resolution::Rate { rate, .. } => Some(*rate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Rate { .. } => "rate",
            Resolution::UnknownZip => "unknown_zip",
            Resolution::AmbiguousArea { .. } => "ambiguous_area",
            Resolution::InsufficientPlans { .. } => "insufficient_plans",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlcspResult {
    pub zipcode: String,
    pub resolution: Resolution,
}

impl SlcspResult {
    pub fn rate(&self) -> Option<Decimal> {
        self.resolution.rate()
    }
}

/// Raw rows pulled from the three input files.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub counties: Vec<CountyRow>,
    pub plans: Vec<PlanRow>,
    pub queries: Vec<QueryRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub total: usize,
    pub resolved: usize,
    pub unknown_zip: usize,
    pub ambiguous_area: usize,
    pub insufficient_plans: usize,
}

impl ResolutionSummary {
    pub fn record(&mut self, resolution: &Resolution) {
        self.total += 1;
        match resolution {
            Resolution::Rate { .. } => self.resolved += 1,
            Resolution::UnknownZip => self.unknown_zip += 1,
            Resolution::AmbiguousArea { .. } => self.ambiguous_area += 1,
            Resolution::InsufficientPlans { .. } => self.insufficient_plans += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub results: Vec<SlcspResult>,
    pub summary: ResolutionSummary,
    pub csv_output: String,
}
