use crate::adapters::csv_records::{parse_rows, render_results};
use crate::core::plan_catalog::PlanCatalog;
use crate::core::rate_area::RateAreaIndex;
use crate::core::resolver::SlcspResolver;
use crate::core::{ConfigProvider, Dataset, Pipeline, Storage, TransformResult};
use crate::domain::model::{ResolutionSummary, SlcspResult};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

pub const OUTPUT_CSV: &str = "slcsp.csv";
pub const OUTPUT_REPORT: &str = "slcsp_report.json";

#[derive(Debug, Serialize)]
pub struct SlcspReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a ResolutionSummary,
    pub results: &'a [SlcspResult],
}

/// Reads the three reference CSVs, resolves every query ZIP and writes the answers.
pub struct SlcspPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SlcspPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SlcspPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        tracing::debug!("Reading ZIP/rate-area file: {}", self.config.zips_file());
        let zips = self.storage.read_file(self.config.zips_file()).await?;
        tracing::debug!("Reading plan file: {}", self.config.plans_file());
        let plans = self.storage.read_file(self.config.plans_file()).await?;
        tracing::debug!("Reading query file: {}", self.config.queries_file());
        let queries = self.storage.read_file(self.config.queries_file()).await?;

        Ok(Dataset {
            counties: parse_rows(self.config.zips_file(), &zips)?,
            plans: parse_rows(self.config.plans_file(), &plans)?,
            queries: parse_rows(self.config.queries_file(), &queries)?,
        })
    }

    async fn transform(&self, data: Dataset) -> Result<TransformResult> {
        let Dataset {
            counties,
            plans,
            queries,
        } = data;

        // Both indexes are complete before the first query runs.
        let catalog = PlanCatalog::build(self.config.plans_file(), plans)?;
        let resolver = SlcspResolver::new(RateAreaIndex::build(counties), catalog);
        tracing::info!(
            "Reference data ready: {} ZIP codes, {} plans",
            resolver.rate_areas().len(),
            resolver.catalog().len()
        );

        let results = resolver.resolve_all(&queries);

        let mut summary = ResolutionSummary::default();
        for result in &results {
            summary.record(&result.resolution);
        }
        tracing::info!(
            "Resolved {}/{} ZIP codes ({} unknown, {} ambiguous, {} with fewer than two Silver plans)",
            summary.resolved,
            summary.total,
            summary.unknown_zip,
            summary.ambiguous_area,
            summary.insufficient_plans
        );

        let csv_output = render_results(&results)?;

        Ok(TransformResult {
            results,
            summary,
            csv_output,
        })
    }

    /// Returns the CSV path, or the report path when only `json` was requested.
    async fn load(&self, result: TransformResult) -> Result<String> {
        let csv_path = self.output_file(OUTPUT_CSV);
        let mut primary_output = csv_path.clone();

        if self.config.wants_format("csv") {
            tracing::debug!("Writing {} bytes to {}", result.csv_output.len(), csv_path);
            self.storage
                .write_file(&csv_path, result.csv_output.as_bytes())
                .await?;
        }

        if self.config.wants_format("json") {
            let report = SlcspReport {
                generated_at: Utc::now(),
                summary: &result.summary,
                results: &result.results,
            };
            let json_data = serde_json::to_string_pretty(&report)?;
            let report_path = self.output_file(OUTPUT_REPORT);
            tracing::debug!("Writing report to {}", report_path);
            self.storage
                .write_file(&report_path, json_data.as_bytes())
                .await?;
            if !self.config.wants_format("csv") {
                primary_output = report_path;
            }
        }

        if self.config.print_to_stdout() {
            print!("{}", result.csv_output);
        }

        Ok(primary_output)
    }
}
