use crate::domain::model::SlcspResult;
use crate::utils::error::{Result, SlcspError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::DeserializeOwned;

pub const OUTPUT_HEADER: [&str; 2] = ["zipcode", "rate"];

/// Deserializes header-keyed rows; column order is free and unknown columns are ignored.
/// Rows may be shorter than the header as long as the fields `T` needs are present.
pub fn parse_rows<T: DeserializeOwned>(source: &str, data: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| {
            let line = e.position().map(|pos| pos.line());
            match line {
                Some(line) => SlcspError::invalid_record(source, line, e.to_string()),
                None => SlcspError::CsvError(e),
            }
        })?;
        rows.push(row);
    }

    tracing::debug!("Parsed {} rows from {}", rows.len(), source);
    Ok(rows)
}

/// Money formatting: two places, halves rounded away from zero.
pub fn format_rate(rate: Decimal) -> String {
    let rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

pub fn render_results(results: &[SlcspResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADER)?;

    for result in results {
        let rate = result.rate().map(format_rate).unwrap_or_default();
        writer.write_record([result.zipcode.as_str(), rate.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SlcspError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e.error()),
        })?;

    String::from_utf8(bytes).map_err(|e| SlcspError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CountyRow, PlanRow, QueryRow, Resolution};

    #[test]
    fn test_parse_rows_any_column_order() {
        let data = b"state,zipcode,rate_area,name,county_code\nAL,36749,11,Autauga,01001\n";
        let rows: Vec<CountyRow> = parse_rows("zips", data).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zipcode, "36749");
        assert_eq!(rows[0].rate_area, "11");
        assert_eq!(rows[0].county_code, "01001");
    }

    #[test]
    fn test_parse_rows_keeps_leading_zeros_and_ignores_extra_columns() {
        let data = b"zipcode,rate\n07055,\n 02138 ,\n";
        let rows: Vec<QueryRow> = parse_rows("slcsp", data).unwrap();

        let zips: Vec<&str> = rows.iter().map(|r| r.zipcode.as_str()).collect();
        assert_eq!(zips, vec!["07055", "02138"]);
    }

    #[test]
    fn test_parse_rows_accepts_ragged_query_rows() {
        let data = b"zipcode,rate\n64148,\n67118\n40813,\n";
        let rows: Vec<QueryRow> = parse_rows("slcsp.csv", data).unwrap();

        let zips: Vec<&str> = rows.iter().map(|r| r.zipcode.as_str()).collect();
        assert_eq!(zips, vec!["64148", "67118", "40813"]);
    }

    #[test]
    fn test_parse_rows_short_row_missing_needed_field_is_invalid_record() {
        let data = b"zipcode,state,county_code,name,rate_area\n36749,AL,01001,Autauga,11\n36703,AL\n";
        let err = parse_rows::<CountyRow>("zips.csv", data).unwrap_err();

        match err {
            SlcspError::InvalidRecordError { file, line, .. } => {
                assert_eq!(file, "zips.csv");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rows_missing_column_is_invalid_record() {
        let data = b"plan_id,state,metal_level,rate\n74449NR9870320,GA,Silver,298.62\n";
        let err = parse_rows::<PlanRow>("plans", data).unwrap_err();

        assert!(matches!(err, SlcspError::InvalidRecordError { .. }));
    }

    #[test]
    fn test_format_rate_two_places() {
        assert_eq!(format_rate("245.2".parse().unwrap()), "245.20");
        assert_eq!(format_rate("200".parse().unwrap()), "200.00");
        assert_eq!(format_rate("290.005".parse().unwrap()), "290.01");
        assert_eq!(format_rate("234.6049".parse().unwrap()), "234.60");
    }

    #[test]
    fn test_render_results_blank_for_absent() {
        let results = vec![
            SlcspResult {
                zipcode: "64148".to_string(),
                resolution: Resolution::Rate {
                    rate_area: "3".to_string(),
                    state: "MO".to_string(),
                    rate: "245.2".parse().unwrap(),
                    candidates: 4,
                },
            },
            SlcspResult {
                zipcode: "67118".to_string(),
                resolution: Resolution::UnknownZip,
            },
        ];

        let csv = render_results(&results).unwrap();
        assert_eq!(csv, "zipcode,rate\n64148,245.20\n67118,\n");
    }
}
