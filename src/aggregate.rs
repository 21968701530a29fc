use anyhow::{Context, Result};
use std::cmp::Ordering;
use tracing::info;

use crate::classify::{ColumnFamilies, QUERY_COLUMN, URL_COLUMN};
use crate::dataset::{parse_numeric_cell, Dataset};
use crate::records::QueryRecord;

pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Row-wise sum over a column family. Missing and non-numeric cells count
/// as 0; an empty family sums to 0.
pub fn sum_family(dataset: &Dataset, row: usize, family: &[usize]) -> f64 {
    family
        .iter()
        .map(|&col| parse_numeric_cell(dataset.cell(row, col)).unwrap_or(0.0))
        .sum()
}

/// Row-wise mean over a column family. Non-numeric cells are excluded from
/// the denominator; a row with no numeric cells in the family yields 0.
pub fn safe_mean(dataset: &Dataset, row: usize, family: &[usize], digits: u32) -> f64 {
    let values: Vec<f64> = family
        .iter()
        .filter_map(|&col| parse_numeric_cell(dataset.cell(row, col)))
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    round_to(values.iter().sum::<f64>() / values.len() as f64, digits)
}

/// Click-through rate in percent, one decimal. Zero shows means zero CTR.
pub fn ctr(sum_clicks: f64, sum_shows: f64) -> f64 {
    if sum_shows == 0.0 {
        return 0.0;
    }
    round_to(sum_clicks / sum_shows * 100.0, 1)
}

/// Builds the enriched per-query records: family reductions, word count,
/// full URL and CTR, then sorts by summed demand descending (stable, so
/// equal sums keep their input order).
pub fn enrich_records(
    dataset: &Dataset,
    families: &ColumnFamilies,
    site_url: &str,
) -> Result<Vec<QueryRecord>> {
    let query_col = families
        .query
        .with_context(|| format!("Input report has no '{QUERY_COLUMN}' column"))?;
    let url_col = families
        .url
        .with_context(|| format!("Input report has no '{URL_COLUMN}' column"))?;

    let mut records = Vec::with_capacity(dataset.rows.len());
    for row in 0..dataset.rows.len() {
        let query = dataset.cell(row, query_col).as_text();
        let relative_url = dataset.cell(row, url_col).as_text();

        let sum_demand = sum_family(dataset, row, &families.demand);
        let sum_shows = sum_family(dataset, row, &families.shows);
        let sum_clicks = sum_family(dataset, row, &families.clicks);

        records.push(QueryRecord {
            word_count: query.split_whitespace().count(),
            full_url: format!("{site_url}{relative_url}"),
            avg_position: safe_mean(dataset, row, &families.position, 1),
            avg_demand: safe_mean(dataset, row, &families.demand, 0),
            avg_shows: safe_mean(dataset, row, &families.shows, 0),
            avg_clicks: safe_mean(dataset, row, &families.clicks, 0),
            ctr: ctr(sum_clicks, sum_shows),
            query,
            relative_url,
            sum_demand,
            sum_shows,
            sum_clicks,
        });
    }

    // Sums are never negative under the coerce-or-zero policy; the guard
    // stays as a backstop against a reduction producing a sentinel.
    records.retain(|r| r.sum_demand >= 0.0);
    records.sort_by(|a, b| {
        b.sum_demand
            .partial_cmp(&a.sum_demand)
            .unwrap_or(Ordering::Equal)
    });

    info!(
        action = "complete",
        component = "aggregation",
        record_count = records.len(),
        "Enriched and sorted query records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::detect_column_families;
    use crate::dataset::Cell;

    fn dataset(columns: &[&str], rows: Vec<Vec<Cell>>) -> Dataset {
        Dataset {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn t(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    #[test]
    fn sum_treats_non_numeric_cells_as_zero() {
        let ds = dataset(
            &["jan_demand", "feb_demand"],
            vec![vec![n(10.0), t("oops")]],
        );
        let families = detect_column_families(&ds.columns);
        assert_eq!(sum_family(&ds, 0, &families.demand), 10.0);
    }

    #[test]
    fn safe_mean_excludes_non_numeric_cells_from_denominator() {
        let ds = dataset(
            &["jan_position", "feb_position", "mar_position"],
            vec![vec![n(2.1), Cell::Empty, n(4.1)]],
        );
        let families = detect_column_families(&ds.columns);
        // mean of 2.1 and 4.1 only
        assert_eq!(safe_mean(&ds, 0, &families.position, 1), 3.1);
    }

    #[test]
    fn safe_mean_of_family_with_no_numeric_values_is_zero() {
        let ds = dataset(
            &["jan_position"],
            vec![vec![t("n/a")], vec![Cell::Empty]],
        );
        let families = detect_column_families(&ds.columns);
        assert_eq!(safe_mean(&ds, 0, &families.position, 1), 0.0);
        assert_eq!(safe_mean(&ds, 1, &families.position, 1), 0.0);
        // empty family behaves the same
        assert_eq!(safe_mean(&ds, 0, &families.clicks, 0), 0.0);
    }

    #[test]
    fn ctr_is_zero_exactly_when_shows_are_zero() {
        assert_eq!(ctr(5.0, 0.0), 0.0);
        assert_eq!(ctr(0.0, 0.0), 0.0);
        assert_eq!(ctr(5.0, 100.0), 5.0);
        assert_eq!(ctr(1.0, 3.0), 33.3);
    }

    #[test]
    fn enrichment_computes_projection_and_sorts_by_demand() {
        let ds = dataset(
            &["Query", "Url", "jan_demand", "jan_shows", "jan_clicks", "jan_position"],
            vec![
                vec![t("low"), t("/a"), n(1.0), n(10.0), n(1.0), n(5.0)],
                vec![t("shop shoes"), t("/b"), n(10.0), n(100.0), n(5.0), n(3.2)],
            ],
        );
        let families = detect_column_families(&ds.columns);
        let records = enrich_records(&ds, &families, "https://example.com").unwrap();

        assert_eq!(records.len(), 2);
        let top = &records[0];
        assert_eq!(top.query, "shop shoes");
        assert_eq!(top.word_count, 2);
        assert_eq!(top.full_url, "https://example.com/b");
        assert_eq!(top.sum_demand, 10.0);
        assert_eq!(top.sum_shows, 100.0);
        assert_eq!(top.sum_clicks, 5.0);
        assert_eq!(top.avg_position, 3.2);
        assert_eq!(top.ctr, 5.0);
    }

    #[test]
    fn sort_by_demand_is_stable_for_equal_sums() {
        let ds = dataset(
            &["Query", "Url", "jan_demand"],
            vec![
                vec![t("first"), t("/1"), n(7.0)],
                vec![t("second"), t("/2"), n(7.0)],
                vec![t("third"), t("/3"), n(9.0)],
            ],
        );
        let families = detect_column_families(&ds.columns);
        let records = enrich_records(&ds, &families, "https://example.com").unwrap();
        let order: Vec<&str> = records.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(order, vec!["third", "first", "second"]);
    }

    #[test]
    fn missing_query_column_is_an_error() {
        let ds = dataset(&["Url", "jan_demand"], vec![]);
        let families = detect_column_families(&ds.columns);
        assert!(enrich_records(&ds, &families, "https://example.com").is_err());
    }
}
