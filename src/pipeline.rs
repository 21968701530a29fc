use anyhow::Result;
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

use crate::aggregate::enrich_records;
use crate::classify::{classify_report, detect_column_families, ReportKind, DEMAND_SUFFIX};
use crate::dataset::Dataset;
use crate::filter::{filter_by_allow_list, split_url_queries};
use crate::records::ProcessedReport;
use crate::words::build_word_frequency;

/// Runs the whole report transformation: classify, aggregate, enrich, split
/// URL-like queries, apply the allow-list, build word statistics. The only
/// core-reported error is an unsupported report shape; everything after
/// classification degrades softly instead of aborting.
pub fn process_query_report(
    dataset: &Dataset,
    site_url: &str,
    domain: &str,
    allow_list: Option<&HashSet<String>>,
) -> Result<ProcessedReport> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "pipeline",
        row_count = dataset.rows.len(),
        domain = domain,
        "Starting query report processing"
    );

    if classify_report(&dataset.columns) == ReportKind::Unsupported {
        anyhow::bail!(
            "Unsupported report format: no column ending in '{DEMAND_SUFFIX}' was found"
        );
    }

    let families = detect_column_families(&dataset.columns);
    let records = enrich_records(dataset, &families, site_url)?;
    let (clean, filtered) = split_url_queries(records, domain);
    let clean = filter_by_allow_list(clean, allow_list);
    let words = build_word_frequency(&clean);

    info!(
        action = "complete",
        component = "pipeline",
        clean_count = clean.len(),
        filtered_count = filtered.len(),
        unique_words = words.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Query report processing completed"
    );

    Ok(ProcessedReport {
        clean,
        filtered,
        words,
    })
}
