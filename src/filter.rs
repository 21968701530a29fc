use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::records::QueryRecord;

// Optional scheme, dot-separated hostname labels, optional path segments.
// Matched as a substring of the query text, case-insensitively.
const URL_SHAPE_PATTERN: &str = r"(?:https?://)?(?:[\w-]+\.)+[\w-]+(?:/[\w-]+)*/?";

struct UrlQueryMatcher {
    url_shape: Regex,
    domain: Regex,
}

impl UrlQueryMatcher {
    fn new(domain: &str) -> Result<Self, regex::Error> {
        let url_shape = RegexBuilder::new(URL_SHAPE_PATTERN)
            .case_insensitive(true)
            .build()?;
        let domain = RegexBuilder::new(&regex::escape(domain))
            .case_insensitive(true)
            .build()?;
        Ok(Self { url_shape, domain })
    }

    fn is_url_like(&self, query: &str) -> bool {
        self.url_shape.is_match(query) || self.domain.is_match(query)
    }
}

/// Splits records into (clean, url_like) partitions. Both partitions keep
/// their relative input order. If the matcher cannot be built the split
/// fails open: every record is treated as clean.
pub fn split_url_queries(
    records: Vec<QueryRecord>,
    domain: &str,
) -> (Vec<QueryRecord>, Vec<QueryRecord>) {
    let matcher = match UrlQueryMatcher::new(domain) {
        Ok(matcher) => matcher,
        Err(e) => {
            warn!(
                action = "fallback",
                component = "url_filter",
                domain = domain,
                error = %e,
                "Query matcher could not be built; keeping all queries as clean"
            );
            return (records, Vec::new());
        }
    };

    let (url_like, clean): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| matcher.is_url_like(&record.query));

    info!(
        action = "complete",
        component = "url_filter",
        clean_count = clean.len(),
        filtered_count = url_like.len(),
        "Separated URL-like queries"
    );
    (clean, url_like)
}

/// Restricts records to those whose full URL appears in the allow-list.
/// No allow-list, or an allow-list that shares no URL with the data, leaves
/// the records unchanged (the latter with a warning, never an empty result).
pub fn filter_by_allow_list(
    records: Vec<QueryRecord>,
    allow_list: Option<&HashSet<String>>,
) -> Vec<QueryRecord> {
    let Some(allow_list) = allow_list else {
        return records;
    };

    let present: HashSet<&str> = records.iter().map(|r| r.full_url.as_str()).collect();
    if !allow_list.iter().any(|url| present.contains(url.as_str())) {
        warn!(
            action = "fallback",
            component = "allow_list",
            "No allow-list URL was found in the report data; keeping all queries"
        );
        return records;
    }

    let total = records.len();
    let kept: Vec<QueryRecord> = records
        .into_iter()
        .filter(|record| allow_list.contains(&record.full_url))
        .collect();

    info!(
        action = "complete",
        component = "allow_list",
        kept = kept.len(),
        total = total,
        "Applied allow-list filter"
    );
    kept
}
