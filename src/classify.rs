use tracing::info;

pub const DEMAND_SUFFIX: &str = "_demand";
pub const SHOWS_SUFFIX: &str = "_shows";
pub const POSITION_SUFFIX: &str = "_position";
pub const CLICKS_SUFFIX: &str = "_clicks";

pub const QUERY_COLUMN: &str = "Query";
pub const URL_COLUMN: &str = "Url";

/// Report shapes this tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Per-query report with at least one `_demand` period column.
    QueryDemand,
    Unsupported,
}

pub fn classify_report(columns: &[String]) -> ReportKind {
    if columns.iter().any(|c| c.ends_with(DEMAND_SUFFIX)) {
        ReportKind::QueryDemand
    } else {
        ReportKind::Unsupported
    }
}

/// Column indices grouped by metric suffix, detected once and handed to every
/// downstream stage. Columns matching no family pass through untouched.
#[derive(Debug, Clone, Default)]
pub struct ColumnFamilies {
    pub demand: Vec<usize>,
    pub shows: Vec<usize>,
    pub position: Vec<usize>,
    pub clicks: Vec<usize>,
    pub query: Option<usize>,
    pub url: Option<usize>,
}

pub fn detect_column_families(columns: &[String]) -> ColumnFamilies {
    let mut families = ColumnFamilies::default();

    for (index, name) in columns.iter().enumerate() {
        if name.ends_with(DEMAND_SUFFIX) {
            families.demand.push(index);
        } else if name.ends_with(SHOWS_SUFFIX) {
            families.shows.push(index);
        } else if name.ends_with(POSITION_SUFFIX) {
            families.position.push(index);
        } else if name.ends_with(CLICKS_SUFFIX) {
            families.clicks.push(index);
        } else if name == QUERY_COLUMN {
            families.query = Some(index);
        } else if name == URL_COLUMN {
            families.url = Some(index);
        }
    }

    info!(
        action = "detect",
        component = "column_families",
        demand_columns = families.demand.len(),
        shows_columns = families.shows.len(),
        position_columns = families.position.len(),
        clicks_columns = families.clicks.len(),
        "Detected metric column families"
    );
    families
}
