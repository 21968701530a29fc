/// One enriched query row, fields in the order they appear in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    pub query: String,
    pub relative_url: String,
    pub full_url: String,
    pub word_count: usize,
    pub avg_position: f64,
    pub avg_demand: f64,
    pub avg_shows: f64,
    pub sum_shows: f64,
    pub sum_demand: f64,
    pub avg_clicks: f64,
    pub sum_clicks: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug)]
pub struct ProcessedReport {
    pub clean: Vec<QueryRecord>,
    pub filtered: Vec<QueryRecord>,
    pub words: Vec<WordCount>,
}
