use std::collections::HashMap;
use tracing::info;

use crate::records::{QueryRecord, WordCount};

/// Whitespace-tokenizes every query and counts occurrences per distinct
/// token (case preserved, no normalization). The result is sorted by count
/// descending; ties keep first-seen order, so the table is deterministic
/// for a given input.
pub fn build_word_frequency(records: &[QueryRecord]) -> Vec<WordCount> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for record in records {
        for word in record.query.split_whitespace() {
            match seen.get(word) {
                Some(&index) => counts[index].count += 1,
                None => {
                    seen.insert(word.to_string(), counts.len());
                    counts.push(WordCount {
                        word: word.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));

    info!(
        action = "complete",
        component = "word_frequency",
        unique_words = counts.len(),
        "Built word frequency table"
    );
    counts
}
