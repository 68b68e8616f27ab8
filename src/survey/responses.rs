// Free-text answers: lists typed by the participants.

use card_sorting::{column_label, Tally};
use regex::Regex;

pub const TOP_RESPONSES: usize = 10;

/// The summary of one free-text question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseSummary {
    pub question: String,
    pub column: String,
    /// All the items, in order of appearance.
    pub items: Vec<String>,
    pub counts: Tally<String>,
}

impl ResponseSummary {
    pub fn top(&self) -> Vec<(String, u64)> {
        self.counts.top(TOP_RESPONSES)
    }

    pub fn unique_items(&self) -> usize {
        self.counts.len()
    }
}

/// Splits an answer into items: one per line, then one per comma or semicolon,
/// without a leading or trailing "and" / "&".
pub struct ResponseParser {
    lines: Regex,
    separators: Regex,
    leading_and: Regex,
    trailing_and: Regex,
}

impl ResponseParser {
    pub fn new() -> Result<ResponseParser, regex::Error> {
        Ok(ResponseParser {
            lines: Regex::new(r"\n+")?,
            separators: Regex::new(r"[,;]")?,
            leading_and: Regex::new(r"(?i)^\s*(and|&)\s+")?,
            trailing_and: Regex::new(r"(?i)\s+(and|&)\s*$")?,
        })
    }

    pub fn parse(&self, text: &str) -> Vec<String> {
        let mut res: Vec<String> = Vec::new();
        for line in self.lines.split(text.trim()) {
            for item in self.separators.split(line) {
                let item = self.leading_and.replace(item, "");
                let item = self.trailing_and.replace(&item, "");
                let item = item.trim();
                // Single characters are noise.
                if item.chars().count() > 1 {
                    res.push(item.to_string());
                }
            }
        }
        res
    }

    pub fn summarize(&self, question: &str, column: usize, cells: &[&str]) -> ResponseSummary {
        let items: Vec<String> = cells.iter().flat_map(|c| self.parse(c)).collect();
        let mut counts: Tally<String> = Tally::new();
        for i in items.iter() {
            counts.add(i.clone());
        }
        ResponseSummary {
            question: question.to_string(),
            column: column_label(column),
            items,
            counts,
        }
    }
}
