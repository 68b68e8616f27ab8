// Text and JSON reports.

use std::fmt::Write;
use std::fs;

use card_sorting::*;
use log::info;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::survey::responses::{ResponseSummary, TOP_RESPONSES};
use crate::survey::*;

pub const TOP_PAIRS: usize = 30;
pub const TOP_CONSOLE: usize = 5;

const RULE_WIDTH: usize = 80;

pub fn write_report(path: &str, contents: &str) -> SurveyResult<()> {
    info!("Writing report to {:?}", path);
    fs::write(path, contents).context(WritingReportSnafu { path })
}

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// The groups of every participant, one line per group and per element.
pub fn format_card_sort(population: &Population) -> String {
    let mut s = String::new();
    for p in population.participants() {
        // Writing to a String cannot fail.
        let _ = writeln!(s, "Participant {}:", p.id);
        for g in p.groups.iter() {
            let _ = writeln!(s, "    - Group {}: {}", g.number, g.name);
            for e in g.elements.iter() {
                let _ = writeln!(s, "        - {}", e);
            }
        }
        s.push('\n');
    }
    s
}

fn section(s: &mut String, title: &str, subtitle: Option<&str>) {
    let _ = writeln!(s, "{}", rule());
    let _ = writeln!(s, "{}", title);
    if let Some(sub) = subtitle {
        let _ = writeln!(s, "{}", sub);
    }
    let _ = writeln!(s, "{}\n", rule());
}

/// The four analyses, as text.
pub fn format_groupings(analysis: &GroupingAnalysis) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", heavy_rule());
    let _ = writeln!(s, "CARD SORT GROUPINGS ANALYSIS");
    let _ = writeln!(s, "{}\n", heavy_rule());

    section(&mut s, "1. MOST POPULAR GROUP NAMES", None);
    if analysis.group_names.is_empty() {
        let _ = writeln!(s, "  (No group names found)");
    }
    for (name, count) in analysis.group_names.most_common() {
        let _ = writeln!(s, "  {}: {} occurrence(s)", name, count);
    }
    s.push_str("\n\n");

    section(&mut s, "2. TOP CO-OCCURRING ELEMENT PAIRS", None);
    if analysis.element_pairs.is_empty() {
        let _ = writeln!(s, "  (No pairs found)");
    }
    for (pair, count) in analysis.element_pairs.top(TOP_PAIRS) {
        let _ = writeln!(s, "  {}: {} occurrence(s)", pair, count);
    }
    s.push_str("\n\n");

    section(
        &mut s,
        "3. ELEMENT FREQUENCY (How often each element appears in groups)",
        None,
    );
    if analysis.element_frequency.is_empty() {
        let _ = writeln!(s, "  (No elements found)");
    }
    for (element, count) in analysis.element_frequency.most_common() {
        let _ = writeln!(s, "  {}: {} occurrence(s)", element, count);
    }
    s.push_str("\n\n");

    section(
        &mut s,
        "4. ELEMENT-TO-ELEMENT RELATIONSHIPS",
        Some("(For each element, shows top 5 most commonly co-occurring elements)"),
    );
    let ranked = analysis
        .relationships
        .ranked(&analysis.element_frequency, ElementRelationships::DEFAULT_TOP);
    if ranked.is_empty() {
        let _ = writeln!(s, "  (No relationships found)");
    }
    for (element, related) in ranked {
        let _ = writeln!(s, "  {}:", element);
        for (other, count) in related {
            let _ = writeln!(s, "    - {}: {} time(s) together", other, count);
        }
        s.push('\n');
    }
    s
}

pub fn format_response_summary(summaries: &[ResponseSummary]) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", heavy_rule());
    let _ = writeln!(s, "SURVEY DATA SUMMARY");
    let _ = writeln!(s, "{}\n", heavy_rule());
    for summary in summaries {
        let _ = writeln!(s, "{}", rule());
        let _ = writeln!(s, "QUESTION: {}", summary.question);
        let _ = writeln!(s, "COLUMN: {}", summary.column);
        let _ = writeln!(s, "{}\n", rule());

        let _ = writeln!(s, "ALL RESPONSES:");
        let _ = writeln!(s, "{}", rule());
        if summary.items.is_empty() {
            let _ = writeln!(s, "  (No responses found)");
        }
        for item in summary.items.iter() {
            let _ = writeln!(s, "  - {}", item);
        }
        s.push('\n');

        let _ = writeln!(s, "TOP {} MOST COMMONLY LISTED ITEMS:", TOP_RESPONSES);
        let _ = writeln!(s, "{}", rule());
        let top = summary.top();
        if top.is_empty() {
            let _ = writeln!(s, "  (No items found)");
        }
        for (idx, (item, count)) in top.iter().enumerate() {
            let plural = if *count != 1 { "s" } else { "" };
            let _ = writeln!(
                s,
                "  {}. {} (mentioned {} time{})",
                idx + 1,
                item,
                count,
                plural
            );
        }
        s.push_str("\n\n");
    }
    s
}

pub fn print_response_summary(summaries: &[ResponseSummary]) {
    for summary in summaries {
        println!("\n{} (Column {}):", summary.question, summary.column);
        println!("  Total items found: {}", summary.items.len());
        println!("  Unique items: {}", summary.unique_items());
        let top = summary.top();
        if !top.is_empty() {
            println!("  Top 3:");
            for (item, count) in top.iter().take(3) {
                println!("    - {}: {}", item, count);
            }
        }
    }
}

pub fn print_console_summary(population: &Population, analysis: &GroupingAnalysis) {
    println!("\n{}", heavy_rule());
    println!("ANALYSIS SUMMARY");
    println!("{}", heavy_rule());
    println!("Total participants analyzed: {}", population.len());
    println!("Unique group names: {}", analysis.group_names.len());
    println!("Unique element pairs: {}", analysis.element_pairs.len());
    println!("Unique elements: {}", analysis.element_frequency.len());
    if !analysis.group_names.is_empty() {
        println!("\nTop {} group names:", TOP_CONSOLE);
        for (name, count) in analysis.group_names.top(TOP_CONSOLE) {
            println!("  - {}: {}", name, count);
        }
    }
    if !analysis.element_pairs.is_empty() {
        println!("\nTop {} element pairs:", TOP_CONSOLE);
        for (pair, count) in analysis.element_pairs.top(TOP_CONSOLE) {
            println!("  - {}: {}", pair, count);
        }
    }
}

fn counts_to_json<K: std::fmt::Display>(entries: &[(K, u64)], key: &str) -> Vec<JSValue> {
    entries
        .iter()
        .map(|(k, count)| {
            let mut m: JSMap<String, JSValue> = JSMap::new();
            m.insert(key.to_string(), json!(k.to_string()));
            m.insert("count".to_string(), json!(count));
            JSValue::Object(m)
        })
        .collect()
}

/// The full results, ranked, in JSON.
pub fn build_summary_js(
    study_name: &str,
    population: &Population,
    analysis: &GroupingAnalysis,
) -> JSValue {
    let pairs: Vec<JSValue> = analysis
        .element_pairs
        .most_common()
        .iter()
        .map(|(p, count)| json!({"first": p.first.as_str(), "second": p.second.as_str(), "count": count}))
        .collect();

    let relationships: Vec<JSValue> = analysis
        .relationships
        .ranked(&analysis.element_frequency, ElementRelationships::DEFAULT_TOP)
        .iter()
        .map(|(e, related)| json!({"element": e.as_str(), "related": counts_to_json(related, "element")}))
        .collect();

    json!({
        "config": { "study": study_name },
        "participants": population.len(),
        "groups": population.groups().count(),
        "groupNames": counts_to_json(&analysis.group_names.most_common(), "name"),
        "elementPairs": pairs,
        "elements": counts_to_json(&analysis.element_frequency.most_common(), "element"),
        "relationships": relationships,
    })
}
