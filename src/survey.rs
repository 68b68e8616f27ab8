use log::{debug, info, warn};

use card_sorting::builder::PopulationBuilder;
use card_sorting::*;
use snafu::{prelude::*, Snafu};

use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;
use crate::survey::io_common::SheetGrid;
use crate::survey::responses::ResponseSummary;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod report;
mod responses;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The spreadsheet {path} is empty"))]
    EmptyExcel { path: String },
    #[snafu(display("The spreadsheet {path} has no worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "The spreadsheet {path} has {count} worksheets, the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("Error opening csv file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing csv line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing json"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a column number or a column label, got {content}"))]
    ParsingJsonColumn { content: String },
    #[snafu(display("Invalid column setting"))]
    InvalidColumns { source: CardSortErrors },
    #[snafu(display("No group can be read from {path} with the configured columns"))]
    UnusableColumns {
        source: CardSortErrors,
        path: String,
    },
    #[snafu(display("Invalid protected phrases"))]
    InvalidPhrases { source: CardSortErrors },
    #[snafu(display("Invalid response pattern"))]
    InvalidPattern { source: regex::Error },
    #[snafu(display("Unknown input type {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Error writing file {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;
pub type BSurveyResult<T> = Result<T, Box<SurveyError>>;

/// Everything read from one input file.
struct SourceData {
    population: Population,
    grid: SheetGrid,
    metadata_rows: usize,
}

fn read_grid(cfs: &FileSource) -> BSurveyResult<SheetGrid> {
    info!("Attempting to read survey file {:?}", cfs.file_path);
    match cfs.provider.as_str() {
        "xlsx" | "excel" => io_excel::read_excel_grid(&cfs.file_path, cfs),
        "csv" => io_csv::read_csv_grid(&cfs.file_path),
        x => Err(Box::new(SurveyError::UnknownProvider {
            provider: x.to_string(),
        })),
    }
}

// Fits the configured columns into the sheet, and warns about anything that
// changes what will be read.
fn fit_layout(cfs: &FileSource, grid: &SheetGrid) -> SurveyResult<ColumnLayout> {
    let layout = cfs.layout()?;
    let width = grid.width();
    let clamped = layout.clamp_to_width(width);
    if clamped.clamped {
        warn!(
            "{}: the configured columns go past the {} available columns ({}): groups {} -> {}, names {} -> {}",
            cfs.file_path,
            width,
            io_common::last_column_label(width),
            layout.groups,
            clamped.layout.groups,
            layout.names,
            clamped.layout.names
        );
    }
    Ok(clamped.layout)
}

fn read_source(
    cfs: &FileSource,
    phrases: &[String],
    prefix_ids: bool,
) -> SurveyResult<SourceData> {
    let grid = read_grid(cfs).map_err(|e| *e)?;
    let layout = fit_layout(cfs, &grid)?;
    let metadata_rows = cfs.metadata_rows();
    let default_id = io_common::make_default_id(&cfs.file_path, prefix_ids);

    let mut builder = PopulationBuilder::new(&layout)
        .context(UnusableColumnsSnafu {
            path: cfs.file_path.clone(),
        })?
        .protected_phrases(phrases)
        .context(InvalidPhrasesSnafu {})?;
    for (idx, row) in grid.participant_rows(metadata_rows) {
        builder.add_row(&default_id(idx), row);
    }
    info!(
        "{}: {} participants with groups, {} rows without groups",
        cfs.file_path,
        builder.population_len(),
        builder.skipped()
    );
    Ok(SourceData {
        population: builder.build(),
        grid,
        metadata_rows,
    })
}

fn summarize_questions(
    questions: &[FreeTextQuestion],
    sources: &[SourceData],
) -> SurveyResult<Vec<ResponseSummary>> {
    let parser = responses::ResponseParser::new().context(InvalidPatternSnafu {})?;
    let mut res: Vec<ResponseSummary> = Vec::new();
    for q in questions {
        let column = q.column_index()?;
        let mut cells: Vec<&str> = Vec::new();
        for s in sources.iter() {
            if column >= s.grid.width() {
                warn!(
                    "Column {} for question {:?} not found",
                    card_sorting::column_label(column),
                    q.question
                );
                continue;
            }
            for (_, row) in s.grid.participant_rows(s.metadata_rows) {
                if let Some(Some(c)) = row.get(column) {
                    cells.push(c.as_str());
                }
            }
        }
        debug!(
            "summarize_questions: question: {:?} responses: {:?}",
            q.question,
            cells.len()
        );
        res.push(parser.summarize(&q.question, column, &cells));
    }
    Ok(res)
}

fn compare_with_reference(pretty_js_stats: &str, reference_path: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {}", reference_path);
    Ok(())
}

pub fn run_analysis(args: &Args) -> SurveyResult<()> {
    let config = load_config(args)?;
    info!("config: {:?}", config);

    if config.sources.is_empty() {
        whatever!("No input file: use --input or a configuration file with sources")
    }

    let phrases = config.protected_phrases();
    let prefix_ids = config.sources.len() > 1;
    let mut sources: Vec<SourceData> = Vec::new();
    for cfs in config.sources.iter() {
        sources.push(read_source(cfs, &phrases, prefix_ids)?);
    }

    let participants: Vec<Participant> = sources
        .iter()
        .flat_map(|s| s.population.participants().iter().cloned())
        .collect();
    let population = Population::new(participants);
    info!("Processed {} participants", population.len());

    let analysis = analyze_groupings(&population);

    if let Some(p) = config.card_sort_path() {
        report::write_report(&p, &report::format_card_sort(&population))?;
    }
    if let Some(p) = config.groupings_path() {
        report::write_report(&p, &report::format_groupings(&analysis))?;
    }
    let questions = config.free_text_questions();
    if !questions.is_empty() {
        let summaries = summarize_questions(&questions, &sources)?;
        report::print_response_summary(&summaries);
        if let Some(p) = config.summary_path() {
            report::write_report(&p, &report::format_response_summary(&summaries))?;
        }
    }

    report::print_console_summary(&population, &analysis);

    let result_js = report::build_summary_js(&config.study_name(), &population, &analysis);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    match config.summary_json_path().as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(p) => report::write_report(p, &pretty_js_stats)?,
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_deref() {
        compare_with_reference(&pretty_js_stats, reference_path)?;
    }

    Ok(())
}
