use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use card_sorting::{column_index, ColumnLayout, ColumnSpan, DEFAULT_PROTECTED_PHRASES};

use crate::args::Args;
use crate::survey::*;

/// The number of rows between the header and the first participant in the
/// exports of the survey tool.
pub const DEFAULT_METADATA_ROWS: usize = 3;

/// The free-text questions of the survey export, by column, used when the
/// configuration does not list any.
pub const DEFAULT_FREE_TEXT_QUESTIONS: [(&str, &str); 3] = [
    ("T", "What are the top things you typically use Esther for?"),
    ("W", "Which features are hardest to find on Esther?"),
    ("Z", "What were you trying to find, and what made it difficult?"),
];

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "studyName")]
    pub study_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "cardSortFile")]
    pub card_sort_file: Option<String>,
    #[serde(rename = "groupingsFile")]
    pub groupings_file: Option<String>,
    #[serde(rename = "summaryFile")]
    pub summary_file: Option<String>,
    #[serde(rename = "summaryJsonFile")]
    pub summary_json_file: Option<String>,
}

/// A range of columns. Both ends are included.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRange {
    pub first: JSValue,
    pub last: JSValue,
}

impl ColumnRange {
    pub fn span(&self) -> SurveyResult<ColumnSpan> {
        let first = read_js_column(&self.first)?;
        let last = read_js_column(&self.last)?;
        ColumnSpan::new(first, last).context(InvalidColumnsSnafu {})
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "metadataRows")]
    _metadata_rows: Option<usize>,
    #[serde(rename = "groupColumns")]
    pub group_columns: Option<ColumnRange>,
    #[serde(rename = "nameColumns")]
    pub name_columns: Option<ColumnRange>,
}

impl FileSource {
    pub fn new(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            excel_worksheet_name: None,
            _metadata_rows: None,
            group_columns: None,
            name_columns: None,
        }
    }

    pub fn metadata_rows(&self) -> usize {
        self._metadata_rows.unwrap_or(DEFAULT_METADATA_ROWS)
    }

    /// The configured columns, or the default ones.
    pub fn layout(&self) -> SurveyResult<ColumnLayout> {
        let default = ColumnLayout::default_layout();
        let groups = match &self.group_columns {
            Some(r) => r.span()?,
            None => default.groups,
        };
        let names = match &self.name_columns {
            Some(r) => r.span()?,
            None => default.names,
        };
        Ok(ColumnLayout::new(groups, names))
    }
}

/// A question answered with free text, summarized in the report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FreeTextQuestion {
    pub column: JSValue,
    pub question: String,
}

impl FreeTextQuestion {
    pub fn column_index(&self) -> SurveyResult<usize> {
        read_js_column(&self.column)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub sources: Vec<FileSource>,
    #[serde(rename = "protectedPhrases")]
    _protected_phrases: Option<Vec<String>>,
    #[serde(rename = "freeTextQuestions")]
    _free_text_questions: Option<Vec<FreeTextQuestion>>,
}

impl StudyConfig {
    pub fn protected_phrases(&self) -> Vec<String> {
        match &self._protected_phrases {
            Some(l) => l.clone(),
            None => DEFAULT_PROTECTED_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// The configured questions, or the default ones. An empty list disables the summary.
    pub fn free_text_questions(&self) -> Vec<FreeTextQuestion> {
        match &self._free_text_questions {
            Some(l) => l.clone(),
            None => DEFAULT_FREE_TEXT_QUESTIONS
                .iter()
                .map(|(column, question)| FreeTextQuestion {
                    column: JSValue::String(column.to_string()),
                    question: question.to_string(),
                })
                .collect(),
        }
    }

    pub fn study_name(&self) -> String {
        self.output_settings
            .study_name
            .clone()
            .unwrap_or_else(|| "Card sort".to_string())
    }

    pub fn card_sort_path(&self) -> Option<String> {
        self.output_settings.card_sort_file.clone()
    }

    pub fn groupings_path(&self) -> Option<String> {
        self.output_settings.groupings_file.clone()
    }

    pub fn summary_path(&self) -> Option<String> {
        self.output_settings.summary_file.clone()
    }

    pub fn summary_json_path(&self) -> Option<String> {
        self.output_settings.summary_json_file.clone()
    }

    // Relative paths in a configuration file are relative to the file itself,
    // and the output files are relative to the output directory.
    fn resolve_paths(&mut self, root: &Path) {
        let root = root.display().to_string();
        for s in self.sources.iter_mut() {
            s.file_path = join_path(&root, &s.file_path);
        }
        let out = &mut self.output_settings;
        let dir = match &out.output_directory {
            Some(dir) => join_path(&root, dir),
            None => root,
        };
        for file in [
            &mut out.card_sort_file,
            &mut out.groupings_file,
            &mut out.summary_file,
            &mut out.summary_json_file,
        ] {
            if let Some(f) = file.as_mut() {
                if f.as_str() != "stdout" {
                    *f = join_path(&dir, f);
                }
            }
        }
        out.output_directory = Some(dir);
    }
}

fn join_path(root: &str, path: &str) -> String {
    let p: PathBuf = [root, path].iter().collect();
    p.as_path().display().to_string()
}

pub fn read_config(path: &str) -> SurveyResult<StudyConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let mut config: StudyConfig =
        serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    if let Some(root) = Path::new(path).parent() {
        config.resolve_paths(root);
    }
    Ok(config)
}

/// Reads the configuration file if any, then applies the command line options.
pub fn load_config(args: &Args) -> SurveyResult<StudyConfig> {
    let mut config = match &args.config {
        Some(p) => read_config(p)?,
        None => StudyConfig::default(),
    };

    if let Some(input) = &args.input {
        let provider = args.input_type.clone().unwrap_or_else(|| "xlsx".to_string());
        config.sources = vec![FileSource::new(&provider, input)];
    }

    let group_columns = args
        .group_columns
        .as_deref()
        .map(parse_column_range)
        .transpose()?;
    let name_columns = args
        .name_columns
        .as_deref()
        .map(parse_column_range)
        .transpose()?;
    for s in config.sources.iter_mut() {
        if args.excel_worksheet_name.is_some() {
            s.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
        if args.metadata_rows.is_some() {
            s._metadata_rows = args.metadata_rows;
        }
        if group_columns.is_some() {
            s.group_columns = group_columns.clone();
        }
        if name_columns.is_some() {
            s.name_columns = name_columns.clone();
        }
    }

    if let Some(phrases) = &args.protected_phrase {
        config._protected_phrases = Some(phrases.clone());
    }

    // Paths given on the command line are not relative to the output directory.
    let out = &mut config.output_settings;
    for (arg, setting) in [
        (&args.card_sort_out, &mut out.card_sort_file),
        (&args.groupings_out, &mut out.groupings_file),
        (&args.summary_out, &mut out.summary_file),
        (&args.out, &mut out.summary_json_file),
    ] {
        if arg.is_some() {
            *setting = arg.clone();
        }
    }
    debug!("load_config: {:?}", config);
    Ok(config)
}

/// Parses a range given as FIRST:LAST, for example AL:YB or 38:652.
pub fn parse_column_range(s: &str) -> SurveyResult<ColumnRange> {
    match s.split_once(':') {
        Some((first, last)) => Ok(ColumnRange {
            first: column_value(first.trim()),
            last: column_value(last.trim()),
        }),
        None => ParsingJsonColumnSnafu {
            content: s.to_string(),
        }
        .fail(),
    }
}

fn column_value(s: &str) -> JSValue {
    match s.parse::<u64>() {
        Ok(n) => JSValue::from(n),
        Err(_) => JSValue::String(s.to_string()),
    }
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Reads a column given either as a 1-based number or as a spreadsheet label.
fn read_js_column(x: &JSValue) -> SurveyResult<usize> {
    let fail = || ParsingJsonColumnSnafu {
        content: x.to_string(),
    };
    match x {
        JSValue::Number(n) => match n.as_u64() {
            Some(n) if n >= 1 => Ok((n - 1) as usize),
            _ => fail().fail(),
        },
        // Parsing the Excel-style columns
        JSValue::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            column_index(s).context(InvalidColumnsSnafu {})
        }
        JSValue::String(s) => match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => fail().fail(),
        },
        _ => fail().fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_as_labels_or_numbers() {
        assert_eq!(read_js_column(&json!("AL")).unwrap(), 37);
        assert_eq!(read_js_column(&json!("al")).unwrap(), 37);
        assert_eq!(read_js_column(&json!(38)).unwrap(), 37);
        assert_eq!(read_js_column(&json!("38")).unwrap(), 37);
        assert!(read_js_column(&json!(0)).is_err());
        assert!(read_js_column(&json!("A-1")).is_err());
        assert!(read_js_column(&json!(null)).is_err());
    }

    #[test]
    fn column_range_from_command_line() {
        let r = parse_column_range("AL:YB").unwrap();
        assert_eq!(r.span().unwrap(), ColumnSpan::from_labels("AL", "YB").unwrap());
        let r = parse_column_range("2 : 4").unwrap();
        assert_eq!(r.span().unwrap(), ColumnSpan::new(1, 3).unwrap());
        assert!(parse_column_range("AL").is_err());
        assert!(parse_column_range("YB:AL").unwrap().span().is_err());
    }

    #[test]
    fn parse_study_config() {
        let js = r#"{
            "outputSettings": { "studyName": "Website", "outputDirectory": "out", "groupingsFile": "Groupings.txt" },
            "sources": [
                { "provider": "xlsx", "filePath": "responses.xlsx", "metadataRows": 2,
                  "groupColumns": { "first": "B", "last": "D" }, "nameColumns": { "first": 5, "last": 7 } }
            ],
            "protectedPhrases": ["Fees, Fines"],
            "freeTextQuestions": [ { "column": "T", "question": "What do you use?" } ]
        }"#;
        let mut config: StudyConfig = serde_json::from_str(js).unwrap();
        config.resolve_paths(Path::new("/data/study"));

        assert_eq!(config.sources[0].file_path, "/data/study/responses.xlsx");
        assert_eq!(config.sources[0].metadata_rows(), 2);
        let layout = config.sources[0].layout().unwrap();
        assert_eq!(layout.groups, ColumnSpan::new(1, 3).unwrap());
        assert_eq!(layout.names, ColumnSpan::new(4, 6).unwrap());
        assert_eq!(
            config.groupings_path(),
            Some("/data/study/out/Groupings.txt".to_string())
        );
        assert_eq!(config.card_sort_path(), None);
        assert_eq!(config.protected_phrases(), vec!["Fees, Fines".to_string()]);
        assert_eq!(config.free_text_questions().len(), 1);
        assert_eq!(config.free_text_questions()[0].column_index().unwrap(), 19);
        assert_eq!(config.study_name(), "Website");
    }

    #[test]
    fn defaults_without_config() {
        let args = Args {
            input: Some("responses.xlsx".to_string()),
            ..Args::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].provider, "xlsx");
        assert_eq!(config.sources[0].metadata_rows(), DEFAULT_METADATA_ROWS);
        assert_eq!(
            config.sources[0].layout().unwrap(),
            ColumnLayout::default_layout()
        );
        assert_eq!(config.protected_phrases().len(), 2);
        assert_eq!(config.summary_json_path(), None);

        let columns: Vec<usize> = config
            .free_text_questions()
            .iter()
            .map(|q| q.column_index().unwrap())
            .collect();
        assert_eq!(columns, vec![19, 22, 25]);

        let disabled: StudyConfig = serde_json::from_str(r#"{ "freeTextQuestions": [] }"#).unwrap();
        assert!(disabled.free_text_questions().is_empty());
    }

    #[test]
    fn command_line_overrides() {
        let args = Args {
            input: Some("r.csv".to_string()),
            input_type: Some("csv".to_string()),
            group_columns: Some("B:C".to_string()),
            metadata_rows: Some(0),
            protected_phrase: Some(vec!["A, B".to_string()]),
            out: Some("stdout".to_string()),
            groupings_out: Some("/tmp/g.txt".to_string()),
            ..Args::default()
        };
        let config = load_config(&args).unwrap();
        let layout = config.sources[0].layout().unwrap();
        assert_eq!(layout.groups, ColumnSpan::new(1, 2).unwrap());
        assert_eq!(layout.names, ColumnLayout::default_layout().names);
        assert_eq!(config.sources[0].metadata_rows(), 0);
        assert_eq!(config.protected_phrases(), vec!["A, B".to_string()]);
        assert_eq!(config.summary_json_path(), Some("stdout".to_string()));
        assert_eq!(config.groupings_path(), Some("/tmp/g.txt".to_string()));
    }
}
