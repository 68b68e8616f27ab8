use clap::Parser;

/// This is a card sort analysis program.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the study: input files, columns, outputs.
    /// The other options override the values it contains.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the JSON summary of an analysis. If provided, cardsort will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The spreadsheet exported by the survey tool. Setting this option overrides the sources
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default xlsx) The type of the input: xlsx or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the only worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default AL:YB) The columns holding the contents of the groups, as FIRST:LAST.
    #[clap(long, value_parser)]
    pub group_columns: Option<String>,

    /// (default YC:YQ) The columns holding the names of the groups, as FIRST:LAST.
    #[clap(long, value_parser)]
    pub name_columns: Option<String>,

    /// (default 3) The number of rows between the header and the first participant.
    #[clap(long, value_parser)]
    pub metadata_rows: Option<usize>,

    /// (repeatable) An element name that contains commas and must not be split. Replaces the default list.
    #[clap(long, value_parser)]
    pub protected_phrase: Option<Vec<String>>,

    /// (file path) Where to write the list of the groups of every participant.
    #[clap(long, value_parser)]
    pub card_sort_out: Option<String>,

    /// (file path) Where to write the analysis of the groupings.
    #[clap(long, value_parser)]
    pub groupings_out: Option<String>,

    /// (file path) Where to write the summary of the free-text questions.
    #[clap(long, value_parser)]
    pub summary_out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
