use log::{debug, warn};

pub use crate::columns::ColumnLayout;
pub use crate::config::*;
use crate::reconstruct::read_participant;
use crate::tokenizer::Tokenizer;

/// A builder for adding participant rows.
///
/// ```
/// pub use card_sorting::builder::PopulationBuilder;
/// pub use card_sorting::{ColumnLayout, ColumnSpan};
/// # use card_sorting::CardSortErrors;
///
/// let layout = ColumnLayout::new(ColumnSpan::from_labels("A", "B")?, ColumnSpan::from_labels("C", "D")?);
/// let mut builder = PopulationBuilder::new(&layout)?
///     .protected_phrases(&["Fees, Fines".to_string()])?;
///
/// builder.add_row("1", &[Some("Fees, Fines, Holds".to_string()), None, Some("Money".to_string())]);
/// builder.add_row("2", &[None, None, None, None]);
///
/// let population = builder.build();
/// assert_eq!(population.len(), 1);
/// # Ok::<(), CardSortErrors>(())
/// ```
pub struct PopulationBuilder {
    pub(crate) _layout: ColumnLayout,
    pub(crate) _tokenizer: Tokenizer,
    pub(crate) _population: Population,
    pub(crate) _skipped: usize,
}

impl PopulationBuilder {
    /// Fails if the layout cannot hold a single group.
    pub fn new(layout: &ColumnLayout) -> Result<PopulationBuilder, CardSortErrors> {
        if layout.pair_count() == 0 {
            return Err(CardSortErrors::EmptyColumnLayout {
                groups: layout.groups.len(),
                names: layout.names.len(),
            });
        }
        if !layout.is_balanced() {
            warn!(
                "PopulationBuilder: {} contents columns ({}) but {} name columns ({}), only {} groups will be read per participant",
                layout.groups.len(),
                layout.groups,
                layout.names.len(),
                layout.names,
                layout.pair_count()
            );
        }
        Ok(PopulationBuilder {
            _layout: *layout,
            _tokenizer: Tokenizer::default(),
            _population: Population::default(),
            _skipped: 0,
        })
    }

    /// Replaces the protected phrases of the tokenizer.
    pub fn protected_phrases(self, phrases: &[String]) -> Result<PopulationBuilder, CardSortErrors> {
        Ok(PopulationBuilder {
            _layout: self._layout,
            _tokenizer: Tokenizer::with_phrases(phrases)?,
            _population: self._population,
            _skipped: self._skipped,
        })
    }

    /// Adds the row of one participant.
    ///
    /// Rows without any group are counted as skipped and are not part of the population.
    pub fn add_row(&mut self, id: &str, row: &[Option<String>]) {
        match read_participant(id, row, &self._layout, &self._tokenizer) {
            Some(p) => {
                self._population.push(p);
            }
            None => {
                debug!("add_row: participant {:?} has no group, skipping", id);
                self._skipped += 1;
            }
        }
    }

    /// The number of participants kept so far.
    pub fn population_len(&self) -> usize {
        self._population.len()
    }

    pub fn skipped(&self) -> usize {
        self._skipped
    }

    pub fn build(self) -> Population {
        self._population
    }
}
