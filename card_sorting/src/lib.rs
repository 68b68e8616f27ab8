/*!
Reconstruction and analysis of card sort groupings.

A card sort survey asks every participant to sort a set of elements into groups
and, optionally, to name these groups. Survey tools export the answers as one
wide spreadsheet row per participant: one block of columns with the contents of
each group (a comma separated list of elements), and one block with the group
names.

This crate turns such rows into structured groups, then computes descriptive
statistics over all the participants:
- the popularity of the group names,
- the frequency of each element,
- the number of times two elements were put in the same group,
- for each element, the elements it was most often grouped with.

```
use card_sorting::builder::PopulationBuilder;
use card_sorting::*;

let layout = ColumnLayout::new(ColumnSpan::from_labels("A", "B")?, ColumnSpan::from_labels("C", "D")?);
let mut builder = PopulationBuilder::new(&layout)?;
builder.add_row("1", &[Some("Grades, Transcripts".to_string()), Some("Fees".to_string()), Some("Academics".to_string()), None]);
builder.add_row("2", &[Some("Transcripts, Grades, Fees".to_string()), None, None, None]);
let analysis = analyze_groupings(&builder.build());

assert_eq!(analysis.element_frequency.get("Grades"), 2);
assert_eq!(analysis.relationships.count("Grades", "Transcripts"), 2);
# Ok::<(), CardSortErrors>(())
```
*/

mod analysis;
pub mod builder;
mod columns;
mod config;
pub mod manual;
mod reconstruct;
mod tokenizer;

pub use crate::analysis::*;
pub use crate::columns::*;
pub use crate::config::*;
pub use crate::reconstruct::*;
pub use crate::tokenizer::*;
