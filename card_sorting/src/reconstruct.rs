use log::debug;

use crate::columns::{ColumnLayout, ColumnSpan};
use crate::config::{Group, GroupName, Participant};
use crate::tokenizer::Tokenizer;

/// Rebuilds the groups of one participant from a row of cells.
///
/// The contents span and the names span are walked in lockstep; iteration stops
/// at the end of the shorter span. Cells past the end of the row are treated as
/// blank. A candidate group with no element and no name is dropped, and only the
/// kept groups are numbered (1, 2, 3, ... with no gap).
pub fn reconstruct(
    row: &[Option<String>],
    group_span: &ColumnSpan,
    name_span: &ColumnSpan,
    tokenizer: &Tokenizer,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut number: u32 = 0;
    for (contents_idx, name_idx) in group_span.positions().zip(name_span.positions()) {
        let contents = cell(row, contents_idx);
        let elements = tokenizer.tokenize(contents);
        let name = GroupName::from_cell(cell(row, name_idx));

        if elements.is_empty() && !name.is_named() {
            continue;
        }
        number += 1;
        groups.push(Group {
            number,
            name,
            elements,
        });
    }
    groups
}

/// Reads a full participant. Returns `None` when no group was kept.
pub fn read_participant(
    id: &str,
    row: &[Option<String>],
    layout: &ColumnLayout,
    tokenizer: &Tokenizer,
) -> Option<Participant> {
    let groups = reconstruct(row, &layout.groups, &layout.names, tokenizer);
    debug!(
        "read_participant: id: {:?} groups: {:?}",
        id,
        groups.len()
    );
    if groups.is_empty() {
        None
    } else {
        Some(Participant {
            id: id.to_string(),
            groups,
        })
    }
}

fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx).and_then(|c| c.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Element;

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect()
    }

    // Contents in columns 0-2, names in columns 3-5.
    fn layout() -> ColumnLayout {
        ColumnLayout::new(
            ColumnSpan::new(0, 2).unwrap(),
            ColumnSpan::new(3, 5).unwrap(),
        )
    }

    fn run(cells: &[&str]) -> Vec<Group> {
        let l = layout();
        reconstruct(&row(cells), &l.groups, &l.names, &Tokenizer::default())
    }

    #[test]
    fn unnamed_group_kept_for_its_elements() {
        let groups = run(&["X, Y", "", "", "", "", ""]);
        assert_eq!(
            groups,
            vec![Group {
                number: 1,
                name: GroupName::Unnamed,
                elements: vec![Element::new("X"), Element::new("Y")],
            }]
        );
        assert_eq!(groups[0].name.to_string(), "unnamed");
    }

    #[test]
    fn named_empty_group_kept() {
        let groups = run(&["", "", "", "Misc", "", ""]);
        assert_eq!(
            groups,
            vec![Group {
                number: 1,
                name: GroupName::Named("Misc".to_string()),
                elements: vec![],
            }]
        );
    }

    #[test]
    fn blank_pairs_dropped_without_gaps_in_numbers() {
        let groups = run(&["A", "", "B, C", " Academics ", "   ", "Money"]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].number, 1);
        assert_eq!(groups[0].name, GroupName::Named("Academics".to_string()));
        assert_eq!(groups[1].number, 2);
        assert_eq!(groups[1].name, GroupName::Named("Money".to_string()));
        assert_eq!(
            groups[1].elements,
            vec![Element::new("B"), Element::new("C")]
        );
    }

    #[test]
    fn fully_blank_row() {
        assert!(run(&["", "", "", "", "", ""]).is_empty());
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn numbering_is_one_to_k() {
        let groups = run(&["", "a", "b", "", "", "n3"]);
        let numbers: Vec<u32> = groups.iter().map(|g| g.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn short_row_reads_as_blank() {
        // The name cells are missing from this row.
        let groups = run(&["A", "B"]);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.name == GroupName::Unnamed));
    }

    #[test]
    fn unequal_spans_stop_at_the_shorter() {
        let r = row(&["A", "B", "C", "n1", "n2"]);
        let groups = reconstruct(
            &r,
            &ColumnSpan::new(0, 2).unwrap(),
            &ColumnSpan::new(3, 4).unwrap(),
            &Tokenizer::default(),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].elements, vec![Element::new("B")]);
    }

    #[test]
    fn participant_without_groups() {
        let r = row(&["", "", "", "", "", ""]);
        assert_eq!(
            read_participant("4", &r, &layout(), &Tokenizer::default()),
            None
        );
        let r = row(&["A", "", "", "", "", ""]);
        let p = read_participant("5", &r, &layout(), &Tokenizer::default()).unwrap();
        assert_eq!(p.id, "5");
        assert_eq!(p.groups.len(), 1);
    }
}
