// Aggregate statistics over the groups of a population.
//
// The four passes are independent from each other and only read the population.

use log::{debug, info};

use crate::config::*;

/// Counts the named groups, by name. Unnamed groups are ignored.
///
/// A participant who uses the same name twice contributes twice.
pub fn group_name_popularity(population: &Population) -> Tally<String> {
    let mut tally: Tally<String> = Tally::new();
    for g in population.groups() {
        if let GroupName::Named(name) = &g.name {
            tally.add(name.clone());
        }
    }
    debug!("group_name_popularity: {:?} names", tally.len());
    tally
}

/// Counts how many times each element was placed in a group.
pub fn element_frequency(population: &Population) -> Tally<Element> {
    let mut tally: Tally<Element> = Tally::new();
    for g in population.groups() {
        for e in g.elements.iter() {
            tally.add(e.clone());
        }
    }
    debug!("element_frequency: {:?} elements", tally.len());
    tally
}

/// Counts the pairs of distinct elements found in the same group.
///
/// Pairs are taken over the positions of the group: an element repeated in a
/// group makes as many pairs as it has copies. Two copies of the same element do
/// not make a pair.
///
/// Within a group, pairs are generated from the sorted elements, which fixes the
/// order in which new pairs are first seen (and so how ties are ranked).
pub fn element_pairs(population: &Population) -> Tally<ElementPair> {
    let mut tally: Tally<ElementPair> = Tally::new();
    for g in population.groups() {
        let mut sorted: Vec<&Element> = g.elements.iter().collect();
        sorted.sort();
        for (i, a) in sorted.iter().enumerate() {
            for b in sorted[i + 1..].iter() {
                if a != b {
                    tally.add(ElementPair::new((*a).clone(), (*b).clone()));
                }
            }
        }
    }
    debug!("element_pairs: {:?} pairs", tally.len());
    tally
}

/// For every element, counts the other elements it was grouped with.
///
/// The result is symmetric: the count of `y` for `x` is the count of `x` for `y`.
pub fn element_relationships(population: &Population) -> ElementRelationships {
    let mut rels = ElementRelationships::new();
    for g in population.groups() {
        for a in g.elements.iter() {
            for b in g.elements.iter() {
                if a != b {
                    rels.add_count(a, b, 1);
                }
            }
        }
    }
    debug!("element_relationships: {:?} elements", rels.len());
    rels
}

/// Runs the four analyses.
pub fn analyze_groupings(population: &Population) -> GroupingAnalysis {
    info!(
        "analyze_groupings: processing {:?} participants",
        population.len()
    );
    GroupingAnalysis {
        group_names: group_name_popularity(population),
        element_pairs: element_pairs(population),
        element_frequency: element_frequency(population),
        relationships: element_relationships(population),
    }
}
