// ********* Input data structures ***********

use std::borrow::Borrow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::hash::Hash;

/// One item that a participant placed into a group.
///
/// Elements are compared by exact string equality after trimming. There is no
/// case folding or fuzzy matching.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct Element(String);

impl Element {
    /// Creates an element from raw text. Surrounding whitespace is removed.
    pub fn new(name: &str) -> Element {
        Element(name.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Element {
    fn from(name: &str) -> Element {
        Element::new(name)
    }
}

impl Borrow<str> for Element {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name a participant gave to a group.
///
/// A blank name cell is not an empty string: it is recorded as `Unnamed`, so
/// that a group literally called "unnamed" stays distinguishable.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum GroupName {
    Named(String),
    Unnamed,
}

impl GroupName {
    pub const UNNAMED_LABEL: &'static str = "unnamed";

    /// Normalizes the content of a name cell.
    pub fn from_cell(cell: Option<&str>) -> GroupName {
        match cell.map(|s| s.trim()) {
            Some(s) if !s.is_empty() => GroupName::Named(s.to_string()),
            _ => GroupName::Unnamed,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, GroupName::Named(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupName::Named(s) => s.as_str(),
            GroupName::Unnamed => GroupName::UNNAMED_LABEL,
        }
    }
}

impl Display for GroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named or unnamed collection of elements chosen by one participant.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Group {
    /// 1-based position among the groups kept for this participant.
    pub number: u32,
    pub name: GroupName,
    /// In order of appearance. Duplicates are preserved.
    pub elements: Vec<Element>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Participant {
    pub id: String,
    pub groups: Vec<Group>,
}

/// All the participants of an analysis run.
///
/// Participants without any group are never stored.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Population {
    participants: Vec<Participant>,
}

impl Population {
    pub fn new(participants: Vec<Participant>) -> Population {
        let mut res = Population::default();
        for p in participants {
            res.push(p);
        }
        res
    }

    /// Adds a participant. Returns false if it was excluded for having no group.
    pub fn push(&mut self, participant: Participant) -> bool {
        if participant.groups.is_empty() {
            return false;
        }
        self.participants.push(participant);
        true
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// All the groups, participant after participant.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.participants.iter().flat_map(|p| p.groups.iter())
    }
}

// ******** Output data structures *********

/// A counter that remembers the order in which keys were first seen.
///
/// Ranking is by descending count, and ties keep the first-encountered order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tally<K: Eq + Hash + Clone> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Tally {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Tally<K> {
        Tally::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_count(key, 1)
    }

    pub fn add_count(&mut self, key: K, count: u64) {
        if let Some(idx) = self.index.get(&key) {
            self.entries[*idx].1 += count;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, count));
        }
    }

    /// The count for a key, zero if it was never seen.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|idx| self.entries[*idx].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// Entries in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = &(K, u64)> {
        self.entries.iter()
    }

    /// Adds all the counts of another tally to this one.
    ///
    /// Keys only present in `other` are appended in their order in `other`.
    pub fn merge(&mut self, other: &Tally<K>) {
        for (k, c) in other.entries.iter() {
            self.add_count(k.clone(), *c);
        }
    }

    /// All the entries, most frequent first.
    pub fn most_common(&self) -> Vec<(K, u64)> {
        let mut res = self.entries.clone();
        // sort_by is stable: ties stay in insertion order.
        res.sort_by(|a, b| b.1.cmp(&a.1));
        res
    }

    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut res = self.most_common();
        res.truncate(n);
        res
    }
}

/// An unordered pair of distinct elements, stored in sorted order.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct ElementPair {
    pub first: Element,
    pub second: Element,
}

impl ElementPair {
    pub fn new(a: Element, b: Element) -> ElementPair {
        if a <= b {
            ElementPair {
                first: a,
                second: b,
            }
        } else {
            ElementPair {
                first: b,
                second: a,
            }
        }
    }
}

impl Display for ElementPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// For each element, how many times every other element was grouped with it.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ElementRelationships {
    index: HashMap<Element, usize>,
    entries: Vec<(Element, Tally<Element>)>,
}

impl ElementRelationships {
    pub const DEFAULT_TOP: usize = 5;

    pub fn new() -> ElementRelationships {
        ElementRelationships::default()
    }

    pub fn add_count(&mut self, element: &Element, other: &Element, count: u64) {
        let idx = match self.index.get(element) {
            Some(idx) => *idx,
            None => {
                self.index.insert(element.clone(), self.entries.len());
                self.entries.push((element.clone(), Tally::new()));
                self.entries.len() - 1
            }
        };
        self.entries[idx].1.add_count(other.clone(), count);
    }

    pub fn get(&self, element: &str) -> Option<&Tally<Element>> {
        self.index.get(element).map(|idx| &self.entries[*idx].1)
    }

    /// How many times `other` was seen in the same group as `element`.
    pub fn count(&self, element: &str, other: &str) -> u64 {
        self.get(element).map(|t| t.get(other)).unwrap_or(0)
    }

    /// The `n` elements most often grouped with `element`.
    pub fn top(&self, element: &str, n: usize) -> Vec<(Element, u64)> {
        self.get(element).map(|t| t.top(n)).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Element, Tally<Element>)> {
        self.entries.iter()
    }

    pub fn merge(&mut self, other: &ElementRelationships) {
        for (element, tally) in other.entries.iter() {
            for (o, c) in tally.iter() {
                self.add_count(element, o, *c);
            }
        }
    }

    /// The elements ordered by their overall frequency (ties in first-seen order), each
    /// with its `n` most frequent companions.
    pub fn ranked(&self, frequency: &Tally<Element>, n: usize) -> Vec<(Element, Vec<(Element, u64)>)> {
        let mut elements: Vec<&(Element, Tally<Element>)> = self.entries.iter().collect();
        elements.sort_by(|a, b| frequency.get(&b.0).cmp(&frequency.get(&a.0)));
        elements
            .into_iter()
            .filter(|(_, t)| !t.is_empty())
            .map(|(e, t)| (e.clone(), t.top(n)))
            .collect()
    }
}

/// The four analyses computed over a population.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct GroupingAnalysis {
    /// Named groups only.
    pub group_names: Tally<String>,
    pub element_pairs: Tally<ElementPair>,
    pub element_frequency: Tally<Element>,
    pub relationships: ElementRelationships,
}

impl GroupingAnalysis {
    /// Sums the results of another analysis into this one.
    pub fn merge(&mut self, other: &GroupingAnalysis) {
        self.group_names.merge(&other.group_names);
        self.element_pairs.merge(&other.element_pairs);
        self.element_frequency.merge(&other.element_frequency);
        self.relationships.merge(&other.relationships);
    }
}

/// Errors raised for contract violations on the inputs.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CardSortErrors {
    /// The column label is empty, contains something else than ASCII letters, or is too large.
    InvalidColumnLabel(String),
    /// The last column of a span comes before its first column.
    InvertedColumnSpan { first: usize, last: usize },
    /// A protected phrase cannot be empty.
    EmptyProtectedPhrase,
    /// The contents span or the names span covers no column: no group can be read.
    EmptyColumnLayout { groups: usize, names: usize },
}

impl Error for CardSortErrors {}

impl Display for CardSortErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardSortErrors::InvalidColumnLabel(label) => {
                write!(f, "invalid column label {:?}", label)
            }
            CardSortErrors::InvertedColumnSpan { first, last } => {
                write!(f, "column span ends at {} before its start {}", last, first)
            }
            CardSortErrors::EmptyProtectedPhrase => write!(f, "empty protected phrase"),
            CardSortErrors::EmptyColumnLayout { groups, names } => write!(
                f,
                "no group can be read with {} contents columns and {} name columns",
                groups, names
            ),
        }
    }
}
