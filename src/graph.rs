//! Undirected interaction graph built from the rows touching a drug selection.

use crate::table::InteractionTable;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Ordered set of drug names chosen by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrugSelection {
    drugs: Vec<String>,
}

/// Whether a selection is large enough for pairwise analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus {
    Empty,
    TooFew,
    Ready,
}

impl SelectionStatus {
    /// Message shown instead of an analysis when the selection is too small.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            SelectionStatus::Empty => {
                Some("Select at least two drugs to display their common interacting drugs.")
            }
            SelectionStatus::TooFew => Some("Please select at least two drugs for interaction analysis."),
            SelectionStatus::Ready => None,
        }
    }
}

impl DrugSelection {
    /// Keeps the first occurrence of each name.
    pub fn new<I, S>(drugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let drugs = drugs
            .into_iter()
            .map(Into::into)
            .filter(|d: &String| seen.insert(d.clone()))
            .collect();
        DrugSelection { drugs }
    }

    pub fn drugs(&self) -> &[String] {
        &self.drugs
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn contains(&self, drug: &str) -> bool {
        self.drugs.iter().any(|d| d == drug)
    }

    pub fn status(&self) -> SelectionStatus {
        match self.drugs.len() {
            0 => SelectionStatus::Empty,
            1 => SelectionStatus::TooFew,
            _ => SelectionStatus::Ready,
        }
    }

    /// Every unordered pair `(s[i], s[j])` with `i < j`, in selection order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::with_capacity(self.drugs.len() * self.drugs.len().saturating_sub(1) / 2);
        for (i, a) in self.drugs.iter().enumerate() {
            for b in &self.drugs[i + 1..] {
                pairs.push((a.as_str(), b.as_str()));
            }
        }
        pairs
    }
}

/// Simple undirected graph stored as node -> neighbour set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, drug: &str) {
        if !self.adjacency.contains_key(drug) {
            self.adjacency.insert(drug.to_string(), BTreeSet::new());
        }
    }

    /// Adds both endpoints; self-loops register the node only.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.add_node(a);
        self.add_node(b);
        if a == b {
            return;
        }
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.insert(b.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.insert(a.to_string());
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, drug: &str) -> bool {
        self.adjacency.contains_key(drug)
    }

    pub fn degree(&self, drug: &str) -> usize {
        self.adjacency.get(drug).map_or(0, BTreeSet::len)
    }

    pub fn neighbors(&self, drug: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(drug)
            .into_iter()
            .flat_map(|n| n.iter().map(String::as_str))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Each edge once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(a, neighbors)| {
            neighbors
                .iter()
                .filter(move |b| a < *b)
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }

    /// BFS hop distances from `source` to every reachable node (itself included).
    pub fn shortest_path_lengths(&self, source: &str) -> HashMap<&str, usize> {
        let mut distances = HashMap::new();
        let Some((start, _)) = self.adjacency.get_key_value(source) else {
            return distances;
        };

        let mut queue = VecDeque::new();
        distances.insert(start.as_str(), 0);
        queue.push_back(start.as_str());

        while let Some(current) = queue.pop_front() {
            let depth = distances[current];
            for next in self.neighbors(current) {
                if !distances.contains_key(next) {
                    distances.insert(next, depth + 1);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    /// A single component spans every node. The empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        match self.nodes().next() {
            Some(first) => self.shortest_path_lengths(first).len() == self.node_count(),
            None => false,
        }
    }

    /// Converts to a petgraph graph (node weight = drug name) for rendering.
    pub fn to_petgraph(&self) -> UnGraph<String, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.node_count());
        for drug in self.nodes() {
            indices.insert(drug, graph.add_node(drug.to_string()));
        }
        for (a, b) in self.edges() {
            graph.add_edge(indices[a], indices[b], ());
        }
        graph
    }
}

/// Graph over every row where either drug belongs to `selection`.
/// Repeated pairs collapse into a single edge.
pub fn build_graph(table: &InteractionTable, selection: &DrugSelection) -> InteractionGraph {
    let mut graph = InteractionGraph::new();
    for row in table
        .iter()
        .filter(|row| selection.contains(&row.drug_a) || selection.contains(&row.drug_b))
    {
        graph.add_edge(&row.drug_a, &row.drug_b);
    }
    graph
}
