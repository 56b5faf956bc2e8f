//! One recomputation pass for a drug selection: filter, build, measure and
//! look up common interactors for every pair.

use crate::error::{NetworkError, Result};
use crate::graph::{DrugSelection, InteractionGraph, SelectionStatus, build_graph};
use crate::interactors::{find_common_interactors, format_common_interactors};
use crate::properties::{NetworkProperties, compute_properties};
use crate::table::InteractionTable;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairInteractors {
    pub pair: (String, String),
    pub common: BTreeSet<String>,
}

impl PairInteractors {
    pub fn title(&self) -> String {
        format!("{} and {}", self.pair.0, self.pair.1)
    }

    pub fn summary(&self) -> String {
        format_common_interactors(&self.common)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkAnalysis {
    #[serde(skip)]
    pub graph: InteractionGraph,
    pub properties: NetworkProperties,
    pub pairs: Vec<PairInteractors>,
}

pub fn analyze(table: &InteractionTable, selection: &DrugSelection) -> Result<NetworkAnalysis> {
    if selection.status() != SelectionStatus::Ready {
        return Err(NetworkError::SelectionTooSmall {
            selected: selection.len(),
        });
    }

    let graph = build_graph(table, selection);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built interaction graph"
    );
    let properties = compute_properties(&graph)?;

    let pairs: Vec<PairInteractors> = selection
        .pairs()
        .into_iter()
        .map(|(a, b)| PairInteractors {
            pair: (a.to_string(), b.to_string()),
            common: find_common_interactors(table, (a, b)),
        })
        .collect();

    info!(
        selected = selection.len(),
        pairs = pairs.len(),
        "analysis complete"
    );

    Ok(NetworkAnalysis {
        graph,
        properties,
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Diameter;

    fn table() -> InteractionTable {
        InteractionTable::from_pairs([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D"), ("E", "F")])
    }

    #[test]
    fn rejects_small_selections() {
        for selection in [DrugSelection::default(), DrugSelection::new(["A"])] {
            let err = analyze(&table(), &selection).unwrap_err();
            assert!(matches!(err, NetworkError::SelectionTooSmall { .. }));
        }
    }

    #[test]
    fn full_pass() {
        let analysis = analyze(&table(), &DrugSelection::new(["A", "B", "D"])).unwrap();

        assert_eq!(analysis.properties.node_count, 4);
        assert_eq!(analysis.properties.edge_count, 4);
        assert_eq!(analysis.properties.diameter, Diameter::Value(2));

        let titles: Vec<_> = analysis.pairs.iter().map(PairInteractors::title).collect();
        assert_eq!(titles, vec!["A and B", "A and D", "B and D"]);
        assert_eq!(analysis.pairs[0].summary(), "C");
    }

    #[test]
    fn unknown_selection_reports_empty_graph() {
        let err = analyze(&table(), &DrugSelection::new(["X", "Y"])).unwrap_err();
        assert!(matches!(err, NetworkError::EmptyGraph));
    }

    #[test]
    fn deterministic() {
        let selection = DrugSelection::new(["C", "E", "A"]);
        let first = analyze(&table(), &selection).unwrap();
        let second = analyze(&table(), &selection).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.graph, second.graph);
    }
}
