use crate::error::{NetworkError, Result};
use crate::graph::InteractionGraph;
use serde::Serialize;
use std::fmt;

/// Graph diameter, only defined for a connected graph of at least two drugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Diameter {
    Value(usize),
    NotApplicable,
}

impl fmt::Display for Diameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diameter::Value(d) => write!(f, "{d}"),
            Diameter::NotApplicable => f.write_str("N/A (Graph not connected)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkProperties {
    pub node_count: usize,
    pub edge_count: usize,
    pub diameter: Diameter,
    /// Rounded to two decimals.
    pub average_degree: f64,
}

impl NetworkProperties {
    /// Label/value pairs in display order.
    pub fn metrics(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Number of Drugs", self.node_count.to_string()),
            ("Number of Interactions", self.edge_count.to_string()),
            ("Diameter", self.diameter.to_string()),
            ("Average Degree", format!("{:?}", self.average_degree)),
        ]
    }
}

pub fn compute_properties(graph: &InteractionGraph) -> Result<NetworkProperties> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(NetworkError::EmptyGraph);
    }

    let degree_sum: usize = graph.nodes().map(|n| graph.degree(n)).sum();
    let average_degree = round2(degree_sum as f64 / node_count as f64);

    Ok(NetworkProperties {
        node_count,
        edge_count: graph.edge_count(),
        diameter: diameter(graph),
        average_degree,
    })
}

/// Largest BFS eccentricity over all drugs.
pub fn diameter(graph: &InteractionGraph) -> Diameter {
    if graph.node_count() < 2 || !graph.is_connected() {
        return Diameter::NotApplicable;
    }
    let longest = graph
        .nodes()
        .filter_map(|n| graph.shortest_path_lengths(n).into_values().max())
        .max()
        .unwrap_or(0);
    Diameter::Value(longest)
}

/// Two decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
