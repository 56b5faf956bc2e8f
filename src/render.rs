//! Graphviz output for an interaction graph.

use crate::error::{NetworkError, Result};
use crate::graph::{DrugSelection, InteractionGraph};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const UNSELECTED_COLOR: &str = "#FFFFFF";

/// Maps a drug to a Graphviz color.
pub trait ColorStrategy {
    fn color_for(&self, drug: &str) -> String;
}

/// Random `#RRGGBB` per selected drug, drawn once up front.
#[derive(Debug, Clone)]
pub struct RandomPalette {
    colors: HashMap<String, String>,
}

impl RandomPalette {
    pub fn new<R: Rng>(selection: &DrugSelection, rng: &mut R) -> Self {
        let colors = selection
            .drugs()
            .iter()
            .map(|drug| (drug.clone(), format!("#{:06X}", rng.gen_range(0..=0xFF_FFFFu32))))
            .collect();
        RandomPalette { colors }
    }

    pub fn seeded(selection: &DrugSelection, seed: u64) -> Self {
        Self::new(selection, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(selection: &DrugSelection) -> Self {
        Self::new(selection, &mut thread_rng())
    }
}

impl ColorStrategy for RandomPalette {
    fn color_for(&self, drug: &str) -> String {
        self.colors
            .get(drug)
            .cloned()
            .unwrap_or_else(|| UNSELECTED_COLOR.to_string())
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn to_dot(graph: &InteractionGraph, colors: &dyn ColorStrategy) -> String {
    let graph = graph.to_petgraph();
    let node_attrs = |_: &UnGraph<String, ()>, (_, drug): (NodeIndex, &String)| {
        format!(
            "label=\"{}\", style=filled, fillcolor=\"{}\"",
            escape(drug),
            colors.color_for(drug)
        )
    };
    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, _| String::new(),
        &node_attrs,
    );
    format!("{:?}", dot)
}

/// Writes `<dir>/<file_name>`, creating `dir` when needed.
pub fn write_dot(
    graph: &InteractionGraph,
    colors: &dyn ColorStrategy,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| NetworkError::io(e, dir))?;
    let path = dir.join(file_name);
    fs::write(&path, to_dot(graph, colors)).map_err(|e| NetworkError::io(e, &path))?;
    debug!(path = %path.display(), "wrote DOT file");
    Ok(path)
}

/// Runs Graphviz `dot -Tpng`.
pub fn render_png(dot_file: &Path, output_image: &Path) -> Result<()> {
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_file)
        .arg("-o")
        .arg(output_image)
        .status()
        .map_err(|e| NetworkError::Render(format!("failed to run `dot`: {e}")))?;

    if !status.success() {
        return Err(NetworkError::Render(format!("`dot` exited with {status}")));
    }
    info!(image = %output_image.display(), "rendered graph");
    Ok(())
}
