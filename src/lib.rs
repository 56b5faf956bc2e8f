//! Drug-drug interaction network analytics: build an undirected interaction
//! graph for a drug selection, summarize it, and find the drugs each pair of
//! selected drugs has in common.

pub mod analysis;
pub mod error;
pub mod graph;
pub mod interactors;
pub mod properties;
pub mod render;
pub mod table;

pub use analysis::{NetworkAnalysis, PairInteractors, analyze};
pub use error::{NetworkError, Result};
pub use graph::{DrugSelection, InteractionGraph, SelectionStatus, build_graph};
pub use interactors::{find_common_interactors, format_common_interactors, interactors_of};
pub use properties::{Diameter, NetworkProperties, compute_properties};
pub use render::{ColorStrategy, RandomPalette, render_png, to_dot, write_dot};
pub use table::{InteractionRow, InteractionTable, TableCache};
