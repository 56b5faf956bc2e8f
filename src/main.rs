use anyhow::Context;
use clap::{Parser, Subcommand};
use drug_interaction_network::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ddi-network", about = "Drug-drug interaction network explorer")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the network for a selection and report its properties.
    Analyze {
        #[arg(long, env = "DDI_TABLE", default_value = "Drug-Drug-Interaction.csv")]
        table: PathBuf,
        /// Drug to include (repeat for each drug).
        #[arg(short, long = "drug")]
        drugs: Vec<String>,
        #[arg(long, default_value = "html_files")]
        out_dir: PathBuf,
        #[arg(long, default_value = "pyvis_graph.dot")]
        dot_file: String,
        /// Also render a PNG with Graphviz.
        #[arg(long)]
        render: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
        /// Seed for node colors.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the drugs available for selection.
    Drugs {
        #[arg(long, env = "DDI_TABLE", default_value = "Drug-Drug-Interaction.csv")]
        table: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Analyze {
            table,
            drugs,
            out_dir,
            dot_file,
            render,
            json,
            seed,
        } => {
            let mut cache = TableCache::new(table);
            let table = cache
                .get()
                .with_context(|| format!("loading {}", cache.path().display()))?;
            let selection = DrugSelection::new(drugs);

            if let Some(notice) = selection.status().notice() {
                println!("{notice}");
                return Ok(());
            }

            let analysis = analyze(&table, &selection)?;

            let colors = match seed {
                Some(seed) => RandomPalette::seeded(&selection, seed),
                None => RandomPalette::from_entropy(&selection),
            };
            let dot_path = write_dot(&analysis.graph, &colors, &out_dir, &dot_file)?;
            if render {
                render_png(&dot_path, &dot_path.with_extension("png"))?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_report(&analysis);
            }
        }
        Command::Drugs { table } => {
            let table = InteractionTable::load(&table)?;
            for drug in table.drug_names() {
                println!("{drug}");
            }
        }
    }

    Ok(())
}

fn print_report(analysis: &NetworkAnalysis) {
    println!("Network Properties");
    for (label, value) in analysis.properties.metrics() {
        println!("  {label}: {value}");
    }

    println!();
    println!("Common Interacting Drugs");
    for pair in &analysis.pairs {
        println!("  {}: {}", pair.title(), pair.summary());
    }
}
