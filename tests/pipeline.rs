use drug_interaction_network::*;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const TABLE: &str = "DrugA,DrugB,Level\n\
Aspirin,Warfarin,Major\n\
Aspirin,Ibuprofen,Moderate\n\
Warfarin,Ibuprofen,Major\n\
Ibuprofen,Lisinopril,Minor\n\
Metformin,,Minor\n\
Warfarin,Aspirin,Major\n";

fn write_table(dir: &Path, contents: &str, mtime_secs: u64) -> std::path::PathBuf {
    let path = dir.join("Drug-Drug-Interaction.csv");
    fs::write(&path, contents).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .unwrap();
    path
}

#[test]
fn end_to_end_analysis() {
    let dir = TempDir::new().unwrap();
    let path = write_table(dir.path(), TABLE, 1_000);
    let table = InteractionTable::load(&path).unwrap();
    assert_eq!(table.len(), 5);

    let selection = DrugSelection::new(["Aspirin", "Lisinopril"]);
    let analysis = analyze(&table, &selection).unwrap();

    assert_eq!(analysis.properties.node_count, 4);
    // Warfarin-Ibuprofen touches neither selected drug
    assert_eq!(analysis.properties.edge_count, 3);
    assert_eq!(analysis.properties.diameter, Diameter::Value(3));
    assert_eq!(analysis.properties.average_degree, 1.5);

    assert_eq!(analysis.pairs.len(), 1);
    assert_eq!(analysis.pairs[0].title(), "Aspirin and Lisinopril");
    assert_eq!(analysis.pairs[0].summary(), "Ibuprofen");
}

#[test]
fn common_interactors_ignore_selection_filter() {
    let table = InteractionTable::from_pairs([("A", "X"), ("X", "Q"), ("B", "Q"), ("B", "X")]);
    let graph = build_graph(&table, &DrugSelection::new(["A", "B"]));
    assert!(graph.contains("X"));

    // Q never touches the selection but still counts as an interactor of X.
    assert_eq!(
        find_common_interactors(&table, ("X", "B")),
        BTreeSet::from(["Q".to_string()])
    );
}

#[test]
fn cache_reloads_only_when_file_changes() {
    let dir = TempDir::new().unwrap();
    let path = write_table(dir.path(), TABLE, 1_000);
    let mut cache = TableCache::new(&path);

    let first = cache.get().unwrap();
    let again = cache.get().unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    write_table(dir.path(), "DrugA,DrugB\nA,B\n", 2_000);
    let reloaded = cache.get().unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = InteractionTable::load(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, NetworkError::Io { .. }));

    let mut cache = TableCache::new(dir.path().join("absent.csv"));
    assert!(cache.get().is_err());
}

#[test]
fn writes_dot_into_created_directory() {
    let dir = TempDir::new().unwrap();
    let table = InteractionTable::from_rows(vec![
        InteractionRow::new("Aspirin", "Warfarin"),
        InteractionRow::new("Warfarin", "Ibuprofen"),
    ]);
    let selection = DrugSelection::new(["Aspirin", "Warfarin"]);
    let analysis = analyze(&table, &selection).unwrap();

    let out_dir = dir.path().join("html_files");
    let colors = RandomPalette::seeded(&selection, 42);
    let path = write_dot(&analysis.graph, &colors, &out_dir, "pyvis_graph.dot").unwrap();

    let dot = fs::read_to_string(&path).unwrap();
    assert_eq!(dot, to_dot(&analysis.graph, &colors));
    assert!(dot.contains("label=\"Ibuprofen\""));
    assert!(dot.contains(&colors.color_for("Aspirin")));
}

#[test]
fn report_serializes_to_json() {
    let table = InteractionTable::from_pairs([("A", "B"), ("A", "C"), ("B", "C"), ("C", "D")]);
    let analysis = analyze(&table, &DrugSelection::new(["A", "D"])).unwrap();
    let json: serde_json::Value = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["properties"]["node_count"], 4);
    // B-A-C-D: row (B,C) touches neither selected drug
    assert_eq!(json["properties"]["edge_count"], 3);
    assert_eq!(json["properties"]["diameter"]["value"], 3);
    assert_eq!(json["pairs"][0]["common"][0], "C");
    assert!(json.get("graph").is_none());
}
