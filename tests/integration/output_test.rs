//! Output formats written through the pipeline

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modgraph::{
    models::config::{LayoutDirection, OutputFormat, Settings},
    output::{create_formatter, Formatter, GraphvizRenderer},
    run, ImportGraph,
};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_tree(root: &Path) {
    write(root, "api/api.go", "package api\n\nimport (\n\t\"m/db\"\n\t\"m/log\"\n)\n");
    write(root, "api/routes.go", "package api\n\nimport \"m/db\"\n");
    write(root, "db/db.go", "package db\n\nimport \"m/log\"\n");
    write(root, "log/log.go", "package log\n");
}

fn settings(root: &Path, format: OutputFormat, target: &Path) -> Settings {
    Settings {
        scan_path: root.to_path_buf(),
        base_module: "m".to_string(),
        output_format: format,
        output_file: Some(target.to_path_buf()),
        open_viewer: false,
        show_progress: false,
        ..Default::default()
    }
}

#[test]
fn test_json_output() {
    let tree = tempdir().unwrap();
    create_tree(tree.path());
    let out = tempdir().unwrap();
    let target = out.path().join("graph.json");

    // Text formats never invoke the renderer, even a broken one.
    let renderer = GraphvizRenderer::new("modgraph-no-such-program");
    run(&settings(tree.path(), OutputFormat::Json, &target), &renderer).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(value["base_module"], "m");
    assert_eq!(value["packages"]["api"], serde_json::json!(["db", "log", "db"]));
    assert_eq!(value["packages"]["db"], serde_json::json!(["log"]));
    assert_eq!(value["packages"]["log"], serde_json::json!([]));
    assert_eq!(value["statistics"]["total_edges"], 4);
    assert_eq!(value["statistics"]["distinct_edges"], 3);

    let packages: ImportGraph = serde_json::from_value(value["packages"].clone()).unwrap();
    assert_eq!(packages.package_count(), 3);
}

#[test]
fn test_csv_output() {
    let tree = tempdir().unwrap();
    create_tree(tree.path());
    let out = tempdir().unwrap();
    let target = out.path().join("graph.csv");

    run(
        &settings(tree.path(), OutputFormat::Csv, &target),
        &GraphvizRenderer::default(),
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "package,import\napi,db\napi,log\napi,db\ndb,log\nlog,\n"
    );
}

#[test]
fn test_dot_keeps_duplicate_edges_and_layout() {
    let tree = tempdir().unwrap();
    create_tree(tree.path());
    let out = tempdir().unwrap();
    let target = out.path().join("graph.dot");

    run(
        &Settings {
            layout_direction: Some(LayoutDirection::Rl),
            ..settings(tree.path(), OutputFormat::Dot, &target)
        },
        &GraphvizRenderer::default(),
    )
    .unwrap();

    let dot = fs::read_to_string(&target).unwrap();
    assert!(dot.starts_with("digraph G {\n  rankdir=RL;\n"));
    assert_eq!(dot.matches("\"api\" -> \"db\"").count(), 2);
    assert_eq!(dot.matches("->").count(), 4);
}

#[test]
fn test_formatter_matches_pipeline_output() {
    let tree = tempdir().unwrap();
    create_tree(tree.path());
    let out = tempdir().unwrap();
    let target = out.path().join("graph.dot");
    let settings = settings(tree.path(), OutputFormat::Dot, &target);

    let outcome = run(&settings, &GraphvizRenderer::default()).unwrap();
    let formatted = create_formatter(&settings).format(&outcome.graph).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), formatted);
}
