//! End-to-end tests for the run pipeline
//!
//! Rendering goes through a recording renderer so Graphviz is not needed.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use modgraph::{
    error::{ModgraphError, Result},
    models::config::{OutputFormat, Settings},
    output::{ImageFormat, Renderer},
    run,
};

#[derive(Default)]
struct RecordingRenderer {
    descriptions: RefCell<Vec<String>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, description: &str, format: ImageFormat, target: &Path) -> Result<()> {
        assert_eq!(format, ImageFormat::Png);
        fs::write(target, b"\x89PNG")?;
        self.descriptions.borrow_mut().push(description.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn two_package_tree() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pkgA")).unwrap();
    fs::create_dir_all(dir.path().join("pkgB")).unwrap();
    fs::write(
        dir.path().join("pkgA/x.go"),
        "package pkgA\n\nimport \"modbase/pkgB\"\n\nvar _ = pkgB.Y\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("pkgB/y.go"),
        "package pkgB\n\nimport \"fmt\"\n\nvar Y = fmt.Sprint()\n",
    )
    .unwrap();
    dir
}

fn settings(root: &Path, target: Option<PathBuf>) -> Settings {
    Settings {
        scan_path: root.to_path_buf(),
        base_module: "modbase".to_string(),
        output_file: target,
        open_viewer: false,
        show_progress: false,
        ..Default::default()
    }
}

#[test]
fn test_two_package_tree_renders_one_edge() {
    let tree = two_package_tree();
    let out = tempdir().unwrap();
    let target = out.path().join("graph.png");
    let renderer = RecordingRenderer::default();

    let outcome = run(&settings(tree.path(), Some(target.clone())), &renderer).unwrap();

    let packages = outcome.graph.packages();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages["pkgA"], vec!["pkgB".to_string()]);
    assert!(packages["pkgB"].is_empty());

    let descriptions = renderer.descriptions.borrow();
    assert_eq!(descriptions.len(), 1);
    let edges: Vec<&str> = descriptions[0]
        .lines()
        .filter(|line| line.contains("->"))
        .collect();
    assert_eq!(edges, vec!["  \"pkgA\" -> \"pkgB\""]);

    assert_eq!(fs::read(&target).unwrap(), b"\x89PNG");
}

#[test]
fn test_nonexistent_root_renders_nothing() {
    let out = tempdir().unwrap();
    let target = out.path().join("graph.png");
    let renderer = RecordingRenderer::default();

    let err = run(
        &settings(&out.path().join("does-not-exist"), Some(target.clone())),
        &renderer,
    )
    .unwrap_err();

    assert!(matches!(err, ModgraphError::InvalidPath { .. }), "{:?}", err);
    assert_eq!(err.exit_code(), 1);
    assert!(renderer.descriptions.borrow().is_empty());
    assert!(!target.exists());
}

#[test]
fn test_run_is_idempotent() {
    let tree = two_package_tree();
    let out = tempdir().unwrap();
    let renderer = RecordingRenderer::default();

    for name in ["first.png", "second.png"] {
        run(&settings(tree.path(), Some(out.path().join(name))), &renderer).unwrap();
    }

    let descriptions = renderer.descriptions.borrow();
    assert_eq!(descriptions[0], descriptions[1]);
}

#[test]
fn test_dot_output_to_file() {
    let tree = two_package_tree();
    let out = tempdir().unwrap();
    let target = out.path().join("graph.dot");
    let renderer = RecordingRenderer::default();

    let outcome = run(
        &Settings {
            output_format: OutputFormat::Dot,
            show_isolated: true,
            ..settings(tree.path(), Some(target.clone()))
        },
        &renderer,
    )
    .unwrap();

    assert_eq!(outcome.target, Some(target.clone()));
    assert!(renderer.descriptions.borrow().is_empty());
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "digraph G {\n  \"pkgB\"\n  \"pkgA\" -> \"pkgB\"\n}\n"
    );
}

#[test]
fn test_malformed_import_block_aborts_run() {
    let tree = two_package_tree();
    fs::write(
        tree.path().join("pkgB/broken.go"),
        "package pkgB\n\nimport (\n\t\"modbase/pkgA\n",
    )
    .unwrap();
    let out = tempdir().unwrap();
    let target = out.path().join("graph.png");
    let renderer = RecordingRenderer::default();

    let err = run(&settings(tree.path(), Some(target.clone())), &renderer).unwrap_err();

    match err {
        ModgraphError::Parse { path, .. } => assert!(path.ends_with("broken.go")),
        other => panic!("Expected Parse error, got {:?}", other),
    }
    assert!(!target.exists());
}
