//! Command-line behaviour, exercised through the built binary

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;
use modgraph::cli::args::{Args, FormatArg, MatchModeArg};

/// Run the binary in `cwd` with no ambient configuration
fn modgraph(cwd: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_modgraph"));
    command
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG");
    for key in ["ROOT", "MODULE", "TARGET", "FORMAT", "EXCLUDE", "ENGINE", "MATCH_MODE"] {
        command.env_remove(format!("MODGRAPH_{}", key));
    }
    command.output().unwrap()
}

fn create_tree(root: &Path) {
    fs::create_dir_all(root.join("pkgA")).unwrap();
    fs::create_dir_all(root.join("pkgB")).unwrap();
    fs::write(root.join("pkgA/x.go"), "package pkgA\n\nimport \"modbase/pkgB\"\n").unwrap();
    fs::write(root.join("pkgB/y.go"), "package pkgB\n").unwrap();
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["modgraph"]);
    assert_eq!(args.root, None);
    assert_eq!(args.module, None);
    assert_eq!(args.format, None);
    assert!(args.exclude.is_empty());
    assert!(!args.no_open);

    let args = Args::parse_from([
        "modgraph",
        "--root",
        "/src",
        "--module",
        "example.com/app",
        "--format",
        "csv",
        "--match-mode",
        "substring",
        "--max-depth",
        "4",
        "--skip-tests",
        "--strict",
    ]);
    assert_eq!(args.root, Some(PathBuf::from("/src")));
    assert_eq!(args.format, Some(FormatArg::Csv));
    assert_eq!(args.match_mode, Some(MatchModeArg::Substring));
    assert_eq!(args.max_depth, Some(4));
    assert!(args.skip_tests);
    assert!(args.strict);
}

#[test]
fn test_invalid_format_rejected() {
    assert!(Args::try_parse_from(["modgraph", "--format", "svg"]).is_err());
}

#[test]
fn test_dot_to_stdout() {
    let dir = tempdir().unwrap();
    create_tree(dir.path());

    let output = modgraph(
        dir.path(),
        &["--module", "modbase", "--format", "dot", "--no-progress", "--quiet"],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "digraph G {\n  \"pkgA\" -> \"pkgB\"\n}\n"
    );
}

#[test]
fn test_missing_root_exits_with_error() {
    let dir = tempdir().unwrap();

    let output = modgraph(
        dir.path(),
        &["--root", "nope", "--module", "modbase", "--format", "dot"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}

#[test]
fn test_missing_module_is_critical() {
    let dir = tempdir().unwrap();
    create_tree(dir.path());

    let output = modgraph(dir.path(), &["--format", "dot"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("base module"));
}

#[test]
fn test_missing_engine_fails_png_render() {
    let dir = tempdir().unwrap();
    create_tree(dir.path());

    let output = modgraph(
        dir.path(),
        &[
            "--module",
            "modbase",
            "--target",
            "graph.png",
            "--engine",
            "modgraph-no-such-program",
            "--no-open",
            "--no-progress",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("modgraph-no-such-program"));
    assert!(!dir.path().join("graph.png").exists());
}

#[test]
fn test_init_then_run_from_config() {
    let dir = tempdir().unwrap();
    create_tree(dir.path());

    let output = modgraph(dir.path(), &["--init"]);
    assert!(output.status.success());
    let config_path = dir.path().join(".modgraph.toml");
    assert!(config_path.exists());

    let config = fs::read_to_string(&config_path)
        .unwrap()
        .replace("# base_module = \"example.com/app\"", "base_module = \"modbase\"")
        .replace("output_format = \"png\"", "output_format = \"csv\"");
    fs::write(&config_path, config).unwrap();

    let output = modgraph(dir.path(), &["--quiet", "--no-progress"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "package,import\npkgA,pkgB\npkgB,\n"
    );
}
