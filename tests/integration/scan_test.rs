//! Tree scanning against realistic Go layouts

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modgraph::{
    core::{ScanOptions, TreeScanner},
    error::ModgraphError,
    models::config::MatchMode,
    scan_tree,
};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small service laid out the way Go projects usually are
fn create_service(root: &Path) {
    write(
        root,
        "main.go",
        r#"package main

import (
	"fmt"
	"os"

	"example.com/svc/cmd"
)

func main() {
	if err := cmd.Execute(); err != nil {
		fmt.Println(err)
		os.Exit(1)
	}
}
"#,
    );
    write(
        root,
        "cmd/root.go",
        r#"package cmd

import (
	"github.com/spf13/cobra"

	"example.com/svc/internal/server"
	store "example.com/svc/internal/storage"
)

var root = &cobra.Command{Use: "svc"}

func Execute() error { return root.Execute() }
"#,
    );
    write(
        root,
        "internal/server/server.go",
        r#"// Package server serves HTTP.
package server

import (
	"net/http"

	"example.com/svc/internal/storage"
)

type Server struct{ db *storage.DB }

func (s *Server) ServeHTTP(w http.ResponseWriter, r *http.Request) {}
"#,
    );
    write(
        root,
        "internal/server/server_test.go",
        r#"package server

import (
	"testing"

	"example.com/svc/internal/testutil"
)

func TestServer(t *testing.T) { testutil.Setup(t) }
"#,
    );
    write(
        root,
        "internal/storage/db.go",
        "package storage\n\ntype DB struct{}\n",
    );
    write(
        root,
        "vendor/github.com/spf13/cobra/cobra.go",
        "package cobra\n\nimport \"example.com/svc/leak\"\n",
    );
    write(root, "README.md", "# svc\n");
}

#[test]
fn test_service_graph() {
    let dir = tempdir().unwrap();
    create_service(dir.path());

    let mut options = ScanOptions::new(dir.path(), "example.com/svc");
    options.exclude_patterns = vec!["vendor".to_string()];
    let graph = TreeScanner::new(options).unwrap().scan().unwrap();

    let root_key = dir.path().to_string_lossy().into_owned();
    let mut expected = vec![root_key.as_str(), "cmd", "internal/server", "internal/storage"];
    expected.sort();
    let packages: Vec<&str> = graph.packages().keys().map(String::as_str).collect();
    assert_eq!(packages, expected);
    assert_eq!(graph.imports(&root_key).unwrap(), ["cmd"]);
    assert_eq!(
        graph.imports("cmd").unwrap(),
        ["internal/server", "internal/storage"]
    );
    assert_eq!(
        graph.imports("internal/server").unwrap(),
        ["internal/storage", "internal/testutil"]
    );
    assert!(graph.imports("internal/storage").unwrap().is_empty());
}

#[test]
fn test_scanning_twice_is_identical() {
    let dir = tempdir().unwrap();
    create_service(dir.path());

    let first = scan_tree(dir.path(), "example.com/svc").unwrap();
    let second = scan_tree(dir.path(), "example.com/svc").unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_unexcluded_vendor_is_scanned() {
    let dir = tempdir().unwrap();
    create_service(dir.path());

    let graph = scan_tree(dir.path(), "example.com/svc").unwrap();
    assert_eq!(
        graph.imports("vendor/github.com/spf13/cobra").unwrap(),
        ["leak"]
    );
}

#[test]
fn test_substring_and_segment_prefix_modes() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "a/a.go",
        "package a\n\nimport (\n\t\"github.com/foo/bar\"\n\t\"github.com/notfoo/bar\"\n\t\"github.com/baz/qux\"\n)\n",
    );

    let substring = scan_tree(dir.path(), "foo").unwrap();
    assert_eq!(
        substring.imports("a").unwrap(),
        ["github.com/foo/bar", "github.com/notfoo/bar"]
    );

    let mut options = ScanOptions::new(dir.path(), "github.com/foo");
    options.match_mode = MatchMode::SegmentPrefix;
    let prefix = TreeScanner::new(options).unwrap().scan().unwrap();
    assert_eq!(prefix.imports("a").unwrap(), ["bar"]);
}

#[test]
fn test_file_without_internal_imports_leaves_list_empty() {
    let dir = tempdir().unwrap();
    write(dir.path(), "util/strings.go", "package util\n\nimport \"strings\"\n");

    let graph = scan_tree(dir.path(), "example.com/svc").unwrap();
    assert_eq!(graph.package_count(), 1);
    assert!(graph.imports("util").unwrap().is_empty());
}

#[test]
fn test_broken_declaration_after_imports_is_tolerated() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/a.go", "package a\n\nimport \"m/b\"\n\ntype T struct {\n  a int\n");
    write(dir.path(), "b/b.go", "package b\n\nimport \"m/c\"\n\n}}}\n");

    let graph = scan_tree(dir.path(), "m").unwrap();
    assert_eq!(graph.imports("a").unwrap(), ["b"]);
    assert_eq!(graph.imports("b").unwrap(), ["c"]);
}

#[test]
fn test_strict_mode_rejects_body_errors() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "a/a.go",
        "package a\n\nimport \"m/b\"\n\nfunc f() {\n    if x := ; {\n}\n",
    );

    let mut options = ScanOptions::new(dir.path(), "m");
    options.strict_syntax = true;

    let err = TreeScanner::new(options).unwrap().scan().unwrap_err();
    assert!(matches!(err, ModgraphError::Parse { .. }), "{:?}", err);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_only_followed_on_request() {
    let dir = tempdir().unwrap();
    let outside = tempdir().unwrap();
    write(outside.path(), "ext.go", "package ext\n\nimport \"m/core\"\n");
    std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

    let graph = scan_tree(dir.path(), "m").unwrap();
    assert!(graph.imports("linked").is_none());

    let mut options = ScanOptions::new(dir.path(), "m");
    options.follow_links = true;
    let graph = TreeScanner::new(options).unwrap().scan().unwrap();
    assert_eq!(graph.imports("linked").unwrap(), ["core"]);
}
