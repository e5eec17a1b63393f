//! Package import graph produced by a tree scan

use crate::models::config::LayoutDirection;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from package (directory relative to the scan root) to the
/// module-relative paths it imports.
///
/// Packages are kept sorted so every serialization is reproducible. Each import
/// list keeps discovery order and is never deduplicated: two files in one
/// package importing the same target yield two entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportGraph {
    packages: BTreeMap<String, Vec<String>>,
}

/// A single directed edge borrowed from the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportEdge<'a> {
    /// Importing package
    pub from: &'a str,
    /// Imported module-relative path
    pub to: &'a str,
}

/// Options controlling the DOT description
#[derive(Debug, Clone, Default)]
pub struct DotOptions {
    /// Emit packages without internal imports as bare node statements
    pub show_isolated: bool,
    /// Optional `rankdir` statement
    pub layout_direction: Option<LayoutDirection>,
}

impl ImportGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(package, imports)` pairs
    pub fn from_packages<I, P, T>(packages: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<T>)>,
        P: Into<String>,
        T: Into<String>,
    {
        let mut graph = Self::new();
        for (package, imports) in packages {
            let package = package.into();
            graph.add_package(&package);
            for import in imports {
                graph.add_import(&package, import);
            }
        }
        graph
    }

    /// Register a package, keeping any imports already recorded for it
    pub fn add_package(&mut self, package: &str) {
        self.packages.entry(package.to_string()).or_default();
    }

    /// Append an import target to a package's list
    pub fn add_import(&mut self, package: &str, target: impl Into<String>) {
        self.packages
            .entry(package.to_string())
            .or_default()
            .push(target.into());
    }

    /// Package mapping in sorted key order
    pub fn packages(&self) -> &BTreeMap<String, Vec<String>> {
        &self.packages
    }

    /// Imports recorded for one package
    pub fn imports(&self, package: &str) -> Option<&[String]> {
        self.packages.get(package).map(Vec::as_slice)
    }

    /// Number of packages
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of edges, counting duplicates
    pub fn edge_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    /// Whether no package was found
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// All edges in emission order: packages sorted, imports in discovery order
    pub fn edges(&self) -> impl Iterator<Item = ImportEdge<'_>> {
        self.packages.iter().flat_map(|(from, imports)| {
            imports.iter().map(move |to| ImportEdge {
                from: from.as_str(),
                to: to.as_str(),
            })
        })
    }

    /// Packages that import nothing internal
    pub fn isolated_packages(&self) -> impl Iterator<Item = &str> {
        self.packages
            .iter()
            .filter(|(_, imports)| imports.is_empty())
            .map(|(package, _)| package.as_str())
    }

    /// Render the graph as a Graphviz DOT description
    pub fn to_dot(&self, options: &DotOptions) -> String {
        let mut dot = String::from("digraph G {\n");

        if let Some(direction) = options.layout_direction {
            dot.push_str(&format!("  rankdir={};\n", direction));
        }

        if options.show_isolated {
            for package in self.isolated_packages() {
                dot.push_str(&format!("  {}\n", quote_id(package)));
            }
        }

        for edge in self.edges() {
            dot.push_str(&format!("  {} -> {}\n", quote_id(edge.from), quote_id(edge.to)));
        }

        dot.push_str("}\n");
        dot
    }

    /// Compute summary statistics over the graph
    pub fn statistics(&self) -> GraphStatistics {
        // Edge weights count how many import entries collapse onto one edge.
        let mut graph: DiGraphMap<&str, usize> = DiGraphMap::new();

        for package in self.packages.keys() {
            graph.add_node(package.as_str());
        }
        for edge in self.edges() {
            if let Some(weight) = graph.edge_weight_mut(edge.from, edge.to) {
                *weight += 1;
            } else {
                graph.add_edge(edge.from, edge.to, 1);
            }
        }

        let mut max_fan_in: Option<(String, usize)> = None;
        let mut max_fan_out: Option<(String, usize)> = None;

        for node in graph.nodes() {
            let fan_in = graph.neighbors_directed(node, Direction::Incoming).count();
            let fan_out = graph.neighbors_directed(node, Direction::Outgoing).count();

            if fan_in > 0 && max_fan_in.as_ref().map_or(true, |(_, best)| fan_in > *best) {
                max_fan_in = Some((node.to_string(), fan_in));
            }
            if fan_out > 0 && max_fan_out.as_ref().map_or(true, |(_, best)| fan_out > *best) {
                max_fan_out = Some((node.to_string(), fan_out));
            }
        }

        GraphStatistics {
            total_packages: self.package_count(),
            total_nodes: graph.node_count(),
            total_edges: self.edge_count(),
            distinct_edges: graph.edge_count(),
            isolated_packages: self.isolated_packages().count(),
            max_fan_in,
            max_fan_out,
        }
    }
}

/// Quote a node identifier for DOT, escaping embedded quotes and backslashes
pub fn quote_id(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for ch in id.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Statistics about the import graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    /// Packages found in the tree
    pub total_packages: usize,
    /// Distinct nodes: packages plus imported targets
    pub total_nodes: usize,
    /// Import entries, duplicates included
    pub total_edges: usize,
    /// Distinct (package, target) pairs
    pub distinct_edges: usize,
    /// Packages with no internal imports
    pub isolated_packages: usize,
    /// Node imported by the most distinct packages
    pub max_fan_in: Option<(String, usize)>,
    /// Package importing the most distinct targets
    pub max_fan_out: Option<(String, usize)>,
}
