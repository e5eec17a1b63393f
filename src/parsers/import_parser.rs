//! AST parser wrapper using tree-sitter
//!
//! Only the package clause and the import declarations of a Go file are
//! inspected. Syntax errors past the import block are tolerated unless the
//! parser runs in strict mode.

use crate::error::{ModgraphError, Result};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// One `import` spec as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Raw path literal, quotes included
    pub path_literal: String,
    /// Local name (`alias`, `.` or `_`) if one was given
    pub alias: Option<String>,
    /// 1-based line of the spec
    pub line: usize,
}

/// Imports extracted from a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileImports {
    /// Name from the package clause
    pub package_name: String,
    /// Import specs in source order
    pub imports: Vec<ImportSpec>,
}

/// Go import parser backed by tree-sitter
pub struct ImportParser {
    parser: Parser,
    strict: bool,
}

impl ImportParser {
    /// Create a parser that tolerates syntax errors outside the import block
    pub fn new() -> Result<Self> {
        Self::with_strict(false)
    }

    /// Create a parser; in strict mode any syntax error in the file is fatal
    pub fn with_strict(strict: bool) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ModgraphError::ParserSetup {
                message: format!("Failed to set Go language: {}", e),
            })?;

        Ok(Self { parser, strict })
    }

    /// Read a file and extract its imports
    ///
    /// The file is read completely and closed before parsing starts.
    pub fn parse_file(&mut self, path: &Path) -> Result<FileImports> {
        let source = fs::read(path).map_err(|e| ModgraphError::read_error(path, e))?;
        self.parse_source(&source, path)
    }

    /// Extract imports from in-memory source; `path` is used for error reporting
    pub fn parse_source(&mut self, source: &[u8], path: &Path) -> Result<FileImports> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ModgraphError::parse_error(path, "parser produced no syntax tree"))?;
        let root = tree.root_node();

        let mut package_clause = None;
        let mut declarations = Vec::new();
        // End of the package clause and import block, including broken pieces of them.
        let mut header_end = 0;
        {
            let mut cursor = root.walk();
            for child in root.named_children(&mut cursor) {
                match child.kind() {
                    "package_clause" if package_clause.is_none() => {
                        package_clause = Some(child);
                        header_end = header_end.max(child.end_byte());
                    }
                    "import_declaration" => {
                        declarations.push(child);
                        header_end = header_end.max(child.end_byte());
                    }
                    _ if child.is_error() && is_header_fragment(child) => {
                        header_end = header_end.max(child.end_byte());
                    }
                    _ => {}
                }
            }
        }

        // Syntax errors are only fatal inside the header.
        let limit = if self.strict { usize::MAX } else { header_end };

        if let Some(error) = first_error_before(root, limit) {
            return Err(syntax_error(path, error));
        }

        let package_clause = match package_clause {
            Some(node) => node,
            None => {
                return Err(match first_error_before(root, usize::MAX) {
                    Some(error) => syntax_error(path, error),
                    None => ModgraphError::parse_error(path, "expected 'package' clause"),
                })
            }
        };

        let package_name = package_clause
            .named_child(0)
            .map(|name| node_text(name, source, path))
            .transpose()?
            .unwrap_or_default()
            .to_string();

        let mut imports = Vec::new();
        for declaration in declarations {
            collect_specs(declaration, source, path, &mut imports)?;
        }

        Ok(FileImports {
            package_name,
            imports,
        })
    }
}

/// Walk an `import_declaration` or `import_spec_list`
fn collect_specs(node: Node<'_>, source: &[u8], path: &Path, out: &mut Vec<ImportSpec>) -> Result<()> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => out.push(spec_from_node(child, source, path)?),
            "import_spec_list" => collect_specs(child, source, path, out)?,
            _ => {}
        }
    }
    Ok(())
}

fn spec_from_node(node: Node<'_>, source: &[u8], path: &Path) -> Result<ImportSpec> {
    let literal = node
        .child_by_field_name("path")
        .ok_or_else(|| syntax_error(path, node))?;

    let alias = node
        .child_by_field_name("name")
        .map(|name| node_text(name, source, path).map(str::to_string))
        .transpose()?;

    Ok(ImportSpec {
        path_literal: node_text(literal, source, path)?.to_string(),
        alias,
        line: node.start_position().row + 1,
    })
}

fn node_text<'s>(node: Node<'_>, source: &'s [u8], path: &Path) -> Result<&'s str> {
    node.utf8_text(source).map_err(|e| {
        ModgraphError::parse_error(
            path,
            format!("invalid UTF-8 at line {}: {}", node.start_position().row + 1, e),
        )
    })
}

/// Whether a top-level error node swallowed a package clause or import
fn is_header_fragment(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| {
        matches!(
            child.kind(),
            "package" | "package_clause" | "import" | "import_declaration" | "import_spec" | "import_spec_list"
        )
    });
    found
}

/// First error or missing node starting before `limit`, in document order
fn first_error_before(node: Node<'_>, limit: usize) -> Option<Node<'_>> {
    if node.start_byte() >= limit {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_error_before(child, limit))
}

fn syntax_error(path: &Path, node: Node<'_>) -> ModgraphError {
    let position = node.start_position();
    let what = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        "syntax error".to_string()
    };

    ModgraphError::parse_error(
        path,
        format!("{} at line {}, column {}", what, position.row + 1, position.column + 1),
    )
}
