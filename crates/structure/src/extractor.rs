use crate::error::{Result, StructureError};
use serde::Serialize;
use tree_sitter::{Node, Parser};

/// Maximum function names collected per file
pub const MAX_FUNCTIONS: usize = 60;
/// Maximum class names collected per file
pub const MAX_CLASSES: usize = 40;
/// Maximum import targets collected per file
pub const MAX_IMPORTS: usize = 80;

/// Bounded structural summary of one source chunk.
///
/// `error` is set (and the lists stay empty) when the source fails to parse;
/// the two outcomes never mix because a Python parse is all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub imports: Vec<String>,
    pub error: Option<String>,
}

/// Tree-sitter backed extractor for Python source text.
///
/// Holds a reusable parser; `extract` walks the entire syntax tree (not just
/// the top level) in preorder, so discovery order is deterministic for
/// identical input.
pub struct StructureExtractor {
    parser: Parser,
}

impl StructureExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| StructureError::Language(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Extract declared functions, classes, and import targets from `source`.
    ///
    /// Never fails: broken input is reported via `StructureSummary::error`.
    pub fn extract(&mut self, source: &str) -> StructureSummary {
        let mut out = StructureSummary::default();

        let Some(tree) = self.parser.parse(source, None) else {
            out.error = Some("failed to parse source text".to_string());
            return out;
        };

        let root = tree.root_node();
        if root.has_error() {
            out.error = Some(first_syntax_error(root));
            return out;
        }

        walk_preorder(root, &mut |node| collect_declaration(source, node, &mut out));
        out
    }
}

/// Preorder traversal over the whole tree using a tree cursor.
fn walk_preorder(root: Node<'_>, visit: &mut dyn FnMut(Node<'_>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

fn collect_declaration(source: &str, node: Node<'_>, out: &mut StructureSummary) {
    match node.kind() {
        // Async functions are plain `function_definition` nodes with an
        // `async` modifier in the Python grammar, so they collect identically.
        "function_definition" => {
            if let Some(name) = field_text(source, node, "name") {
                push_capped(&mut out.functions, MAX_FUNCTIONS, name);
            }
        }
        "class_definition" => {
            if let Some(name) = field_text(source, node, "name") {
                push_capped(&mut out.classes, MAX_CLASSES, name);
            }
        }
        "import_statement" => collect_plain_import(source, node, out),
        "import_from_statement" => collect_from_import(source, node, out),
        _ => {}
    }
}

/// `import a.b, c as d` records the dotted module names (`a.b`, `c`) — the
/// original names, not aliases.
fn collect_plain_import(source: &str, node: Node<'_>, out: &mut StructureSummary) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let target = match child.kind() {
            "dotted_name" => node_text(source, child),
            "aliased_import" => field_text(source, child, "name"),
            _ => None,
        };
        if let Some(target) = target {
            push_capped(&mut out.imports, MAX_IMPORTS, target);
        }
    }
}

/// `from m import a, b as c` records module-qualified names (`m.a`, `m.b`);
/// a bare relative source (`from . import x`) records just the symbol.
fn collect_from_import(source: &str, node: Node<'_>, out: &mut StructureSummary) {
    let module_node = node.child_by_field_name("module_name");
    let module = module_node
        .and_then(|n| node_text(source, n))
        .map(|text| text.trim_start_matches('.').to_string())
        .unwrap_or_default();
    let module_id = module_node.map(|n| n.id());

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if Some(child.id()) == module_id {
            continue;
        }
        let symbol = match child.kind() {
            "dotted_name" => node_text(source, child),
            "aliased_import" => field_text(source, child, "name"),
            "wildcard_import" => Some("*".to_string()),
            _ => None,
        };
        let Some(symbol) = symbol else { continue };
        let target = if module.is_empty() {
            symbol
        } else {
            format!("{module}.{symbol}")
        };
        push_capped(&mut out.imports, MAX_IMPORTS, target);
    }
}

fn field_text(source: &str, node: Node<'_>, field: &str) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|child| node_text(source, child))
}

fn node_text(source: &str, node: Node<'_>) -> Option<String> {
    node.utf8_text(source.as_bytes())
        .ok()
        .map(|text| text.to_string())
}

fn push_capped(list: &mut Vec<String>, cap: usize, value: String) {
    if list.len() < cap {
        list.push(value);
    }
}

/// Locate the first error or missing node for the summary's error message.
fn first_syntax_error(root: Node<'_>) -> String {
    let mut location = None;
    walk_preorder(root, &mut |node| {
        if location.is_none() && (node.is_error() || node.is_missing()) {
            let pos = node.start_position();
            location = Some((pos.row + 1, pos.column + 1));
        }
    });
    match location {
        Some((line, column)) => format!("syntax error at line {line}, column {column}"),
        None => "syntax error".to_string(),
    }
}
