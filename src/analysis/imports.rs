//! AST-based import extraction
//!
//! Parses source files with tree-sitter and collects one entry per import
//! statement. Returns `None` when the file cannot be parsed so the caller
//! can fall back to the textual engine for that file.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Extracts import statements from file content.
/// One entry per matched statement, in document order; duplicates are
/// deliberately kept so callers can count references.
pub fn extract_imports(content: &str, extension: &str) -> Option<Vec<String>> {
    let mut imports = Vec::new();
    let mut parser = Parser::new();

    let (language, query_str) = match extension {
        "rs" => (
            tree_sitter_rust::LANGUAGE.into(),
            r#"
            (use_declaration argument: (_) @import)
            (extern_crate_declaration name: (identifier) @import)
            "#,
        ),
        "py" => (
            tree_sitter_python::LANGUAGE.into(),
            r#"
            (import_statement name: (_) @import)
            (import_from_statement module_name: (_) @import)
            "#,
        ),
        "js" | "jsx" | "mjs" | "cjs" => (
            tree_sitter_javascript::LANGUAGE.into(),
            r#"
            (import_statement source: (string) @import)
            (export_statement source: (string) @import)
            (call_expression function: (identifier) @func arguments: (arguments (string) @import) (#eq? @func "require"))
            "#,
        ),
        "ts" | "tsx" => (
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            r#"
            (import_statement source: (string) @import)
            (export_statement source: (string) @import)
            (call_expression function: (identifier) @func arguments: (arguments (string) @import) (#eq? @func "require"))
            "#,
        ),
        "go" => (
            tree_sitter_go::LANGUAGE.into(),
            r#"
            (import_spec path: (_) @import)
            "#,
        ),
        _ => return Some(imports),
    };

    if parser.set_language(&language).is_err() {
        return None;
    }

    let tree = parser.parse(content, None)?;

    let query = match Query::new(&language, query_str) {
        Ok(q) => q,
        Err(_) => return None,
    };

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), content.as_bytes());

    while let Some(m) = matches.next() {
        for capture in m.captures {
            // Filter for @import capture.
            // Handles JS require(@func, @import) specifically.
            let capture_name = query.capture_names()[capture.index as usize];
            if capture_name != "import" {
                continue;
            }

            if let Ok(text) = capture.node.utf8_text(content.as_bytes()) {
                let mut clean_text = text.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string();
                if extension == "py" {
                    if let Some(idx) = clean_text.find(" as ") {
                        clean_text = clean_text[..idx].to_string();
                    }
                }
                imports.push(clean_text);
            }
        }
    }

    Some(imports)
}
