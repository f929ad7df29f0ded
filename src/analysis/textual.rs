//! Regex-based import extraction
//!
//! The fast engine: no parsing, just line-oriented pattern matching. Also
//! the per-file fallback when tree-sitter rejects a source file. Comments
//! and string literals are not understood here, which overcounts slightly;
//! good enough for a ranking heuristic.

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::types::Ecosystem;

lazy_static! {
    // import defaultExport from 'mod' / import { a, b } from "mod"
    static ref JS_IMPORT_FROM: Regex =
        Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?[^;'"]*?from\s+['"]([^'"]+)['"]"#).unwrap();
    // import 'polyfill'
    static ref JS_IMPORT_BARE: Regex =
        Regex::new(r#"(?m)^\s*import\s+['"]([^'"]+)['"]"#).unwrap();
    // export { a } from 'mod' / export * from 'mod'
    static ref JS_EXPORT_FROM: Regex =
        Regex::new(r#"(?m)^\s*export\s+[^;'"]*?from\s+['"]([^'"]+)['"]"#).unwrap();
    // require('mod') and dynamic import('mod')
    static ref JS_REQUIRE: Regex =
        Regex::new(r#"(?:\brequire|\bimport)\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap();

    // use serde::Serialize; / pub use crate::foo; / pub(crate) use x;
    static ref RUST_USE: Regex =
        Regex::new(r"(?m)^\s*(?:pub(?:\s*\([^)]*\))?\s+)?use\s+(?:::)?([A-Za-z_]\w*)").unwrap();
    static ref RUST_EXTERN_CRATE: Regex =
        Regex::new(r"(?m)^\s*(?:pub\s+)?extern\s+crate\s+([A-Za-z_]\w*)").unwrap();

    // import os, sys
    static ref PY_IMPORT: Regex =
        Regex::new(r"(?m)^\s*import\s+([\w.]+(?:\s*,\s*[\w.]+)*)").unwrap();
    // from pkg.sub import thing
    static ref PY_FROM: Regex =
        Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import\b").unwrap();

    // import "pkg" / import alias "pkg"
    static ref GO_IMPORT_SINGLE: Regex =
        Regex::new(r#"(?m)^\s*import\s+(?:[\w.]+\s+)?"([^"]+)""#).unwrap();
    // import ( ... ) blocks
    static ref GO_IMPORT_BLOCK: Regex =
        Regex::new(r"(?s)import\s*\(([^)]*)\)").unwrap();
    static ref GO_QUOTED_PATH: Regex =
        Regex::new(r#"(?m)^\s*(?:[\w.]+\s+)?"([^"]+)""#).unwrap();
}

/// Extracts import statements by pattern matching.
/// Like the AST engine: one entry per statement, duplicates kept.
pub fn extract_references(content: &str, ecosystem: Ecosystem) -> Vec<String> {
    let mut refs = Vec::new();
    match ecosystem {
        Ecosystem::Node => {
            for caps in JS_IMPORT_FROM.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
            for caps in JS_IMPORT_BARE.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
            for caps in JS_EXPORT_FROM.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
            for caps in JS_REQUIRE.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
        }
        Ecosystem::Rust => {
            for caps in RUST_USE.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
            for caps in RUST_EXTERN_CRATE.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
        }
        Ecosystem::Python => {
            for caps in PY_IMPORT.captures_iter(content) {
                // `import os, sys` declares several modules in one statement
                for name in caps[1].split(',') {
                    let name = name.trim();
                    if !name.is_empty() {
                        refs.push(name.to_string());
                    }
                }
            }
            for caps in PY_FROM.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
        }
        Ecosystem::Go => {
            for caps in GO_IMPORT_BLOCK.captures_iter(content) {
                for path in GO_QUOTED_PATH.captures_iter(&caps[1]) {
                    refs.push(path[1].to_string());
                }
            }
            for caps in GO_IMPORT_SINGLE.captures_iter(content) {
                refs.push(caps[1].to_string());
            }
        }
    }
    refs
}
