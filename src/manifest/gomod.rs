//! go.mod dependency extraction
//!
//! Handles both single-line `require x v1` directives and parenthesized
//! require blocks. `// indirect` requirements are flagged like dev
//! dependencies: declared, but not a direct import of the project.

use anyhow::Result;

use crate::core::types::{Dependency, Ecosystem};

pub fn parse(content: &str) -> Result<Vec<Dependency>> {
    let mut deps = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if in_require_block {
            if line == ")" {
                in_require_block = false;
                continue;
            }
            push_requirement(line, &mut deps);
            continue;
        }

        if line == "require (" {
            in_require_block = true;
            continue;
        }
        if let Some(rest) = line.strip_prefix("require ") {
            let rest = rest.trim();
            if rest == "(" {
                in_require_block = true;
            } else {
                push_requirement(rest, &mut deps);
            }
        }
    }

    Ok(deps)
}

fn push_requirement(line: &str, deps: &mut Vec<Dependency>) {
    let indirect = line.contains("// indirect");
    let line = line.split("//").next().unwrap_or(line).trim();
    let mut parts = line.split_whitespace();
    let (Some(path), Some(version)) = (parts.next(), parts.next()) else {
        return;
    };
    deps.push(Dependency {
        name: path.to_string(),
        requirement: version.to_string(),
        ecosystem: Ecosystem::Go,
        dev: indirect,
    });
}
