//! Cargo.toml dependency extraction
//!
//! Walks the dependency tables as a generic `toml::Value` instead of a
//! typed struct; Cargo manifests mix string and table forms freely and we
//! only need names and requirement strings.

use anyhow::Result;
use toml::Value;

use crate::core::types::{Dependency, Ecosystem};

pub fn parse(content: &str) -> Result<Vec<Dependency>> {
    let value: Value = toml::from_str(content)?;
    let mut deps = Vec::new();

    collect_table(value.get("dependencies"), false, &mut deps);
    collect_table(value.get("build-dependencies"), false, &mut deps);
    collect_table(value.get("dev-dependencies"), true, &mut deps);

    // [workspace.dependencies] declares versions for every member.
    if let Some(workspace) = value.get("workspace") {
        collect_table(workspace.get("dependencies"), false, &mut deps);
    }

    // [target.'cfg(...)'.dependencies] and friends.
    if let Some(targets) = value.get("target").and_then(Value::as_table) {
        for target in targets.values() {
            collect_table(target.get("dependencies"), false, &mut deps);
            collect_table(target.get("build-dependencies"), false, &mut deps);
            collect_table(target.get("dev-dependencies"), true, &mut deps);
        }
    }

    Ok(deps)
}

fn collect_table(table: Option<&Value>, dev: bool, deps: &mut Vec<Dependency>) {
    let Some(table) = table.and_then(Value::as_table) else {
        return;
    };
    for (name, spec) in table {
        // `package = "..."` renames the crate on the registry; the table key
        // stays the name used in source, which is what usage matching needs.
        let requirement = match spec {
            Value::String(version) => version.clone(),
            Value::Table(t) => t
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or("*")
                .to_string(),
            _ => "*".to_string(),
        };
        deps.push(Dependency {
            name: name.clone(),
            requirement,
            ecosystem: Ecosystem::Rust,
            dev,
        });
    }
}
