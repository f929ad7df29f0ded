//! package.json dependency extraction

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Deserialize;

use crate::core::types::{Dependency, Ecosystem};

#[derive(Debug, Deserialize, Default)]
struct PackageJson {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies", default)]
    dev_dependencies: BTreeMap<String, String>,
    #[serde(rename = "peerDependencies", default)]
    peer_dependencies: BTreeMap<String, String>,
    #[serde(rename = "optionalDependencies", default)]
    optional_dependencies: BTreeMap<String, String>,
}

pub fn parse(content: &str) -> Result<Vec<Dependency>> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    let mut deps = Vec::new();

    for (name, requirement) in &pkg.dependencies {
        deps.push(make_dep(name, requirement, false));
    }
    for (name, requirement) in &pkg.peer_dependencies {
        deps.push(make_dep(name, requirement, false));
    }
    for (name, requirement) in &pkg.optional_dependencies {
        deps.push(make_dep(name, requirement, false));
    }
    for (name, requirement) in &pkg.dev_dependencies {
        deps.push(make_dep(name, requirement, true));
    }

    Ok(deps)
}

fn make_dep(name: &str, requirement: &str, dev: bool) -> Dependency {
    Dependency {
        name: name.to_string(),
        requirement: requirement.to_string(),
        ecosystem: Ecosystem::Node,
        dev,
    }
}
