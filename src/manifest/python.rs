//! requirements.txt and pyproject.toml dependency extraction

use anyhow::Result;
use toml::Value;

use crate::core::types::{Dependency, Ecosystem};

/// Parses a pip requirements file. Lines are `name[extras]==version` with
/// optional environment markers after `;`. Comments, blank lines, pip
/// options (`-r`, `--index-url`) and direct URL/path installs are skipped.
pub fn parse_requirements(content: &str) -> Result<Vec<Dependency>> {
    let mut deps = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if line.contains("://") || line.starts_with('.') || line.starts_with('/') {
            continue;
        }
        let spec = line.split(';').next().unwrap_or(line).trim();
        if let Some((name, requirement)) = split_requirement(spec) {
            deps.push(Dependency {
                name,
                requirement,
                ecosystem: Ecosystem::Python,
                dev: false,
            });
        }
    }
    Ok(deps)
}

/// Splits a PEP 508-ish spec into name and version constraint.
fn split_requirement(spec: &str) -> Option<(String, String)> {
    let end = spec
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(spec.len());
    let name = &spec[..end];
    if name.is_empty() {
        return None;
    }
    let rest = spec[end..].trim_start_matches(|c: char| c == '[');
    // Drop the extras bracket if present, keep whatever constraint follows.
    let requirement = match rest.find(']') {
        Some(close) => rest[close + 1..].trim(),
        None => spec[end..].trim(),
    };
    let requirement = if requirement.is_empty() {
        "*".to_string()
    } else {
        requirement.to_string()
    };
    Some((name.to_string(), requirement))
}

/// Parses pyproject.toml: PEP 621 `[project]` dependencies plus the
/// legacy `[tool.poetry]` tables. The interpreter pin (`python = "^3.11"`)
/// is not a package and gets skipped.
pub fn parse_pyproject(content: &str) -> Result<Vec<Dependency>> {
    let value: Value = toml::from_str(content)?;
    let mut deps = Vec::new();

    if let Some(project) = value.get("project") {
        if let Some(list) = project.get("dependencies").and_then(Value::as_array) {
            collect_pep508(list, false, &mut deps);
        }
        if let Some(groups) = project
            .get("optional-dependencies")
            .and_then(Value::as_table)
        {
            for list in groups.values() {
                if let Some(list) = list.as_array() {
                    collect_pep508(list, true, &mut deps);
                }
            }
        }
    }

    if let Some(poetry) = value.get("tool").and_then(|t| t.get("poetry")) {
        collect_poetry(poetry.get("dependencies"), false, &mut deps);
        collect_poetry(poetry.get("dev-dependencies"), true, &mut deps);
        if let Some(groups) = poetry.get("group").and_then(Value::as_table) {
            for group in groups.values() {
                collect_poetry(group.get("dependencies"), true, &mut deps);
            }
        }
    }

    Ok(deps)
}

fn collect_pep508(list: &[Value], dev: bool, deps: &mut Vec<Dependency>) {
    for entry in list {
        let Some(spec) = entry.as_str() else { continue };
        let spec = spec.split(';').next().unwrap_or(spec).trim();
        if let Some((name, requirement)) = split_requirement(spec) {
            deps.push(Dependency {
                name,
                requirement,
                ecosystem: Ecosystem::Python,
                dev,
            });
        }
    }
}

fn collect_poetry(table: Option<&Value>, dev: bool, deps: &mut Vec<Dependency>) {
    let Some(table) = table.and_then(Value::as_table) else {
        return;
    };
    for (name, spec) in table {
        if name.eq_ignore_ascii_case("python") {
            continue;
        }
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
            ecosystem: Ecosystem::Python,
            dev,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_basic() {
        let content = "\
# web stack
flask==2.3.0
requests>=2.31,<3
numpy
-r other.txt
git+https://github.com/x/y.git
pydantic[email]==2.0 ; python_version >= \"3.8\"
";
        let deps = parse_requirements(content).unwrap();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["flask", "requests", "numpy", "pydantic"]);

        let numpy = deps.iter().find(|d| d.name == "numpy").unwrap();
        assert_eq!(numpy.requirement, "*");

        let pydantic = deps.iter().find(|d| d.name == "pydantic").unwrap();
        assert_eq!(pydantic.requirement, "==2.0");
    }

    #[test]
    fn test_pyproject_pep621() {
        let content = r#"
[project]
name = "demo"
dependencies = ["httpx>=0.24", "click"]

[project.optional-dependencies]
test = ["pytest>=7"]
"#;
        let deps = parse_pyproject(content).unwrap();
        assert_eq!(deps.len(), 3);
        let pytest = deps.iter().find(|d| d.name == "pytest").unwrap();
        assert!(pytest.dev);
        let click = deps.iter().find(|d| d.name == "click").unwrap();
        assert!(!click.dev);
    }

    #[test]
    fn test_pyproject_poetry_skips_python() {
        let content = r#"
[tool.poetry.dependencies]
python = "^3.11"
django = "^4.2"

[tool.poetry.group.dev.dependencies]
black = { version = "^23.0" }
"#;
        let deps = parse_pyproject(content).unwrap();
        assert_eq!(deps.len(), 2);
        assert!(deps.iter().all(|d| d.name != "python"));
        let black = deps.iter().find(|d| d.name == "black").unwrap();
        assert!(black.dev);
        assert_eq!(black.requirement, "^23.0");
    }
}
