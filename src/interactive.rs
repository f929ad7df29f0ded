//! Interactive registration flow
//!
//! Running `heft` with no subcommand lands here: a short prompt that
//! registers one directory, the same operation as `heft add`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::registry::Registry;

pub fn register_interactively() -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "heft: register a project directory".bold());

    let location = Registry::location();
    let mut registry = Registry::load_or_default(&location);
    if !registry.is_empty() {
        println!(
            "{} director{} registered so far. `heft analyze` scores them all.",
            registry.len(),
            if registry.len() == 1 { "y" } else { "ies" }
        );
    }

    let input: String = Input::with_theme(&theme)
        .with_prompt("Directory to register")
        .interact()?;

    let path = expand_home(input.trim());
    let metadata = std::fs::metadata(&path)
        .with_context(|| format!("cannot register {}", path.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    if !registry.add(path.clone()) {
        println!("{} is already registered", path.display());
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&theme)
        .with_prompt(format!("Register {}?", path.display()))
        .default(true)
        .interact()?;
    if !confirmed {
        println!("Nothing registered.");
        return Ok(());
    }

    registry.save(&location).context("failed to save registry")?;
    println!("{} Registered {}", "✓".green(), path.display());
    println!("Run `heft analyze` to score it.");
    Ok(())
}

/// Expands a leading `~/` against the user's home directory.
fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}
