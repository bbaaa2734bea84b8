use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use comfy_table::Color;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::cli::NamesArgs;
use crate::display::{colored_row, new_table};
use crate::names::{build_repository_query, fetch_repositories, GeneratorConfig, NameGenerator};
use crate::traits::BaseSearchService;

#[derive(Debug, Serialize)]
pub struct NamesReport<'a> {
    pub query: &'a str,
    pub repository_count: usize,
    pub generated_names: &'a [String],
    pub timestamp: String,
}

impl NamesReport<'_> {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize names")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write names to {}", path.display()))
    }
}

/// Lowercase, hyphenated and underscored spellings of a name.
pub fn variations(name: &str) -> Vec<String> {
    vec![
        name.to_lowercase(),
        name.replace(' ', "-").to_lowercase(),
        name.replace(' ', "_").to_lowercase(),
    ]
}

/// Returns the generated names; empty when no repositories were found.
pub async fn run<S, R>(service: &S, args: &NamesArgs, rng: &mut R) -> Result<Vec<String>>
where
    S: BaseSearchService + ?Sized,
    R: Rng + ?Sized,
{
    let config = GeneratorConfig::load(args.config.as_deref())?;
    let query = build_repository_query(args.topic.as_deref(), args.language.as_deref(), args.min_stars);

    println!("{}", "GitHub App Name Generator".bold().blue());
    println!("Search query: {}", query.yellow());
    println!();

    let repos = fetch_repositories(service, &query, args.pages).await;
    if repos.is_empty() {
        println!(
            "{}",
            "No repositories found. Try adjusting your search criteria.".red()
        );
        return Ok(Vec::new());
    }
    println!("{}", format!("Found {} repositories", repos.len()).green());

    let mut generator = NameGenerator::new(config);
    generator.analyze_repositories(&repos);
    let names = generator.generate_names(args.count, args.topic.as_deref(), rng);

    let mut table = new_table(&["Name", "Variations"]);
    for (i, name) in names.iter().enumerate() {
        table.add_row(colored_row(
            vec![format!("{}. {}", i + 1, name), variations(name).join(" | ")],
            &[Color::Cyan, Color::Magenta],
        ));
    }
    println!();
    println!("{}", "Generated App Names".bold());
    println!("{table}");

    if let Some(path) = &args.output {
        NamesReport {
            query: &query,
            repository_count: repos.len(),
            generated_names: &names,
            timestamp: Local::now().to_rfc3339(),
        }
        .write_json(path)?;
        println!("\n{}", format!("Results saved to {}", path.display()).green());
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variations() {
        assert_eq!(
            variations("Rocket Garden"),
            vec!["rocket garden", "rocket-garden", "rocket_garden"]
        );
        assert_eq!(variations("Superhub"), vec!["superhub", "superhub", "superhub"]);
    }
}
