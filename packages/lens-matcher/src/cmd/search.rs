use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::cli::SearchArgs;
use crate::display::{print_results_table, print_unique_summary};
use crate::report::{build_label_entries, unique_counts, write_tsv, SearchReport, UniqueCounts};
use crate::search::LabelSearcher;
use crate::traits::BaseSearchService;

/// How a search invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing found (or the search failed); no files were written.
    NoMatches,
    Completed(SearchSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub result_count: usize,
    pub entry_count: usize,
    pub unique: UniqueCounts,
    pub json_path: Option<PathBuf>,
    pub tsv_path: Option<PathBuf>,
}

pub async fn run<S: BaseSearchService>(service: S, args: &SearchArgs) -> Result<SearchOutcome> {
    let searcher = LabelSearcher::with_labels(service, &args.labels);
    let patterns = searcher.search_patterns();

    println!("{}", "Lens App Name Matcher".bold().blue());
    println!("Searching for: {}", patterns.join(", ").yellow());
    if let Some(language) = &args.language {
        println!("Language: {}", language.cyan());
    }
    if let Some(repo) = &args.repo {
        println!("Repository: {}", repo.cyan());
    }
    println!();

    let results = searcher
        .search_labels(
            args.language.as_deref(),
            args.repo.as_deref(),
            args.max_results as usize,
        )
        .await;

    if results.is_empty() {
        println!(
            "{}",
            "No code matches found. Try adjusting your search criteria.".red()
        );
        return Ok(SearchOutcome::NoMatches);
    }

    println!("{}", format!("Found {} code matches", results.len()).green());
    println!();
    print_results_table(&results);

    let entries = build_label_entries(&results);
    let unique = unique_counts(&entries);
    print_unique_summary(entries.len(), unique);

    if let Some(path) = &args.output {
        SearchReport::new(
            patterns.clone(),
            args.language.clone(),
            args.repo.clone(),
            &results,
        )
        .write_json(path)?;
        info!(path = %path.display(), results = results.len(), "Wrote JSON report");
        println!("\n{}", format!("Results saved to {}", path.display()).green());
    }

    if let Some(path) = &args.tsv {
        write_tsv(path, &entries)?;
        info!(path = %path.display(), entries = entries.len(), "Wrote TSV report");
        println!(
            "{}",
            format!("Label values saved to {}", path.display()).green()
        );
    }

    Ok(SearchOutcome::Completed(SearchSummary {
        result_count: results.len(),
        entry_count: entries.len(),
        unique,
        json_path: args.output.clone(),
        tsv_path: args.tsv.clone(),
    }))
}
