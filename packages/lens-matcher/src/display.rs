//! Terminal tables for search results and generated names.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::report::UniqueCounts;
use crate::search::SearchResult;

const CONTEXT_PREVIEW_LINES: usize = 3;
const CONTEXT_PREVIEW_CHARS: usize = 150;

/// First three context lines on one line, cut to 150 chars with `...`.
/// Falls back to the API-provided name when there is no context.
pub fn context_preview(result: &SearchResult) -> String {
    let context = if result.context_lines.is_empty() {
        result.matched_name.clone()
    } else {
        result
            .context_lines
            .iter()
            .take(CONTEXT_PREVIEW_LINES)
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    if context.chars().count() > CONTEXT_PREVIEW_CHARS {
        let cut: String = context.chars().take(CONTEXT_PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        context
    }
}

/// Bold header row; columns fit the terminal width.
pub fn new_table<S: ToString>(headers: &[S]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_string()).add_attribute(Attribute::Bold)),
        );
    table
}

/// One row with a foreground colour per column.
pub fn colored_row(cells: Vec<String>, colors: &[Color]) -> Vec<Cell> {
    cells
        .into_iter()
        .zip(colors.iter().copied())
        .map(|(text, color)| Cell::new(text).fg(color))
        .collect()
}

pub fn results_table(results: &[SearchResult]) -> Table {
    let show_values = results.iter().any(SearchResult::has_extracted_values);

    let mut headers = vec!["Repository", "File Path", "Context"];
    let mut colors = vec![Color::Cyan, Color::Magenta, Color::White];
    if show_values {
        headers.push("Extracted Values");
        colors.push(Color::Green);
    }
    headers.push("URL");
    colors.push(Color::Blue);

    let mut table = new_table(&headers);
    for result in results {
        let mut row = vec![
            result.repository.clone(),
            result.file_path.clone(),
            context_preview(result),
        ];
        if show_values {
            row.push(result.extracted_values.join(", "));
        }
        row.push(result.url.clone());
        table.add_row(colored_row(row, &colors));
    }

    table
}

pub fn print_results_table(results: &[SearchResult]) {
    println!("{}", "Code Search Results".bold());
    println!("{}", results_table(results));
}

pub fn print_unique_summary(entry_count: usize, counts: UniqueCounts) {
    println!("{}", "Label Summary".bold());
    println!("  Extracted values:     {}", entry_count.to_string().green());
    println!("  Unique names:         {}", counts.names.to_string().green());
    println!("  Unique components:    {}", counts.components.to_string().green());
}
