use crate::error::StocktakeResult;
use crate::excel::ExcelExporter;
use crate::layout::{PeriodLabels, OUTPUT_FILE_NAME};
use crate::pipeline;
use crate::transform::{self, TransformOptions};
use crate::types::TransformedTable;
use colored::Colorize;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// Build transform options from the CLI period month
pub fn transform_options(month: u32) -> StocktakeResult<TransformOptions> {
    Ok(TransformOptions {
        period: PeriodLabels::new(month)?,
        ..TransformOptions::default()
    })
}

/// Where `convert` writes when no output path is given: next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(OUTPUT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE_NAME))
}

/// Execute the convert command
pub fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    month: u32,
    verbose: bool,
) -> StocktakeResult<()> {
    let options = transform_options(month)?;
    let output = output.unwrap_or_else(|| default_output_path(&input));

    println!("{}", "📦 Stocktake - Count Template Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading ledger...".cyan());
    }

    let table = pipeline::load_file(&input, &options)?;

    if verbose {
        println!(
            "   {} columns, {} rows after dropping the leading row\n",
            table.columns.len(),
            table.row_count()
        );
        println!("{}", "📊 Writing sheets...".cyan());
    }

    let report = ExcelExporter::new().export_to_file(&table, &output)?;

    if report.sheets.is_empty() {
        println!(
            "{}",
            "⚠️  No rows matched any category - wrote an empty file".yellow()
        );
    } else {
        println!("{}", "✅ Export Complete!".bold().green());
        for sheet in &report.sheets {
            println!("   📄 {} ({} rows)", sheet.name.bright_blue().bold(), sheet.rows);
        }
    }

    if report.unrouted_rows > 0 {
        println!(
            "{}",
            format!(
                "⚠️  {} rows had a category outside every sheet and were left out",
                report.unrouted_rows
            )
            .yellow()
        );
    }

    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Execute the preview command
pub fn preview(input: PathBuf, rows: usize, month: u32) -> StocktakeResult<()> {
    let options = transform_options(month)?;

    println!("{}", "🔍 Stocktake - Preview".bold().green());
    println!("   File: {}\n", input.display());

    let table = pipeline::load_file(&input, &options)?;

    if table.is_empty() {
        println!("{}", "⚠️  No data rows found".yellow());
        return Ok(());
    }

    for line in render_preview(&table, rows) {
        println!("{}", line);
    }

    println!(
        "\n   Showing {} of {} rows",
        rows.min(table.row_count()),
        table.row_count()
    );
    Ok(())
}

/// Render the first `rows` records as aligned text lines (header first)
pub fn render_preview(table: &TransformedTable, rows: usize) -> Vec<String> {
    let records = transform::preview(table, rows);
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.values.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            cells
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|s| s.width())
                .chain(std::iter::once(col.name.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);
    let header: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    lines.push(join_padded(&header, &widths));
    for row in &cells {
        let row: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(join_padded(&row, &widths));
    }
    lines
}

fn join_padded(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
