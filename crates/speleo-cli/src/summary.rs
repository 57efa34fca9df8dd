use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use speleo_cli::types::{CheckResult, NormalizeResult};
use speleo_model::{TableKind, VocabularyListing};
use speleo_validate::{Gate, Severity, StageStatus, Verdict};

pub fn print_check_summary(result: &CheckResult) {
    print!("{}", result.report.render());
    println!();
    println!("Workbook: {}", result.workbook.display());
    print_table_counts(result);
    print_skipped_stages(result);
    println!("Verdict: {}", verdict_label(result.verdict));
}

fn print_table_counts(result: &CheckResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Warnings"),
        header_cell("Informative"),
        header_cell("Notes"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let diagnostics = result.report.diagnostics();
    let count = |kind: TableKind, severity: Severity| {
        diagnostics
            .iter()
            .filter(|d| d.table == kind && d.severity == severity)
            .count()
    };
    for kind in TableKind::ALL {
        table.add_row(vec![
            sheet_cell(kind),
            count_cell(count(kind, Severity::Warning), Color::Yellow),
            count_cell(count(kind, Severity::Informative), Color::Blue),
            count_cell(count(kind, Severity::Note), Color::Cyan),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(result.report.count(Severity::Warning), Color::Yellow)
            .add_attribute(Attribute::Bold),
        count_cell(result.report.count(Severity::Informative), Color::Blue)
            .add_attribute(Attribute::Bold),
        count_cell(result.report.count(Severity::Note), Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_skipped_stages(result: &CheckResult) {
    let skipped: Vec<_> = result
        .report
        .stages()
        .iter()
        .filter_map(|record| match &record.status {
            StageStatus::Skipped { missing } => Some((record.stage, missing)),
            StageStatus::Ran { .. } => None,
        })
        .collect();
    if skipped.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Skipped stage"), header_cell("Missing")]);
    apply_table_style(&mut table);
    for (stage, missing) in skipped {
        let labels: Vec<&str> = missing.iter().map(Gate::label).collect();
        table.add_row(vec![Cell::new(stage), dim_cell(labels.join(", "))]);
    }
    println!("{table}");
}

pub fn print_normalize_summary(result: &NormalizeResult) {
    println!("Output: {}", result.output_dir.display());
    if result.forced {
        println!("Written despite verdict: {}", verdict_label(result.verdict));
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Converted"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in &result.sheets {
        table.add_row(vec![
            sheet_cell(sheet.table),
            Cell::new(sheet.rows),
            count_cell(sheet.converted, Color::Green),
            dim_cell(sheet.path.display()),
        ]);
    }
    println!("{table}");
    if !result.unresolved.is_empty() {
        eprintln!(
            "Year of chemistry ages left unconverted for: {}",
            result.unresolved.join(", ")
        );
    }
}

pub fn print_vocabularies(listings: &[VocabularyListing]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Column"),
        header_cell("Allowed values"),
    ]);
    apply_table_style(&mut table);
    for listing in listings {
        table.add_row(vec![
            Cell::new(listing.table).fg(Color::Blue),
            Cell::new(listing.columns).add_attribute(Attribute::Bold),
            Cell::new(listing.terms.join(" | ")),
        ]);
    }
    println!("{table}");
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Accept => "accept (no warnings)",
        Verdict::Review => "review (fix the warnings above)",
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn sheet_cell(kind: TableKind) -> Cell {
    Cell::new(kind.sheet_name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
