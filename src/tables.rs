use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{engine::CalculationEntry, session::Summary};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_entries_table(entries: &[CalculationEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "#", "Time", "Gates", "Duration", "Requested", "Used", "Rate", "Discharge",
    ]);
    for (index, entry) in entries.iter().enumerate() {
        let height_color = if entry.is_exact { Color::Reset } else { Color::DarkYellow };
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(entry.timestamp.format("%H:%M:%S")).add_attribute(Attribute::Dim),
            Cell::new(entry.gate_count).set_alignment(CellAlignment::Right),
            Cell::new(entry.duration).set_alignment(CellAlignment::Right),
            Cell::new(entry.requested_height).set_alignment(CellAlignment::Right),
            Cell::new(entry.resolved_height).set_alignment(CellAlignment::Right).fg(height_color),
            Cell::new(entry.rate).set_alignment(CellAlignment::Right).fg(height_color),
            Cell::new(entry.discharge).set_alignment(CellAlignment::Right).fg(Color::Green),
        ]);
    }
    table
}

pub fn build_summary_table(summary: Option<Summary>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Entries", "Total discharge", "Average discharge"]);
    match summary {
        Some(summary) => {
            table.add_row(vec![
                Cell::new(summary.count).set_alignment(CellAlignment::Right),
                Cell::new(summary.total).set_alignment(CellAlignment::Right).fg(Color::Green),
                Cell::new(summary.average).set_alignment(CellAlignment::Right),
            ]);
        }
        None => {
            table.add_row(vec![
                Cell::new(0).set_alignment(CellAlignment::Right),
                Cell::new("n/a").add_attribute(Attribute::Dim),
                Cell::new("n/a").add_attribute(Attribute::Dim),
            ]);
        }
    }
    table
}
