use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::worklog::LogDuration;

/// Elapsed time in the worklog's own notation, normalised: "1h 5m 3s"
pub(crate) fn format_elapsed(seconds: i64) -> String {
    LogDuration::from_seconds(u64::try_from(seconds).unwrap_or(0)).to_string()
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Durations line up on the right
pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    styled_cell(text, color, bold).set_alignment(CellAlignment::Right)
}

/// Table with full UTF-8 borders, a single-line header rule and bold headers
/// (cyan when coloured).
pub(super) fn create_styled_table(headers: &[&str], use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_style(TableComponent::HeaderLines, '─')
        .set_style(TableComponent::LeftHeaderIntersection, '├')
        .set_style(TableComponent::MiddleHeaderIntersections, '┼')
        .set_style(TableComponent::RightHeaderIntersection, '┤');

    let header_color = use_color.then_some(Color::Cyan);
    table.set_header(
        headers
            .iter()
            .map(|h| styled_cell(h, header_color, true))
            .collect::<Vec<_>>(),
    );
    table
}
