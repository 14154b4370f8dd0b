use super::{TABLE_HEADERS, sorted_view, to_row};
use crate::entry::ScheduleEntry;
use chrono::DateTime;
use polars::prelude::*;

/// Preview table as a frame: entry id, calendar date, then the eight display
/// columns in sorted order.
pub fn schedule_frame(entries: &[ScheduleEntry]) -> PolarsResult<DataFrame> {
    let view = sorted_view(entries);
    let rows: Vec<_> = view.iter().map(|entry| to_row(entry)).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(TABLE_HEADERS.len() + 2);

    let ids: Vec<String> = view.iter().map(|entry| entry.id.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    columns.push(Series::new(PlSmallStr::from_static("id"), id_refs).into_column());

    let epoch = DateTime::UNIX_EPOCH.date_naive();
    let days: Vec<i32> = view
        .iter()
        .map(|entry| (entry.date.naive() - epoch).num_days() as i32)
        .collect();
    columns.push(
        Series::new(PlSmallStr::from_static("date"), days)
            .cast(&DataType::Date)?
            .into_column(),
    );

    for (idx, name) in TABLE_HEADERS.iter().enumerate() {
        let cells: Vec<&str> = rows.iter().map(|row| row.cells()[idx]).collect();
        columns.push(Series::new((*name).into(), cells).into_column());
    }

    DataFrame::new(columns)
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Boxed plain-text rendering of a frame, one line per row.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| cell_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, value) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(value.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_line(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_line(out: &mut String, values: &[String], widths: &[usize]) {
    out.push('|');
    for (value, width) in values.iter().zip(widths) {
        out.push(' ');
        out.push_str(value);
        let pad = width.saturating_sub(value.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
