use crate::calendar::{day_number_label, weekday_label};
use crate::entry::{EntryId, ScheduleEntry};
use crate::metadata::HeaderData;
use polars::prelude::PolarsError;
use std::cmp::Ordering;
use std::io;
use thiserror::Error;

pub mod csv_export;
pub mod layout;
pub mod pdf;
pub mod table;

pub use csv_export::{save_schedule_csv, write_schedule_csv};
pub use layout::DocumentLayout;
pub use pdf::{TablePlan, plan_table, render_document, save_document};
pub use table::{render_text_table, schedule_frame};

/// Header row shared by the preview, the PDF grid and the CSV export.
pub const TABLE_HEADERS: [&str; 8] = [
    "NOME DO MÉDICO",
    "ESPECIALIDADE",
    "DIA DA SEMANA",
    "DIA(S) DO MÊS",
    "HORA",
    "QTDE 1ª VEZ",
    "QTDE RETORNO",
    "EGRESSO",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the schedule has no entries")]
    NothingToExport,
    #[error("failed to render PDF: {0}")]
    Pdf(String),
    #[error("invalid document layout: {0}")]
    Layout(#[from] serde_json::Error),
    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One display row: the eight cells of the regulatory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub doctor_name: String,
    pub specialty: String,
    pub weekday: String,
    pub day_of_month: String,
    pub time: String,
    pub qty_first: String,
    pub qty_return: String,
    pub qty_egress: String,
}

impl ScheduleRow {
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.doctor_name,
            &self.specialty,
            &self.weekday,
            &self.day_of_month,
            &self.time,
            &self.qty_first,
            &self.qty_return,
            &self.qty_egress,
        ]
    }
}

/// A preview line together with the id its delete control acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub id: EntryId,
    pub row: ScheduleRow,
}

/// Display order: date ascending, then time label compared as a plain string.
pub fn compare_entries(a: &ScheduleEntry, b: &ScheduleEntry) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time))
}

/// Stable sort of `entries` by [`compare_entries`]. Every output goes through here.
pub fn sorted_view<'a, I>(entries: I) -> Vec<&'a ScheduleEntry>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut view: Vec<&ScheduleEntry> = entries.into_iter().collect();
    view.sort_by(|a, b| compare_entries(a, b));
    view
}

pub fn to_row(entry: &ScheduleEntry) -> ScheduleRow {
    ScheduleRow {
        doctor_name: entry.doctor_name.to_uppercase(),
        specialty: entry.specialty.to_uppercase(),
        weekday: weekday_label(entry.date),
        day_of_month: day_number_label(entry.date),
        time: normalize_time(&entry.time),
        qty_first: quantity_cell(entry.qty_first),
        qty_return: quantity_cell(entry.qty_return),
        qty_egress: quantity_cell(entry.qty_egress),
    }
}

/// Sorted rows, ready for any tabular output.
pub fn table_rows(entries: &[ScheduleEntry]) -> Vec<ScheduleRow> {
    sorted_view(entries).into_iter().map(to_row).collect()
}

pub fn preview_rows(entries: &[ScheduleEntry]) -> Vec<PreviewRow> {
    sorted_view(entries)
        .into_iter()
        .map(|entry| PreviewRow {
            id: entry.id,
            row: to_row(entry),
        })
        .collect()
}

/// Appends the hour suffix when the label carries none: "8" becomes "8h",
/// "13:30h" is kept.
pub fn normalize_time(time: &str) -> String {
    if time.contains(['h', 'H']) {
        time.to_string()
    } else {
        format!("{time}h")
    }
}

/// Blank for zero, the number otherwise.
pub fn quantity_cell(quantity: u32) -> String {
    if quantity == 0 {
        String::new()
    } else {
        quantity.to_string()
    }
}

fn file_stem(header: &HeaderData) -> String {
    format!("Escala_{}", header.reference_month.replace(['/', '\\'], "_"))
}

/// `Escala_<reference month>.pdf` with path separators replaced by `_`.
pub fn export_file_name(header: &HeaderData) -> String {
    format!("{}.pdf", file_stem(header))
}

pub fn csv_file_name(header: &HeaderData) -> String {
    format!("{}.csv", file_stem(header))
}
