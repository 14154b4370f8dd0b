use escala::calendar::CalendarDate;
use escala::entry::{AttendanceTemplate, derive_entries};
use escala::metadata::HeaderData;
use escala::render::{
    DocumentLayout, ExportError, TABLE_HEADERS, render_document, save_document,
    save_schedule_csv, write_schedule_csv,
};
use escala::selection::SelectionSet;
use escala::ScheduleEntry;
use std::fs;
use tempfile::tempdir;

fn d(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

fn sample_entries() -> Vec<ScheduleEntry> {
    let selection: SelectionSet = [d(2024, 5, 10), d(2024, 5, 3)].into_iter().collect();
    let template = AttendanceTemplate::new("Dr. Ana Souza", "Cardiologia")
        .with_times(["8h", "14h"])
        .with_quantities(2, 0, 1);
    derive_entries(&selection, &template).unwrap()
}

fn may_header() -> HeaderData {
    HeaderData::new("APAE DE COLINAS", "MAIO/2024")
}

/// Page text is written as WinAnsi hex strings; Latin-1 characters map to the same byte.
fn win_ansi_hex(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| format!("{:02X}", c as u32))
        .collect::<String>()
        .into_bytes()
}

fn find(haystack: &[u8], text: &str) -> Option<usize> {
    let needle = win_ansi_hex(text);
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
}

#[test]
fn rendered_bytes_are_a_pdf() {
    let bytes = render_document(&sample_entries(), &may_header(), &DocumentLayout::default())
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn document_text_is_upper_cased_and_sorted() {
    let later: SelectionSet = [d(2024, 5, 10)].into_iter().collect();
    let earlier: SelectionSet = [d(2024, 5, 3)].into_iter().collect();
    let mut entries =
        derive_entries(&later, &AttendanceTemplate::new("zélia prado", "ortopedia")).unwrap();
    entries.extend(
        derive_entries(&earlier, &AttendanceTemplate::new("bruno lima", "pediatria")).unwrap(),
    );

    let header = HeaderData::new("apae de colinas", "maio/2024");
    let bytes = render_document(&entries, &header, &DocumentLayout::default()).unwrap();

    let month_label = find(&bytes, "REFERENTE AO MÊS:").expect("month label");
    let month = find(&bytes, "MAIO/2024").expect("upper-cased month");
    let unit = find(&bytes, "APAE DE COLINAS").expect("upper-cased unit");
    assert!(month_label < month && month < unit);
    assert!(find(&bytes, "UNIDADE:").is_some());
    assert!(find(&bytes, "maio/2024").is_none());

    let column_header = find(&bytes, "NOME DO MÉDICO").expect("table header row");
    let first_row = find(&bytes, "BRUNO LIMA").expect("row for the 3rd");
    let second_row = find(&bytes, "ZÉLIA PRADO").expect("row for the 10th");
    assert!(column_header < first_row);
    assert!(first_row < second_row);
    assert!(find(&bytes, "PEDIATRIA").is_some());
    assert!(find(&bytes, "SEXTA-FEIRA").is_some());
}

#[test]
fn empty_schedule_still_renders_header_page() {
    let bytes = render_document(&[], &may_header(), &DocumentLayout::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn multi_page_schedule_renders() {
    let days: SelectionSet = (1..=31).map(|day| d(2024, 5, day)).collect();
    let template = AttendanceTemplate::new("Dr. Ana", "Pediatria").with_times(["8h", "13:30h", "14h"]);
    let entries = derive_entries(&days, &template).unwrap();

    let short = render_document(&entries[..3], &may_header(), &DocumentLayout::default()).unwrap();
    let long = render_document(&entries, &may_header(), &DocumentLayout::default()).unwrap();
    assert!(long.starts_with(b"%PDF"));
    assert!(long.len() > short.len());
}

#[test]
fn save_document_writes_named_file() {
    let dir = tempdir().unwrap();
    let path = save_document(
        &sample_entries(),
        &may_header(),
        &DocumentLayout::default(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(path, dir.path().join("Escala_MAIO_2024.pdf"));
    let written = fs::read(&path).unwrap();
    assert!(written.starts_with(b"%PDF"));
}

#[test]
fn save_document_into_missing_dir_fails_cleanly() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = save_document(
        &sample_entries(),
        &may_header(),
        &DocumentLayout::default(),
        &missing,
    );
    assert!(matches!(result, Err(ExportError::Io(_))));
    assert!(!missing.exists());
}

#[test]
fn csv_lists_sorted_rows_under_header() {
    let mut buf = Vec::new();
    write_schedule_csv(&sample_entries(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], TABLE_HEADERS.join(","));
    assert_eq!(lines[1], "DR. ANA SOUZA,CARDIOLOGIA,SEXTA-FEIRA,3,14h,2,,1");
    assert_eq!(lines[2], "DR. ANA SOUZA,CARDIOLOGIA,SEXTA-FEIRA,3,8h,2,,1");
    assert!(lines[3].contains(",10,14h,"));
    assert!(lines[4].contains(",10,8h,"));
}

#[test]
fn csv_quotes_cells_with_commas() {
    let selection: SelectionSet = [d(2024, 5, 6)].into_iter().collect();
    let template = AttendanceTemplate::new("Souza, Ana", "Pediatria");
    let entries = derive_entries(&selection, &template).unwrap();

    let mut buf = Vec::new();
    write_schedule_csv(&entries, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "SOUZA, ANA");
    assert_eq!(&record[2], "SEGUNDA-FEIRA");
}

#[test]
fn save_csv_into_missing_dir_fails_cleanly() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = save_schedule_csv(&sample_entries(), &may_header(), &missing);
    assert!(matches!(result, Err(ExportError::Io(_))));
    assert!(!missing.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn save_csv_uses_reference_month() {
    let dir = tempdir().unwrap();
    let path = save_schedule_csv(&sample_entries(), &may_header(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Escala_MAIO_2024.csv"));
    assert!(fs::read_to_string(path).unwrap().starts_with("NOME DO MÉDICO"));
}

#[test]
fn layout_overrides_from_json_keep_defaults() {
    let layout = DocumentLayout::from_json_str(r#"{ "table_font_size": 7.0, "title": "ESCALA" }"#)
        .unwrap();
    assert_eq!(layout.table_font_size, 7.0);
    assert_eq!(layout.title, "ESCALA");
    assert_eq!(layout.page_width_mm, DocumentLayout::default().page_width_mm);
    assert_eq!(layout.column_widths_mm, DocumentLayout::default().column_widths_mm);

    let bytes = render_document(&sample_entries(), &may_header(), &layout).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn layout_from_bad_json_is_rejected() {
    assert!(matches!(
        DocumentLayout::from_json_str("{ not json"),
        Err(ExportError::Layout(_))
    ));
    assert!(matches!(
        DocumentLayout::from_json_str(r#"{ "column_widths_mm": [1, 2] }"#),
        Err(ExportError::Layout(_))
    ));
}

#[test]
fn layout_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, br#"{ "margin_left_mm": 20.0, "margin_right_mm": 20.0 }"#)
        .unwrap();

    let json = fs::read_to_string(file.path()).unwrap();
    let layout = DocumentLayout::from_json_str(&json).unwrap();
    assert_eq!(layout.content_width(), 170.0);
}
