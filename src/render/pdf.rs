use super::layout::DocumentLayout;
use super::{ExportError, ScheduleRow, TABLE_HEADERS, export_file_name, table_rows};
use crate::entry::ScheduleEntry;
use crate::metadata::HeaderData;
use log::{info, warn};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.15;

/// Header field geometry, relative to the top of the title bar.
const MONTH_FIELD_OFFSET_MM: f32 = 14.0;
const UNIT_FIELD_OFFSET_MM: f32 = 23.0;
const FIELD_LABEL_WIDTH_MM: f32 = 41.0;
const FIELD_BOX_HEIGHT_MM: f32 = 6.0;
const FIELD_BASELINE_MM: f32 = 4.0;
const MONTH_BOX_WIDTH_MM: f32 = 60.0;
const UNIT_TEXT_INSET_MM: f32 = 2.0;

/// One table row after wrapping: the lines of each cell and the row height.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRow {
    pub lines: Vec<Vec<String>>,
    pub height_mm: f32,
}

/// Rows of the grid split into pages. The header row repeats on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub header: PlannedRow,
    pub pages: Vec<Vec<PlannedRow>>,
}

impl TablePlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Lays `rows` out into pages without drawing anything.
pub fn plan_table(rows: &[ScheduleRow], layout: &DocumentLayout) -> TablePlan {
    let widths = layout.column_widths();
    let header = plan_row(&TABLE_HEADERS, &widths, layout, true);
    let bottom = layout.page_height_mm - layout.margin_bottom_mm;

    let mut pages = Vec::new();
    let mut current: Vec<PlannedRow> = Vec::new();
    let mut cursor = layout.table_top_mm + header.height_mm;

    for row in rows {
        let planned = plan_row(&row.cells(), &widths, layout, false);
        if cursor + planned.height_mm > bottom && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            cursor = layout.margin_top_mm + header.height_mm;
        }
        cursor += planned.height_mm;
        current.push(planned);
    }
    pages.push(current);

    TablePlan { header, pages }
}

fn plan_row(cells: &[&str], widths: &[f32], layout: &DocumentLayout, bold: bool) -> PlannedRow {
    let size = layout.table_font_size;
    let padding = layout.cell_padding_mm;

    let lines: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| wrap_text(text, width - 2.0 * padding, size, bold))
        .collect();
    let tallest = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);

    PlannedRow {
        lines,
        height_mm: tallest as f32 * line_height_mm(size) + 2.0 * padding,
    }
}

/// Renders the schedule into PDF bytes. Nothing is written anywhere.
pub fn render_document(
    entries: &[ScheduleEntry],
    header: &HeaderData,
    layout: &DocumentLayout,
) -> Result<Vec<u8>, ExportError> {
    let rows = table_rows(entries);
    let plan = plan_table(&rows, layout);

    let (doc, page1, layer1) = PdfDocument::new(
        layout.title.clone(),
        Mm(layout.page_width_mm),
        Mm(layout.page_height_mm),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    for (page_idx, page_rows) in plan.pages.iter().enumerate() {
        let layer = if page_idx == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(
                Mm(layout.page_width_mm),
                Mm(layout.page_height_mm),
                "Layer 1",
            );
            doc.get_page(page).get_layer(layer)
        };
        prepare_layer(&layer, layout);

        let mut top = if page_idx == 0 {
            draw_header_block(&layer, &fonts, header, layout);
            layout.table_top_mm
        } else {
            layout.margin_top_mm
        };

        draw_row(&layer, &fonts.bold, true, &plan.header, top, layout);
        top += plan.header.height_mm;
        for row in page_rows {
            draw_row(&layer, &fonts.regular, false, row, top, layout);
            top += row.height_mm;
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(pdf_error)?;
    buf.into_inner().map_err(pdf_error)
}

/// Renders first, then writes `Escala_<month>.pdf` into `dir`.
/// A failed render leaves no file behind.
pub fn save_document(
    entries: &[ScheduleEntry],
    header: &HeaderData,
    layout: &DocumentLayout,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = render_document(entries, header, layout)
        .inspect_err(|err| warn!("PDF export failed: {err}"))?;

    let path = dir.join(export_file_name(header));
    if let Err(err) = fs::write(&path, &bytes) {
        warn!("could not write {}: {err}", path.display());
        let _ = fs::remove_file(&path);
        return Err(err.into());
    }

    info!(
        "exported {} schedule row(s) to {}",
        entries.len(),
        path.display()
    );
    Ok(path)
}

fn pdf_error(err: impl fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

fn prepare_layer(layer: &PdfLayerReference, layout: &DocumentLayout) {
    layer.set_outline_color(gray(0.0));
    layer.set_outline_thickness(layout.line_width_mm / PT_TO_MM);
    layer.set_fill_color(gray(0.0));
}

fn draw_header_block(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    header: &HeaderData,
    layout: &DocumentLayout,
) {
    let left = layout.margin_left_mm;
    let width = layout.content_width();
    let top = layout.margin_top_mm;

    // Title bar
    let bar_height = layout.title_bar_height_mm;
    let title_size = layout.title_font_size;
    draw_box(layer, layout, left, top, width, bar_height, Some(layout.shade));
    let title_width = text_width_mm(&layout.title, title_size, true);
    layer.use_text(
        layout.title.as_str(),
        title_size,
        Mm(left + (width - title_width).max(0.0) / 2.0),
        y_mm(layout, top + bar_height / 2.0 + title_size * PT_TO_MM * 0.42),
        &fonts.bold,
    );

    let field_size = layout.field_font_size;
    let box_left = left + FIELD_LABEL_WIDTH_MM;

    // Reference month
    let month_top = top + MONTH_FIELD_OFFSET_MM;
    let month = header.reference_month.to_uppercase();
    layer.use_text(
        "REFERENTE AO MÊS:",
        field_size,
        Mm(left),
        y_mm(layout, month_top + FIELD_BASELINE_MM),
        &fonts.bold,
    );
    draw_box(layer, layout, box_left, month_top, MONTH_BOX_WIDTH_MM, FIELD_BOX_HEIGHT_MM, None);
    let month_width = text_width_mm(&month, field_size, true);
    layer.use_text(
        month.as_str(),
        field_size,
        Mm(box_left + (MONTH_BOX_WIDTH_MM - month_width).max(0.0) / 2.0),
        y_mm(layout, month_top + FIELD_BASELINE_MM),
        &fonts.bold,
    );

    // Unit
    let unit_top = top + UNIT_FIELD_OFFSET_MM;
    layer.use_text(
        "UNIDADE:",
        field_size,
        Mm(left),
        y_mm(layout, unit_top + FIELD_BASELINE_MM),
        &fonts.bold,
    );
    draw_box(
        layer,
        layout,
        box_left,
        unit_top,
        left + width - box_left,
        FIELD_BOX_HEIGHT_MM,
        None,
    );
    layer.use_text(
        header.unit_name.to_uppercase(),
        field_size,
        Mm(box_left + UNIT_TEXT_INSET_MM),
        y_mm(layout, unit_top + FIELD_BASELINE_MM),
        &fonts.bold,
    );
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    is_header: bool,
    row: &PlannedRow,
    top: f32,
    layout: &DocumentLayout,
) {
    let shade = is_header.then_some(layout.shade);
    let mut x = layout.margin_left_mm;

    for (lines, width) in row.lines.iter().zip(layout.column_widths()) {
        draw_box(layer, layout, x, top, width, row.height_mm, shade);
        draw_cell_text(layer, font, is_header, lines, x, top, width, row.height_mm, layout);
        x += width;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_cell_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    bold: bool,
    lines: &[String],
    x: f32,
    top: f32,
    width: f32,
    height: f32,
    layout: &DocumentLayout,
) {
    let size = layout.table_font_size;
    let line_height = line_height_mm(size);
    let em = size * PT_TO_MM;

    // Centered both ways.
    let block_top = top + (height - lines.len() as f32 * line_height) / 2.0;
    let mut baseline = block_top + (line_height - em) / 2.0 + em * 0.8;

    for line in lines {
        if !line.is_empty() {
            let line_width = text_width_mm(line, size, bold);
            layer.use_text(
                line.as_str(),
                size,
                Mm(x + (width - line_width).max(0.0) / 2.0),
                y_mm(layout, baseline),
                font,
            );
        }
        baseline += line_height;
    }
}

/// Box with its top-left corner at (`x`, `top`), measured from the page's top edge.
fn draw_box(
    layer: &PdfLayerReference,
    layout: &DocumentLayout,
    x: f32,
    top: f32,
    width: f32,
    height: f32,
    shade: Option<f32>,
) {
    let rect = Rect::new(
        Mm(x),
        y_mm(layout, top + height),
        Mm(x + width),
        y_mm(layout, top),
    );
    match shade {
        Some(level) => {
            layer.set_fill_color(gray(level));
            layer.add_rect(rect.with_mode(PaintMode::FillStroke));
            layer.set_fill_color(gray(0.0));
        }
        None => layer.add_rect(rect.with_mode(PaintMode::Stroke)),
    }
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn y_mm(layout: &DocumentLayout, from_top: f32) -> Mm {
    Mm(layout.page_height_mm - from_top)
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * PT_TO_MM * LINE_SPACING
}

/// Approximate Helvetica advance widths, in em.
fn glyph_width(c: char) -> f32 {
    match c {
        ' ' | 'I' | 'i' | 'j' | 'l' | '!' | '.' | ',' | ':' | ';' | '\'' | '|' => 0.278,
        'f' | 't' | 'r' | '(' | ')' | '/' | '\\' | '-' | '[' | ']' | 'ª' | 'º' => 0.333,
        'M' | 'W' | 'm' | 'w' | '–' => 0.833,
        c if c.is_ascii_digit() => 0.556,
        c if c.is_uppercase() => 0.667,
        _ => 0.556,
    }
}

pub(crate) fn text_width_mm(text: &str, font_size: f32, bold: bool) -> f32 {
    let units: f32 = text.chars().map(glyph_width).sum();
    let weight = if bold { 1.06 } else { 1.0 };
    units * font_size * PT_TO_MM * weight
}

/// Greedy word wrap. A single word wider than the cell stays on its own line.
pub(crate) fn wrap_text(text: &str, max_width_mm: f32, font_size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width_mm(&candidate, font_size, bold) > max_width_mm {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
