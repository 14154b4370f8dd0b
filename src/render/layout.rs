use super::ExportError;
use serde::{Deserialize, Serialize};

/// Physical layout of the exported document, in millimetres and points.
///
/// The default is the regulatory A4 portrait layout. Any subset of fields can
/// be overridden from JSON; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub title: String,
    pub title_bar_height_mm: f32,
    pub title_font_size: f32,
    pub field_font_size: f32,
    /// Distance from the top edge to the table on the first page.
    pub table_top_mm: f32,
    /// Widths of the first seven columns; the last takes what is left.
    pub column_widths_mm: [f32; 7],
    pub table_font_size: f32,
    pub cell_padding_mm: f32,
    pub line_width_mm: f32,
    /// Grey level (0 = black, 1 = white) of the title bar and header row.
    pub shade: f32,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 14.0,
            margin_right_mm: 14.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 10.0,
            title: "ESCALA AMBULATORIAL – REGULAÇÃO".to_string(),
            title_bar_height_mm: 8.0,
            title_font_size: 10.0,
            field_font_size: 9.0,
            table_top_mm: 45.0,
            column_widths_mm: [40.0, 40.0, 25.0, 15.0, 22.0, 15.0, 15.0],
            table_font_size: 8.0,
            cell_padding_mm: 2.0,
            line_width_mm: 0.1,
            shade: 200.0 / 255.0,
        }
    }
}

impl DocumentLayout {
    const MIN_LAST_COLUMN_MM: f32 = 8.0;

    pub fn from_json_str(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn content_width(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    pub fn column_widths(&self) -> [f32; 8] {
        let fixed: f32 = self.column_widths_mm.iter().sum();
        let last = (self.content_width() - fixed).max(Self::MIN_LAST_COLUMN_MM);

        let mut widths = [0.0; 8];
        widths[..7].copy_from_slice(&self.column_widths_mm);
        widths[7] = last;
        widths
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths().iter().sum()
    }
}
