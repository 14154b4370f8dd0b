use crate::calendar::{CalendarDate, month_year_label};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UNIT_NAME: &str = "APAE DE COLINAS";

/// Free-text header fields printed above the schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderData {
    pub unit_name: String,
    pub reference_month: String,
}

impl HeaderData {
    pub fn new(unit_name: impl Into<String>, reference_month: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            reference_month: reference_month.into(),
        }
    }

    /// Default unit with the reference month of `month`.
    pub fn for_month(month: CalendarDate) -> Self {
        Self::new(DEFAULT_UNIT_NAME, month_year_label(month))
    }
}
