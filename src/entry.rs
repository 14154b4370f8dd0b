use crate::calendar::CalendarDate;
use crate::entry_validation::{self, TemplateValidationError};
use crate::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Time labels offered by the attendance form.
pub const TIME_OPTIONS: [&str; 3] = ["8h", "13:30h", "14h"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddEntriesError {
    #[error("no dates selected")]
    EmptySelection,
    #[error("incomplete attendance template: {0}")]
    IncompleteTemplate(#[from] TemplateValidationError),
}

/// Opaque, session-unique identifier of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Doctor, specialty, times and quotas applied to every selected day in one add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTemplate {
    pub doctor_name: String,
    pub specialty: String,
    times: Vec<String>,
    pub qty_first: u32,
    pub qty_return: u32,
    pub qty_egress: u32,
}

impl Default for AttendanceTemplate {
    fn default() -> Self {
        Self {
            doctor_name: String::new(),
            specialty: String::new(),
            times: vec!["8h".to_string()],
            qty_first: 0,
            qty_return: 0,
            qty_egress: 0,
        }
    }
}

impl AttendanceTemplate {
    pub fn new(doctor_name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            specialty: specialty.into(),
            ..Self::default()
        }
    }

    /// Replaces the time list; labels end up sorted and unique.
    pub fn with_times<I, S>(mut self, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.times.clear();
        for time in times {
            self.add_time(time);
        }
        self
    }

    pub fn with_quantities(mut self, first: u32, returning: u32, egress: u32) -> Self {
        self.qty_first = first;
        self.qty_return = returning;
        self.qty_egress = egress;
        self
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// Returns false when the label is blank or already present.
    pub fn add_time(&mut self, time: impl Into<String>) -> bool {
        let time = time.into();
        if time.trim().is_empty() {
            return false;
        }
        match self.times.binary_search(&time) {
            Ok(_) => false,
            Err(pos) => {
                self.times.insert(pos, time);
                true
            }
        }
    }

    pub fn remove_time(&mut self, time: &str) -> bool {
        let before = self.times.len();
        self.times.retain(|existing| existing != time);
        self.times.len() != before
    }

    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        entry_validation::validate_template(self)
    }
}

/// One committed (date, time) row of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub doctor_name: String,
    pub specialty: String,
    pub date: CalendarDate,
    pub time: String,
    pub qty_first: u32,
    pub qty_return: u32,
    pub qty_egress: u32,
}

impl ScheduleEntry {
    pub fn from_template(template: &AttendanceTemplate, date: CalendarDate, time: &str) -> Self {
        Self {
            id: EntryId::new(),
            doctor_name: template.doctor_name.clone(),
            specialty: template.specialty.clone(),
            date,
            time: time.to_string(),
            qty_first: template.qty_first,
            qty_return: template.qty_return,
            qty_egress: template.qty_egress,
        }
    }
}

/// Expands `selection × template.times` into fresh entries.
///
/// Produces `selection.len() * template.times().len()` entries, walking the
/// selection in insertion order and the times in template order.
pub fn derive_entries(
    selection: &SelectionSet,
    template: &AttendanceTemplate,
) -> Result<Vec<ScheduleEntry>, AddEntriesError> {
    if selection.is_empty() {
        return Err(AddEntriesError::EmptySelection);
    }
    template.validate()?;

    let mut entries = Vec::with_capacity(selection.len() * template.times().len());
    for date in selection.iter() {
        for time in template.times() {
            entries.push(ScheduleEntry::from_template(template, date, time));
        }
    }
    Ok(entries)
}

/// Entries in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollection {
    entries: Vec<ScheduleEntry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entries: Vec<ScheduleEntry>) {
        self.entries.extend(entries);
    }

    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: EntryId) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }
}
