use crate::calendar::{self, CalendarDate, MonthGrid};
use crate::entry::{
    AddEntriesError, AttendanceTemplate, EntryCollection, EntryId, ScheduleEntry, derive_entries,
};
use crate::metadata::HeaderData;
use crate::render::{
    self, DocumentLayout, ExportError, PreviewRow, save_document, save_schedule_csv,
};
use crate::selection::{DragOutcome, DragRange, PointerEvent, SelectionEngine, SelectionSet};
use chrono::Local;
use log::{debug, info, warn};
use polars::prelude::{DataFrame, PolarsResult};
use std::path::{Path, PathBuf};

/// Thin view binding notified after each state change. All methods default to no-ops.
pub trait ScheduleObserver {
    fn selection_changed(&mut self, _selection: &SelectionSet) {}
    fn drag_changed(&mut self, _drag: Option<DragRange>) {}
    fn entries_changed(&mut self, _entries: &[ScheduleEntry]) {}
    fn header_changed(&mut self, _header: &HeaderData) {}
}

/// One editing session: selection, entries, header fields and the visible month.
pub struct Schedule {
    engine: SelectionEngine,
    entries: EntryCollection,
    header: HeaderData,
    visible_month: CalendarDate,
    observers: Vec<Box<dyn ScheduleObserver>>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Session opened on the current month.
    pub fn new() -> Self {
        Self::for_month(CalendarDate::from_datetime(&Local::now()))
    }

    pub fn for_month(month: CalendarDate) -> Self {
        let (first, _) = calendar::month_bounds(month);
        Self {
            engine: SelectionEngine::new(),
            entries: EntryCollection::new(),
            header: HeaderData::for_month(first),
            visible_month: first,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn ScheduleObserver>) {
        self.observers.push(observer);
    }

    /// First day of the month shown in the calendar.
    pub fn visible_month(&self) -> CalendarDate {
        self.visible_month
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::for_month(self.visible_month)
    }

    /// Moves the calendar and resets the reference month to the new month's label.
    /// Staying inside the current month keeps any reference month override.
    pub fn set_visible_month(&mut self, month: CalendarDate) {
        let (first, _) = calendar::month_bounds(month);
        if first == self.visible_month {
            return;
        }
        self.visible_month = first;
        self.header.reference_month = calendar::month_year_label(first);
        debug!("visible month is now {}", self.header.reference_month);
        self.notify_header();
    }

    pub fn next_month(&mut self) {
        self.set_visible_month(calendar::add_months(self.visible_month, 1));
    }

    pub fn previous_month(&mut self) {
        self.set_visible_month(calendar::add_months(self.visible_month, -1));
    }

    pub fn header(&self) -> &HeaderData {
        &self.header
    }

    pub fn set_unit_name(&mut self, unit_name: impl Into<String>) {
        self.header.unit_name = unit_name.into();
        self.notify_header();
    }

    /// Overrides the reference month until the visible month changes again.
    pub fn set_reference_month(&mut self, reference_month: impl Into<String>) {
        self.header.reference_month = reference_month.into();
        self.notify_header();
    }

    pub fn selection(&self) -> &SelectionSet {
        self.engine.selection()
    }

    pub fn selection_engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> DragOutcome {
        let outcome = self.engine.handle(event);
        self.notify_drag();
        if matches!(
            outcome,
            DragOutcome::Toggled { .. } | DragOutcome::Merged { added: 1.. }
        ) {
            self.notify_selection();
        }
        outcome
    }

    pub fn toggle_date(&mut self, date: CalendarDate) -> bool {
        let selected = self.engine.toggle(date);
        self.notify_selection();
        selected
    }

    pub fn clear_selection(&mut self) {
        self.engine.clear_all();
        self.notify_selection();
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    /// Whether an add with `template` would be accepted.
    pub fn can_add(&self, template: &AttendanceTemplate) -> bool {
        !self.engine.selection().is_empty() && template.validate().is_ok()
    }

    /// Applies `template` to every selected day, appends the new entries and
    /// clears the selection. Returns how many entries were created.
    pub fn add_entries(&mut self, template: &AttendanceTemplate) -> Result<usize, AddEntriesError> {
        let created = derive_entries(self.engine.selection(), template)
            .inspect_err(|err| warn!("add rejected: {err}"))?;
        let count = created.len();

        self.entries.append(created);
        self.engine.clear_all();
        info!("added {count} schedule entries for {}", template.doctor_name);

        self.notify_entries();
        self.notify_selection();
        Ok(count)
    }

    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        let removed = self.entries.remove(id);
        if removed {
            info!("removed entry {id}");
            self.notify_entries();
        } else {
            debug!("entry {id} not found");
        }
        removed
    }

    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.notify_entries();
    }

    pub fn sorted_entries(&self) -> Vec<&ScheduleEntry> {
        render::sorted_view(self.entries.iter())
    }

    pub fn preview_rows(&self) -> Vec<PreviewRow> {
        render::preview_rows(self.entries.as_slice())
    }

    pub fn preview_frame(&self) -> PolarsResult<DataFrame> {
        render::schedule_frame(self.entries.as_slice())
    }

    pub fn can_export(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn render_pdf(&self, layout: &DocumentLayout) -> Result<Vec<u8>, ExportError> {
        render::render_document(self.entries.as_slice(), &self.header, layout)
    }

    pub fn export_pdf(&self, dir: &Path, layout: &DocumentLayout) -> Result<PathBuf, ExportError> {
        if !self.can_export() {
            return Err(ExportError::NothingToExport);
        }
        save_document(self.entries.as_slice(), &self.header, layout, dir)
    }

    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        if !self.can_export() {
            return Err(ExportError::NothingToExport);
        }
        save_schedule_csv(self.entries.as_slice(), &self.header, dir)
    }

    fn notify_selection(&mut self) {
        let selection = self.engine.selection();
        for observer in &mut self.observers {
            observer.selection_changed(selection);
        }
    }

    fn notify_drag(&mut self) {
        let drag = self.engine.drag();
        for observer in &mut self.observers {
            observer.drag_changed(drag);
        }
    }

    fn notify_entries(&mut self) {
        let entries = self.entries.as_slice();
        for observer in &mut self.observers {
            observer.entries_changed(entries);
        }
    }

    fn notify_header(&mut self) {
        let header = &self.header;
        for observer in &mut self.observers {
            observer.header_changed(header);
        }
    }
}
