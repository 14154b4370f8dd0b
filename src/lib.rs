pub mod calendar;
pub mod entry;
pub mod entry_validation;
pub mod metadata;
pub mod render;
pub mod schedule;
pub mod selection;

pub use calendar::{CalendarDate, MonthGrid};
pub use entry::{
    AddEntriesError, AttendanceTemplate, EntryCollection, EntryId, ScheduleEntry, TIME_OPTIONS,
    derive_entries,
};
pub use entry_validation::TemplateValidationError;
pub use metadata::HeaderData;
pub use render::{
    DocumentLayout, ExportError, PreviewRow, ScheduleRow, TABLE_HEADERS, export_file_name,
    render_document, sorted_view, to_row,
};
pub use schedule::{Schedule, ScheduleObserver};
pub use selection::{DragOutcome, DragRange, PointerEvent, SelectionEngine, SelectionSet};
