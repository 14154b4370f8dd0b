use crate::calendar::CalendarDate;
use log::debug;

/// Selected calendar days, unique by day, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    dates: Vec<CalendarDate>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns false when the day was already present.
    pub fn insert(&mut self, date: CalendarDate) -> bool {
        if self.contains(date) {
            return false;
        }
        self.dates.push(date);
        true
    }

    /// Returns false when the day was not present.
    pub fn remove(&mut self, date: CalendarDate) -> bool {
        let before = self.dates.len();
        self.dates.retain(|existing| *existing != date);
        self.dates.len() != before
    }

    /// Adds every day not already present and returns how many were added.
    pub fn merge<I>(&mut self, dates: I) -> usize
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        dates.into_iter().filter(|date| self.insert(*date)).count()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn as_slice(&self) -> &[CalendarDate] {
        &self.dates
    }
}

impl FromIterator<CalendarDate> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        set.merge(iter);
        set
    }
}

/// An in-progress pointer gesture over the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragRange {
    pub anchor: CalendarDate,
    pub cursor: CalendarDate,
}

impl DragRange {
    pub fn covers(&self, date: CalendarDate) -> bool {
        date.is_between(self.anchor, self.cursor)
    }
}

/// What a pointer release did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No gesture was active.
    Ignored,
    /// Released on the anchor day: treated as a click.
    Toggled { date: CalendarDate, selected: bool },
    /// Released on another day: the span was merged in.
    Merged { added: usize },
    /// Gesture dropped without touching the selection.
    Cancelled,
}

/// Pointer input from a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(CalendarDate),
    Enter(CalendarDate),
    Up(CalendarDate),
    /// Release observed anywhere outside the day cells.
    ReleasedOutside,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selection: SelectionSet,
    drag: Option<DragRange>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn drag(&self) -> Option<DragRange> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Flips membership of `date`. Returns whether it is selected afterward.
    pub fn toggle(&mut self, date: CalendarDate) -> bool {
        let selected = if self.selection.remove(date) {
            false
        } else {
            self.selection.insert(date)
        };
        debug!("toggled {date}: selected={selected}");
        selected
    }

    pub fn begin_drag(&mut self, date: CalendarDate) {
        self.drag = Some(DragRange {
            anchor: date,
            cursor: date,
        });
    }

    pub fn update_drag(&mut self, date: CalendarDate) {
        if let Some(drag) = self.drag.as_mut() {
            drag.cursor = date;
        }
    }

    pub fn end_drag(&mut self, date: CalendarDate) -> DragOutcome {
        let Some(drag) = self.drag.take() else {
            return DragOutcome::Ignored;
        };

        if drag.anchor == date {
            let selected = self.toggle(drag.anchor);
            return DragOutcome::Toggled {
                date: drag.anchor,
                selected,
            };
        }

        let added = self.selection.merge(drag.anchor.span_to(date));
        debug!("merged range {}..={date}: {added} new day(s)", drag.anchor);
        DragOutcome::Merged { added }
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        match self.drag.take() {
            Some(drag) => {
                debug!("cancelled drag anchored at {}", drag.anchor);
                DragOutcome::Cancelled
            }
            None => DragOutcome::Ignored,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> DragOutcome {
        match event {
            PointerEvent::Down(date) => {
                self.begin_drag(date);
                DragOutcome::Ignored
            }
            PointerEvent::Enter(date) => {
                self.update_drag(date);
                DragOutcome::Ignored
            }
            PointerEvent::Up(date) => self.end_drag(date),
            PointerEvent::ReleasedOutside => self.cancel_drag(),
        }
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.selection.contains(date)
    }

    /// Advisory highlight for the span under an active gesture.
    pub fn is_in_drag_preview(&self, date: CalendarDate) -> bool {
        self.drag.is_some_and(|drag| drag.covers(date))
    }

    pub fn clear_all(&mut self) {
        self.selection.clear();
    }
}
