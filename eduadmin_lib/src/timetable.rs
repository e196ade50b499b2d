//! The fixed daily timetable.
//!
//! Teaching happens in five fixed slots per day; a schedule entry is
//! placed by matching its start time against them. Entries that start
//! at any other time are kept aside rather than dropped.

use chrono::NaiveTime;
use eduadmin_api::types::{DayOfWeek, ScheduleEntry};

/// Number of teaching slots per day.
pub const SLOT_COUNT: usize = 5;

/// Slot boundaries as (hour, minute) pairs, start and end.
pub const SLOT_TIMES: [((u32, u32), (u32, u32)); SLOT_COUNT] = [
    ((8, 0), (9, 40)),
    ((10, 10), (11, 50)),
    ((14, 0), (15, 40)),
    ((16, 10), (17, 50)),
    ((19, 0), (20, 40)),
];

/// Row labels of the timetable, top to bottom.
pub const SLOT_LABELS: [&str; SLOT_COUNT] = [
    "08:00-09:40",
    "10:10-11:50",
    "14:00-15:40",
    "16:10-17:50",
    "19:00-20:40",
];

/// The slot a start time belongs to, matched exactly.
pub fn slot_index(start: NaiveTime) -> Option<usize> {
    SLOT_TIMES
        .iter()
        .position(|&((h, m), _)| NaiveTime::from_hms_opt(h, m, 0) == Some(start))
}

/// Start and end times of one slot.
pub fn slot_times(index: usize) -> Option<(NaiveTime, NaiveTime)> {
    let ((sh, sm), (eh, em)) = SLOT_TIMES.get(index).copied()?;
    let start = NaiveTime::from_hms_opt(sh, sm, 0)?;
    let end = NaiveTime::from_hms_opt(eh, em, 0)?;
    Some((start, end))
}

/// Schedule entries arranged into the 5-slot by 7-day grid.
pub struct TimetableGrid<'a> {
    cells: [[Vec<&'a ScheduleEntry>; 7]; SLOT_COUNT],
    unplaced: Vec<&'a ScheduleEntry>,
}

impl<'a> TimetableGrid<'a> {
    pub fn place(entries: &'a [ScheduleEntry]) -> Self {
        let mut cells: [[Vec<&'a ScheduleEntry>; 7]; SLOT_COUNT] =
            std::array::from_fn(|_| std::array::from_fn(|_| Vec::new()));
        let mut unplaced = Vec::new();
        for entry in entries {
            match slot_index(entry.start_time) {
                Some(slot) => cells[slot][entry.day_of_week.index()].push(entry),
                None => unplaced.push(entry),
            }
        }
        Self { cells, unplaced }
    }

    /// Entries placed at one slot and day, in arrival order.
    pub fn cell(&self, slot: usize, day: DayOfWeek) -> &[&'a ScheduleEntry] {
        &self.cells[slot][day.index()]
    }

    /// Entries whose start time matches no slot.
    pub fn unplaced(&self) -> &[&'a ScheduleEntry] {
        &self.unplaced
    }
}
