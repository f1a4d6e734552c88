//! Monthly credit-cycle calculator.
//!
//! A cycle is one calendar month anchored to the day-of-month the member's
//! billing began. Consecutive cycles are contiguous: each cycle ends the day
//! before the next one starts.
//!
//! When the anchor day does not exist in the following month (anchors on the
//! 29th to 31st), the next cycle starts on the first of the month after, so
//! the current cycle ends on the last day of the short month:
//!
//! | Anchor | Cycle | Next start |
//! |--------|-------|------------|
//! | 2024-03-15 | 03-15 .. 04-14 | 04-15 |
//! | 2024-01-31 | 01-31 .. 02-29 | 03-01 |
//! | 2023-01-29 | 01-29 .. 02-28 | 03-01 |

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Window during which a cycle's credits are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleDates {
    /// First day of the cycle.
    pub cycle_start: NaiveDate,
    /// Last day of the cycle (inclusive).
    pub cycle_end: NaiveDate,
    /// End of day of `cycle_end`, 23:59:59.999 wall-clock.
    pub expires_at: NaiveDateTime,
}

impl CycleDates {
    /// The `index`-th cycle counted from `anchor` (index 0 starts on `anchor`).
    ///
    /// A cycle with no representable successor runs to `NaiveDate::MAX`.
    pub fn for_period(anchor: NaiveDate, index: u32) -> Self {
        let cycle_start = anchored_start(anchor, index).unwrap_or(NaiveDate::MAX);
        let cycle_end = index
            .checked_add(1)
            .and_then(|next| anchored_start(anchor, next))
            .and_then(|next_start| next_start.pred_opt())
            .map_or(NaiveDate::MAX, |end| end.max(cycle_start));
        Self {
            cycle_start,
            cycle_end,
            expires_at: end_of_day(cycle_end),
        }
    }

    /// The cycle anchored at `anchor` that contains `date`.
    ///
    /// Returns `None` when `date` is before the anchor.
    pub fn containing(anchor: NaiveDate, date: NaiveDate) -> Option<Self> {
        if date < anchor {
            return None;
        }
        let months = (date.year() - anchor.year()) * 12 + date.month() as i32
            - anchor.month() as i32;
        // Anchored starts never run ahead of the calendar month, so the cycle
        // is at most a couple of steps past `months - 1`.
        let mut index = u32::try_from(months).unwrap_or(0).saturating_sub(1);
        while let Some(next) = index.checked_add(1) {
            match anchored_start(anchor, next) {
                Some(start) if start <= date => index = next,
                _ => break,
            }
        }
        Some(Self::for_period(anchor, index))
    }

    /// First day of the following cycle.
    pub fn next_cycle_start(&self) -> NaiveDate {
        self.cycle_end.succ_opt().unwrap_or(self.cycle_end)
    }

    /// True if `date` falls inside this cycle.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.cycle_start <= date && date <= self.cycle_end
    }

    /// Number of days in this cycle.
    pub fn length_days(&self) -> i64 {
        (self.cycle_end - self.cycle_start).num_days() + 1
    }

    /// Expiry instant localized into `tz`.
    ///
    /// Picks the earliest instant when the wall-clock time is ambiguous and
    /// returns `None` when it falls into a DST gap.
    pub fn expires_at_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<chrono::DateTime<Tz>> {
        tz.from_local_datetime(&self.expires_at).earliest()
    }
}

/// Computes the credit cycle that begins on `start`.
///
/// Pure: the same input always yields the same window.
pub fn calculate_cycle(start: NaiveDate) -> CycleDates {
    CycleDates::for_period(start, 0)
}

/// Start of the cycle `months` months after `anchor`.
///
/// `None` once the start would fall past the last representable date.
fn anchored_start(anchor: NaiveDate, months: u32) -> Option<NaiveDate> {
    if months == 0 {
        return Some(anchor);
    }
    let shifted = anchor.checked_add_months(Months::new(months))?;
    if shifted.day() == anchor.day() {
        Some(shifted)
    } else {
        // clamped to month end; roll to the first of the next month
        shifted.checked_add_days(Days::new(1))
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}
