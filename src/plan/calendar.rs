//! Month-label arithmetic for schedule output
//!
//! Schedules are labeled with calendar months (`YYYY-MM`). Offsets are
//! computed with direct year/month integer arithmetic so no date construction
//! can fail inside the simulation loop.

use chrono::{Datelike, NaiveDate};

/// Label for `anchor + offset` months, formatted `YYYY-MM`.
///
/// Offset 0 is the anchor month itself; month *n* of a schedule is offset *n*.
pub fn month_label(anchor: NaiveDate, offset: u32) -> String {
    let total = anchor.year() * 12 + anchor.month0() as i32 + offset as i32;
    format!("{:04}-{:02}", total.div_euclid(12), total.rem_euclid(12) + 1)
}

/// Months since year zero, used to compare snapshot months
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
