use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Working days in a scheduling week. Fixed regardless of a developer's hours.
pub const WORKING_DAYS_PER_WEEK: f64 = 5.0;

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advance `start` by `days` working days, skipping Saturdays and Sundays.
///
/// The start day itself never counts, and the time of day is preserved.
/// `days == 0` returns `start` unchanged.
pub fn add_working_days(start: NaiveDateTime, days: u32) -> NaiveDateTime {
    let mut current = start;
    let mut counted = 0;
    while counted < days {
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => return current,
        };
        if is_working_day(current.date()) {
            counted += 1;
        }
    }
    current
}

/// Schedule epoch for `date`: `hour:00:00` with no sub-second part.
pub fn epoch_for(date: NaiveDate, hour: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or_default();
    date.and_time(time)
}

/// Today's epoch in local time.
pub fn today_epoch(hour: u32) -> NaiveDateTime {
    epoch_for(Local::now().date_naive(), hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at9(y: i32, m: u32, d: u32) -> NaiveDateTime {
        epoch_for(NaiveDate::from_ymd_opt(y, m, d).unwrap(), 9)
    }

    #[test]
    fn zero_days_is_identity() {
        let start = at9(2026, 10, 17); // Saturday
        assert_eq!(add_working_days(start, 0), start);
    }

    #[test]
    fn skips_weekend() {
        // Thursday + 2 working days -> Monday
        assert_eq!(add_working_days(at9(2026, 10, 15), 2), at9(2026, 10, 19));
        // Friday + 1 -> Monday
        assert_eq!(add_working_days(at9(2026, 10, 16), 1), at9(2026, 10, 19));
        // Monday + 5 -> next Monday
        assert_eq!(add_working_days(at9(2026, 10, 12), 5), at9(2026, 10, 19));
    }

    #[test]
    fn start_on_weekend_is_not_counted() {
        // Saturday + 1 -> Monday; Sunday + 1 -> Monday
        assert_eq!(add_working_days(at9(2026, 10, 17), 1), at9(2026, 10, 19));
        assert_eq!(add_working_days(at9(2026, 10, 18), 1), at9(2026, 10, 19));
    }

    #[test]
    fn result_is_never_a_weekend() {
        let mut start = at9(2026, 10, 1);
        for _ in 0..14 {
            for n in 1..12 {
                let end = add_working_days(start, n);
                assert!(is_working_day(end.date()), "{start} + {n} landed on {end}");
                assert!(end > start);
            }
            start += chrono::Duration::days(1);
        }
    }

    #[test]
    fn time_of_day_preserved() {
        let start = at9(2026, 10, 14);
        assert_eq!(add_working_days(start, 3).time(), start.time());
    }

    #[test]
    fn epoch_is_on_the_hour() {
        let e = epoch_for(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 9);
        assert_eq!(e.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), "2026-10-14 09:00:00.000");
    }
}
