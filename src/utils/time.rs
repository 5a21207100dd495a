use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Abbreviated weekday names indexed by ISO weekday (Monday = 0).
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Whole seconds elapsed since midnight. Sub-second precision is ignored.
pub fn seconds_since_midnight(time: NaiveTime) -> i64 {
    time.hour() as i64 * 3600 + time.minute() as i64 * 60 + time.second() as i64
}

/// Signed difference in seconds between two times of the same nominal day. An `end` recorded
/// before `start` yields a negative value, which is kept as is.
pub fn interval(start: NaiveTime, end: NaiveTime) -> i64 {
    seconds_since_midnight(end) - seconds_since_midnight(start)
}

/// Bucket index of a date, Monday = 0 through Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{interval, seconds_since_midnight, weekday_index};

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_seconds_since_midnight() {
        assert_eq!(seconds_since_midnight(NaiveTime::MIN), 0);
        assert_eq!(seconds_since_midnight(time(0, 1, 0)), 60);
        assert_eq!(seconds_since_midnight(time(0, 10, 0)), 600);
        assert_eq!(seconds_since_midnight(time(0, 30, 30)), 1830);
        assert_eq!(seconds_since_midnight(time(1, 30, 30)), 5430);
        assert_eq!(seconds_since_midnight(time(5, 30, 0)), 19800);
        assert_eq!(seconds_since_midnight(time(23, 0, 0)), 82800);
        assert_eq!(seconds_since_midnight(time(23, 59, 59)), 86399);
    }

    #[test]
    fn test_interval() {
        assert_eq!(interval(time(2, 0, 0), time(2, 0, 50)), 50);
        assert_eq!(interval(time(2, 0, 0), time(1, 58, 43)), -77);
        assert_eq!(interval(time(10, 30, 0), time(11, 0, 0)), 1800);
        assert_eq!(interval(time(15, 0, 0), time(14, 30, 0)), -1800);
        assert_eq!(interval(time(0, 0, 0), time(10, 0, 0)), 36000);
        assert_eq!(interval(time(12, 0, 0), time(5, 0, 0)), -25200);
        assert_eq!(interval(time(9, 39, 5), time(17, 59, 52)), 30047);
    }

    #[test]
    fn test_interval_is_antisymmetric() {
        let samples = [time(0, 0, 0), time(8, 15, 3), time(12, 0, 0), time(23, 59, 59)];
        for a in samples {
            assert_eq!(interval(a, a), 0);
            for b in samples {
                assert_eq!(interval(a, b), -interval(b, a));
            }
        }
    }

    #[test]
    fn test_weekday_index() {
        let monday = NaiveDate::from_ymd_opt(2013, 9, 9).unwrap();
        for offset in 0..14 {
            let date = monday + chrono::Duration::days(offset);
            assert_eq!(weekday_index(date), (offset % 7) as usize);
        }
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2013, 9, 10).unwrap()), 1);
    }
}
