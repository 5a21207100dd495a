use std::ops::Index;

use crate::{
    storage::entities::UserPresence,
    utils::time::{interval, seconds_since_midnight, weekday_index},
};

/// Seven buckets, one per weekday starting on Monday. Every bucket always exists, days without
/// entries are simply empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayBuckets<T> {
    buckets: [T; 7],
}

impl<T: Default> Default for WeekdayBuckets<T> {
    fn default() -> Self {
        Self {
            buckets: Default::default(),
        }
    }
}

impl<T> WeekdayBuckets<T> {
    /// Iterates buckets in weekday order together with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.buckets.iter().enumerate()
    }

    fn bucket_mut(&mut self, weekday: usize) -> &mut T {
        &mut self.buckets[weekday]
    }
}

impl<T> Index<usize> for WeekdayBuckets<T> {
    type Output = T;

    fn index(&self, weekday: usize) -> &Self::Output {
        &self.buckets[weekday]
    }
}

/// Start and end moments (seconds since midnight) collected for a single weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartEndSeconds {
    pub start: Vec<i64>,
    pub end: Vec<i64>,
}

/// Groups presence intervals of a user by weekday.
pub fn group_by_weekday(entries: &UserPresence) -> WeekdayBuckets<Vec<i64>> {
    let mut result = WeekdayBuckets::<Vec<i64>>::default();
    for (date, entry) in entries {
        result
            .bucket_mut(weekday_index(*date))
            .push(interval(entry.start, entry.end));
    }
    result
}

/// Groups start and end moments of a user by weekday.
pub fn group_start_end_by_weekday(entries: &UserPresence) -> WeekdayBuckets<StartEndSeconds> {
    let mut result = WeekdayBuckets::<StartEndSeconds>::default();
    for (date, entry) in entries {
        let bucket = result.bucket_mut(weekday_index(*date));
        bucket.start.push(seconds_since_midnight(entry.start));
        bucket.end.push(seconds_since_midnight(entry.end));
    }
    result
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveTime};

    use super::{group_by_weekday, group_start_end_by_weekday, StartEndSeconds};
    use crate::{
        storage::{
            entities::{PresenceEntry, UserPresence},
            fixtures::test_dataset,
        },
        utils::time::weekday_index,
    };

    #[tokio::test]
    async fn test_group_by_weekday() -> Result<()> {
        let dataset = test_dataset().await?;

        let user_10 = group_by_weekday(dataset.user(10).unwrap());
        let expected: [Vec<i64>; 7] = [
            vec![],
            vec![30047],
            vec![24465],
            vec![23705],
            vec![],
            vec![],
            vec![],
        ];
        for (weekday, intervals) in user_10.iter() {
            assert_eq!(intervals, &expected[weekday]);
        }

        let user_11 = group_by_weekday(dataset.user(11).unwrap());
        let expected: [Vec<i64>; 7] = [
            vec![24123],
            vec![16564],
            vec![25321],
            vec![22969, 22999],
            vec![6426],
            vec![],
            vec![],
        ];
        for (weekday, intervals) in user_11.iter() {
            assert_eq!(intervals, &expected[weekday]);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_grouping_is_a_partition() -> Result<()> {
        let dataset = test_dataset().await?;
        for (_, presence) in dataset.users() {
            let grouped = group_by_weekday(presence);
            let total = grouped.iter().map(|(_, v)| v.len()).sum::<usize>();
            assert_eq!(total, presence.len());

            for (date, _) in presence {
                let weekday = weekday_index(*date);
                let per_weekday = presence
                    .keys()
                    .filter(|v| weekday_index(**v) == weekday)
                    .count();
                assert_eq!(grouped[weekday].len(), per_weekday);
            }
        }
        Ok(())
    }

    #[test]
    fn test_group_empty_presence() {
        let grouped = group_by_weekday(&UserPresence::new());
        assert_eq!(grouped.iter().count(), 7);
        assert!(grouped.iter().all(|(_, v)| v.is_empty()));

        let grouped = group_start_end_by_weekday(&UserPresence::new());
        assert!(grouped.iter().all(|(_, v)| *v == StartEndSeconds::default()));
    }

    #[test]
    fn test_group_start_end_by_weekday() {
        let time = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap();
        let mut presence = UserPresence::new();
        presence.insert(
            NaiveDate::from_ymd_opt(2013, 9, 5).unwrap(),
            PresenceEntry::new(time(9, 0, 0), time(15, 22, 49)),
        );
        presence.insert(
            NaiveDate::from_ymd_opt(2013, 9, 12).unwrap(),
            PresenceEntry::new(time(8, 45, 0), time(15, 8, 19)),
        );
        presence.insert(
            NaiveDate::from_ymd_opt(2013, 9, 14).unwrap(),
            PresenceEntry::new(time(10, 0, 0), time(9, 0, 0)),
        );

        let grouped = group_start_end_by_weekday(&presence);

        assert_eq!(
            grouped[3],
            StartEndSeconds {
                start: vec![32400, 31500],
                end: vec![55369, 54499],
            }
        );
        assert_eq!(
            grouped[5],
            StartEndSeconds {
                start: vec![36000],
                end: vec![32400],
            }
        );
        assert_eq!(group_by_weekday(&presence)[5], vec![-3600]);
    }
}
