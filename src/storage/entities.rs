use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

pub type UserId = i64;

/// Clock-in and clock-out of a user for a single day.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub struct PresenceEntry {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl PresenceEntry {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Presence of one user, at most one entry per date.
pub type UserPresence = BTreeMap<NaiveDate, PresenceEntry>;

/// Everything known about every user. Built in one pass over the source and never mutated
/// afterwards, a refresh replaces it wholesale.
#[derive(PartialEq, Eq, Debug, Default, Clone)]
pub struct Dataset {
    users: BTreeMap<UserId, UserPresence>,
}

impl Dataset {
    /// Records an entry, replacing whatever was stored for the same user and date.
    pub fn upsert(&mut self, user_id: UserId, date: NaiveDate, entry: PresenceEntry) {
        self.users.entry(user_id).or_default().insert(date, entry);
    }

    pub fn user(&self, user_id: UserId) -> Option<&UserPresence> {
        self.users.get(&user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = (UserId, &UserPresence)> {
        self.users.iter().map(|(id, presence)| (*id, presence))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn entry_count(&self) -> usize {
        self.users.values().map(|v| v.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{Dataset, PresenceEntry};

    #[test]
    fn test_upsert_replaces_same_day() {
        let date = NaiveDate::from_ymd_opt(2013, 9, 10).unwrap();
        let first = PresenceEntry::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        );
        let second = PresenceEntry::new(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        );

        let mut dataset = Dataset::default();
        dataset.upsert(10, date, first);
        dataset.upsert(10, date, second);
        dataset.upsert(11, date, first);

        assert_eq!(dataset.user_count(), 2);
        assert_eq!(dataset.entry_count(), 2);
        assert_eq!(dataset.user(10).unwrap()[&date], second);
        assert!(dataset.user(12).is_none());
        assert_eq!(dataset.users().map(|(id, _)| id).collect::<Vec<_>>(), vec![10, 11]);
    }
}
