use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

use super::Meters;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProgressRecord {
    pub date: NaiveDate,
    pub cumulative_m: Option<Meters>,
}

/// Cumulative distance per day, sorted by date and forward-filled.
#[derive(Debug, Clone, Default)]
pub struct ProgressTable {
    records: Vec<ProgressRecord>,
}

impl ProgressTable {
    pub fn new(mut records: Vec<ProgressRecord>) -> Self {
        records.sort_by_key(|record| record.date);

        let mut last_known: Option<Meters> = None;
        for record in records.iter_mut() {
            match record.cumulative_m {
                Some(value) => last_known = Some(value),
                None => record.cumulative_m = last_known,
            }
        }

        Self { records }
    }

    /// Exact match on `date`. Rows before the first known value stay `None`.
    pub fn get(&self, date: NaiveDate) -> Option<Meters> {
        self.records
            .iter()
            .find(|record| record.date == date)
            .and_then(|record| record.cumulative_m)
    }

    pub fn records(&self) -> &[ProgressRecord] {
        &self.records
    }

    pub fn last_known(&self) -> Option<(NaiveDate, Meters)> {
        self.records
            .iter()
            .rev()
            .find_map(|record| record.cumulative_m.map(|m| (record.date, m)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn record(d: u32, m: Option<Meters>) -> ProgressRecord {
        ProgressRecord {
            date: day(d),
            cumulative_m: m,
        }
    }

    #[test]
    fn forward_fills_blank_days() {
        let table = ProgressTable::new(vec![
            record(13, Some(1200)),
            record(14, None),
            record(15, None),
            record(16, Some(4100)),
        ]);

        assert_eq!(table.get(day(14)), Some(1200));
        assert_eq!(table.get(day(15)), Some(1200));
        assert_eq!(table.get(day(16)), Some(4100));
    }

    #[test]
    fn leading_blanks_have_nothing_to_fill_from() {
        let table = ProgressTable::new(vec![record(13, None), record(14, Some(800))]);

        assert_eq!(table.get(day(13)), None);
        assert_eq!(table.get(day(14)), Some(800));
        assert_eq!(table.get(day(20)), None);
    }

    #[test]
    fn fills_in_date_order() {
        let table = ProgressTable::new(vec![
            record(15, None),
            record(13, Some(500)),
            record(14, Some(900)),
        ]);

        assert_eq!(table.records()[0].date, day(13));
        assert_eq!(table.get(day(15)), Some(900));
        assert_eq!(table.last_known(), Some((day(15), 900)));
    }
}
