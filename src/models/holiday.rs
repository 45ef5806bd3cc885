//! Public holiday models.
//!
//! This module contains the [`PublicHoliday`] record and the
//! [`PublicHolidaySet`] used to classify shift dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single public holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: "Australia Day".to_string(),
///     region: "national".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "Australia Day").
    #[serde(default)]
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "VIC", "NSW").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// A fixed set of public holiday dates.
///
/// Lookup is an exact date match. When two holidays share a date the first
/// one inserted is kept.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PublicHolidaySet;
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
/// let set = PublicHolidaySet::from_dates([christmas]);
///
/// assert!(set.contains(christmas));
/// assert!(!set.contains(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicHolidaySet {
    holidays: BTreeMap<NaiveDate, PublicHoliday>,
}

impl PublicHolidaySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from unnamed dates.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        dates
            .into_iter()
            .map(|date| PublicHoliday {
                date,
                name: String::new(),
                region: default_region(),
            })
            .collect()
    }

    /// Adds a holiday, keeping any existing entry for the same date.
    pub fn insert(&mut self, holiday: PublicHoliday) {
        self.holidays.entry(holiday.date).or_insert(holiday);
    }

    /// Returns true if `date` is a public holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Returns the holiday on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&PublicHoliday> {
        self.holidays.get(&date)
    }

    /// Iterates the holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = &PublicHoliday> {
        self.holidays.values()
    }

    /// Returns the number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the set has no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl FromIterator<PublicHoliday> for PublicHolidaySet {
    fn from_iter<I: IntoIterator<Item = PublicHoliday>>(iter: I) -> Self {
        let mut set = PublicHolidaySet::new();
        for holiday in iter {
            set.insert(holiday);
        }
        set
    }
}
