//! Day-granular date ranges and the relative date buckets users pick from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ListingsError, ListingsResult};

/// Inclusive range of calendar days. Time of day never participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        DateRange::new(date, date)
    }

    /// Parse `from`/`to` arguments as YYYY-MM-DD.
    /// A missing `to` collapses the range to the `from` day.
    pub fn from_args(from: &str, to: Option<&str>) -> ListingsResult<Self> {
        let start = parse_day(from)?;
        let end = match to {
            Some(s) => parse_day(s)?,
            None => start,
        };
        Ok(DateRange::new(start, end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `instant` falls on a day inside the range, as seen in `tz`.
    pub fn contains_instant<Tz: TimeZone>(&self, instant: &DateTime<Utc>, tz: &Tz) -> bool {
        self.contains(instant.with_timezone(tz).date_naive())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

fn parse_day(s: &str) -> ListingsResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ListingsError::InvalidDate(s.to_string()))
}

/// Relative date buckets offered as one-tap filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickDate {
    Today,
    Tomorrow,
    ThisWeek,
    ThisWeekend,
    NextWeek,
    ThisMonth,
    NextMonth,
}

impl QuickDate {
    pub const ALL: [QuickDate; 7] = [
        QuickDate::Today,
        QuickDate::Tomorrow,
        QuickDate::ThisWeek,
        QuickDate::ThisWeekend,
        QuickDate::NextWeek,
        QuickDate::ThisMonth,
        QuickDate::NextMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickDate::Today => "today",
            QuickDate::Tomorrow => "tomorrow",
            QuickDate::ThisWeek => "this-week",
            QuickDate::ThisWeekend => "this-weekend",
            QuickDate::NextWeek => "next-week",
            QuickDate::ThisMonth => "this-month",
            QuickDate::NextMonth => "next-month",
        }
    }

    /// Resolve the bucket relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let calc = DateRangeCalculator::new(today);
        match self {
            QuickDate::Today => calc.today(),
            QuickDate::Tomorrow => calc.tomorrow(),
            QuickDate::ThisWeek => calc.this_week(),
            QuickDate::ThisWeekend => calc.this_weekend(),
            QuickDate::NextWeek => calc.next_week(),
            QuickDate::ThisMonth => calc.this_month(),
            QuickDate::NextMonth => calc.next_month(),
        }
    }
}

impl fmt::Display for QuickDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickDate {
    type Err = ListingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        QuickDate::ALL
            .into_iter()
            .find(|q| q.as_str() == normalized)
            .ok_or_else(|| ListingsError::UnknownQuickDate(s.to_string()))
    }
}

/// Computes canonical ranges for the relative buckets, anchored at a fixed day.
///
/// Week windows are rolling (starting today), not aligned to calendar weeks.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeCalculator {
    today: NaiveDate,
}

impl DateRangeCalculator {
    pub fn new(today: NaiveDate) -> Self {
        DateRangeCalculator { today }
    }

    pub fn today(&self) -> DateRange {
        DateRange::day(self.today)
    }

    pub fn tomorrow(&self) -> DateRange {
        DateRange::day(self.today + Duration::days(1))
    }

    pub fn this_week(&self) -> DateRange {
        DateRange::new(self.today, self.today + Duration::days(6))
    }

    /// Upcoming Saturday (today if it is Saturday) through the Sunday after it.
    pub fn this_weekend(&self) -> DateRange {
        let days_until_saturday = (7 + Weekday::Sat.num_days_from_monday()
            - self.today.weekday().num_days_from_monday())
            % 7;
        let saturday = self.today + Duration::days(i64::from(days_until_saturday));
        DateRange::new(saturday, saturday + Duration::days(1))
    }

    pub fn next_week(&self) -> DateRange {
        let this_week_end = self.this_week().end;
        DateRange::new(
            this_week_end + Duration::days(1),
            this_week_end + Duration::days(7),
        )
    }

    pub fn this_month(&self) -> DateRange {
        DateRange::new(self.today, last_day_of_month(self.today.year(), self.today.month()))
    }

    pub fn next_month(&self) -> DateRange {
        let (year, month) = if self.today.month() == 12 {
            (self.today.year() + 1, 1)
        } else {
            (self.today.year(), self.today.month() + 1)
        };
        DateRange::new(first_day_of_month(year, month), last_day_of_month(year, month))
    }
}

fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    first_day_of_month(next_year, next_month)
        .pred_opt()
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Denver;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2025-03-19 is a Wednesday
    fn wednesday() -> DateRangeCalculator {
        DateRangeCalculator::new(d(2025, 3, 19))
    }

    #[test]
    fn today_and_tomorrow_are_single_days() {
        assert_eq!(wednesday().today(), DateRange::day(d(2025, 3, 19)));
        assert_eq!(wednesday().tomorrow(), DateRange::day(d(2025, 3, 20)));
    }

    #[test]
    fn this_week_is_rolling_from_wednesday_to_tuesday() {
        let range = wednesday().this_week();
        assert_eq!(range.start, d(2025, 3, 19));
        assert_eq!(range.end, d(2025, 3, 25));
        assert_eq!(range.start.weekday(), Weekday::Wed);
        assert_eq!(range.end.weekday(), Weekday::Tue);
    }

    #[test]
    fn next_week_follows_this_week_contiguously() {
        let calc = wednesday();
        let next = calc.next_week();
        assert_eq!(next.start, calc.this_week().end + Duration::days(1));
        assert_eq!(next, DateRange::new(d(2025, 3, 26), d(2025, 4, 1)));
    }

    #[test]
    fn this_weekend_from_midweek() {
        assert_eq!(
            wednesday().this_weekend(),
            DateRange::new(d(2025, 3, 22), d(2025, 3, 23))
        );
    }

    #[test]
    fn this_weekend_on_saturday_starts_today() {
        let calc = DateRangeCalculator::new(d(2025, 3, 22));
        assert_eq!(calc.this_weekend(), DateRange::new(d(2025, 3, 22), d(2025, 3, 23)));
    }

    #[test]
    fn this_weekend_on_sunday_jumps_to_next_saturday() {
        let calc = DateRangeCalculator::new(d(2025, 3, 23));
        assert_eq!(calc.this_weekend(), DateRange::new(d(2025, 3, 29), d(2025, 3, 30)));
    }

    #[test]
    fn this_month_runs_to_last_day() {
        assert_eq!(
            wednesday().this_month(),
            DateRange::new(d(2025, 3, 19), d(2025, 3, 31))
        );
        let feb = DateRangeCalculator::new(d(2024, 2, 10));
        assert_eq!(feb.this_month().end, d(2024, 2, 29));
    }

    #[test]
    fn next_month_covers_whole_month() {
        assert_eq!(
            wednesday().next_month(),
            DateRange::new(d(2025, 4, 1), d(2025, 4, 30))
        );
    }

    #[test]
    fn next_month_wraps_year() {
        let calc = DateRangeCalculator::new(d(2025, 12, 15));
        assert_eq!(calc.next_month(), DateRange::new(d(2026, 1, 1), d(2026, 1, 31)));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(d(2025, 3, 1), d(2025, 3, 5));
        assert!(range.contains(d(2025, 3, 1)));
        assert!(range.contains(d(2025, 3, 5)));
        assert!(!range.contains(d(2025, 2, 28)));
        assert!(!range.contains(d(2025, 3, 6)));
    }

    #[test]
    fn contains_instant_uses_local_day() {
        let range = DateRange::day(d(2025, 3, 5));
        // 2025-03-06T03:00Z is still the evening of March 5th in Denver
        let late = Utc.with_ymd_and_hms(2025, 3, 6, 3, 0, 0).unwrap();
        assert!(range.contains_instant(&late, &Denver));
        assert!(!range.contains_instant(&late, &Utc));
    }

    #[test]
    fn from_args_parses_days() {
        let range = DateRange::from_args("2025-03-01", Some("2025-03-10")).unwrap();
        assert_eq!(range, DateRange::new(d(2025, 3, 1), d(2025, 3, 10)));

        let single = DateRange::from_args("2025-03-01", None).unwrap();
        assert_eq!(single, DateRange::day(d(2025, 3, 1)));

        assert!(matches!(
            DateRange::from_args("March 1st", None),
            Err(ListingsError::InvalidDate(_))
        ));
    }

    #[test]
    fn quick_date_parses_loose_spellings() {
        assert_eq!("this-weekend".parse::<QuickDate>().unwrap(), QuickDate::ThisWeekend);
        assert_eq!("Next_Month".parse::<QuickDate>().unwrap(), QuickDate::NextMonth);
        assert_eq!("this week".parse::<QuickDate>().unwrap(), QuickDate::ThisWeek);
        assert!("someday".parse::<QuickDate>().is_err());
    }

    #[test]
    fn quick_date_resolves_through_calculator() {
        let today = d(2025, 3, 19);
        assert_eq!(QuickDate::ThisWeek.resolve(today), wednesday().this_week());
        assert_eq!(QuickDate::Today.resolve(today), DateRange::day(today));
    }
}
