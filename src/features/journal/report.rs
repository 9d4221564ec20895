//! Journal reports.
//!
//! Summarizes recorded sessions over a period, with practice streaks.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use super::entry::JournalEntry;
use super::storage::JournalStorage;
use crate::core::duration::format_seconds_short;
use crate::error::BreatheError;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// All time
    AllTime,
}

impl ReportPeriod {
    /// Parse period from string.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Config` for an unknown period name.
    pub fn parse(s: &str) -> Result<Self, BreatheError> {
        match s.trim().to_lowercase().as_str() {
            "today" | "t" | "d" => Ok(Self::Today),
            "week" | "w" | "7d" => Ok(Self::Week),
            "month" | "m" | "30d" => Ok(Self::Month),
            "all" | "alltime" | "all-time" => Ok(Self::AllTime),
            other => Err(BreatheError::Config(format!(
                "Unknown report period '{other}' (use today, week, month or all)"
            ))),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::AllTime => "All Time",
        }
    }

    /// UTC bounds `[start, end)` of this period in local days ending with
    /// `today`. `None` for all time.
    #[must_use]
    pub fn date_range_for(self, today: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let days_back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
            Self::AllTime => return None,
        };

        let start = local_midnight(today - Duration::days(days_back));
        let end = local_midnight(today + Duration::days(1));
        Some((start, end))
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc))
}

/// Breathing time per pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternTime {
    /// Pattern id
    pub pattern_id: String,
    /// Total seconds
    pub seconds: f64,
    /// Session count
    pub sessions: usize,
}

/// Breathing time per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTime {
    /// Local date (YYYY-MM-DD)
    pub date: String,
    /// Total seconds
    pub seconds: f64,
    /// Session count
    pub sessions: usize,
}

/// Journal report data.
#[derive(Debug, Clone, Serialize)]
pub struct JournalReport {
    /// Report period name
    pub period: String,
    /// Total breathing time in seconds
    pub total_seconds: f64,
    /// Number of sessions
    pub sessions: usize,
    /// Sessions that ran to their configured length
    pub completed_sessions: usize,
    /// Sessions stopped early or unbounded
    pub stopped_sessions: usize,
    /// Average session length in seconds
    pub average_seconds: f64,
    /// Longest session in seconds
    pub longest_seconds: f64,
    /// Full cycles across all sessions
    pub total_cycles: u64,
    /// Time per pattern, most practiced first
    pub by_pattern: Vec<PatternTime>,
    /// Time per day, newest first
    pub daily: Vec<DailyTime>,
    /// Consecutive days with practice, ending today or yesterday
    pub current_streak: u32,
    /// Longest run of consecutive days with practice
    pub longest_streak: u32,
}

impl JournalReport {
    /// Generate a report for the given period.
    ///
    /// Streaks always cover the whole journal.
    ///
    /// # Errors
    ///
    /// Returns an error if the journal cannot be read.
    pub fn generate(storage: &JournalStorage, period: ReportPeriod) -> Result<Self, BreatheError> {
        let today = Local::now().date_naive();
        let entries = match period.date_range_for(today) {
            Some((start, end)) => storage.range(start, end)?,
            None => storage.recent(usize::MAX)?,
        };

        let dates: Vec<NaiveDate> = storage
            .session_starts()?
            .iter()
            .map(|t| t.with_timezone(&Local).date_naive())
            .collect();

        Ok(Self::from_entries(period.display_name(), &entries, &dates, today))
    }

    /// Build a report from already loaded entries.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entries(
        period: &str,
        entries: &[JournalEntry],
        practice_dates: &[NaiveDate],
        today: NaiveDate,
    ) -> Self {
        let sessions = entries.len();
        let completed_sessions = entries.iter().filter(|e| e.is_completed()).count();
        let total_seconds: f64 = entries.iter().map(|e| e.elapsed_seconds).sum();
        let average_seconds = if sessions > 0 {
            total_seconds / sessions as f64
        } else {
            0.0
        };
        let longest_seconds = entries
            .iter()
            .map(|e| e.elapsed_seconds)
            .fold(0.0, f64::max);
        let total_cycles = entries.iter().map(|e| u64::from(e.cycles)).sum();

        let mut pattern_map: HashMap<String, (f64, usize)> = HashMap::new();
        for entry in entries {
            let slot = pattern_map.entry(entry.pattern_id.clone()).or_insert((0.0, 0));
            slot.0 += entry.elapsed_seconds;
            slot.1 += 1;
        }
        let mut by_pattern: Vec<PatternTime> = pattern_map
            .into_iter()
            .map(|(pattern_id, (seconds, sessions))| PatternTime {
                pattern_id,
                seconds,
                sessions,
            })
            .collect();
        by_pattern.sort_by(|a, b| {
            b.seconds
                .total_cmp(&a.seconds)
                .then_with(|| a.pattern_id.cmp(&b.pattern_id))
        });

        let mut daily_map: HashMap<NaiveDate, (f64, usize)> = HashMap::new();
        for entry in entries {
            let slot = daily_map
                .entry(entry.started_at_local().date_naive())
                .or_insert((0.0, 0));
            slot.0 += entry.elapsed_seconds;
            slot.1 += 1;
        }
        let mut daily: Vec<(NaiveDate, f64, usize)> = daily_map
            .into_iter()
            .map(|(date, (seconds, sessions))| (date, seconds, sessions))
            .collect();
        daily.sort_by(|a, b| b.0.cmp(&a.0));

        Self {
            period: period.to_string(),
            total_seconds,
            sessions,
            completed_sessions,
            stopped_sessions: sessions - completed_sessions,
            average_seconds,
            longest_seconds,
            total_cycles,
            by_pattern,
            daily: daily
                .into_iter()
                .map(|(date, seconds, sessions)| DailyTime {
                    date: date.to_string(),
                    seconds,
                    sessions,
                })
                .collect(),
            current_streak: current_streak(practice_dates, today),
            longest_streak: longest_streak(practice_dates),
        }
    }

    /// Format the report for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Breathing Report: {}", self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Total breathing time: {}",
            format_seconds_short(self.total_seconds)
        ));
        lines.push(format!("  Sessions:             {}", self.sessions));
        lines.push(format!("  Completed:            {}", self.completed_sessions));
        lines.push(format!("  Stopped:              {}", self.stopped_sessions));
        lines.push(format!(
            "  Average session:      {}",
            format_seconds_short(self.average_seconds)
        ));
        lines.push(format!(
            "  Longest session:      {}",
            format_seconds_short(self.longest_seconds)
        ));
        lines.push(format!("  Breath cycles:        {}", self.total_cycles));
        lines.push(format!(
            "  Current streak:       {} day{}",
            self.current_streak,
            if self.current_streak == 1 { "" } else { "s" }
        ));
        lines.push(format!(
            "  Longest streak:       {} day{}",
            self.longest_streak,
            if self.longest_streak == 1 { "" } else { "s" }
        ));

        if !self.by_pattern.is_empty() {
            lines.push(String::new());
            lines.push("By Pattern".to_string());
            lines.push("─".repeat(40));
            for pattern in &self.by_pattern {
                lines.push(format!(
                    "  {:<16} {:>8} ({} session{})",
                    pattern.pattern_id,
                    format_seconds_short(pattern.seconds),
                    pattern.sessions,
                    if pattern.sessions == 1 { "" } else { "s" }
                ));
            }
        }

        if !self.daily.is_empty() {
            lines.push(String::new());
            lines.push("Recent Days".to_string());
            lines.push("─".repeat(40));
            for day in self.daily.iter().take(7) {
                lines.push(format!(
                    "  {} {:>8} ({} session{})",
                    day.date,
                    format_seconds_short(day.seconds),
                    day.sessions,
                    if day.sessions == 1 { "" } else { "s" }
                ));
            }
        }

        lines.join("\n")
    }
}

fn unique_sorted(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut dates = dates.to_vec();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Consecutive practice days ending today, or yesterday if today has no
/// session yet.
#[must_use]
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let dates = unique_sorted(dates);

    let mut check = today;
    if dates.binary_search(&check).is_err() {
        check = today - Duration::days(1);
    }

    let mut streak = 0;
    while dates.binary_search(&check).is_ok() {
        streak += 1;
        check -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive practice days.
#[must_use]
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let dates = unique_sorted(dates);

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        run = match previous {
            Some(p) if p + Duration::days(1) == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::journal::entry::EntryOutcome;
    use crate::storage::Database;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(pattern_id: &str, elapsed_seconds: f64, completed: bool) -> JournalEntry {
        let now = Utc::now();
        JournalEntry {
            id: None,
            pattern_id: pattern_id.to_string(),
            timings: "4-4-4-4".to_string(),
            started_at: now,
            ended_at: now,
            elapsed_seconds,
            planned_seconds: None,
            cycles: 2,
            outcome: if completed {
                EntryOutcome::Completed
            } else {
                EntryOutcome::Stopped
            },
            notes: None,
        }
    }

    #[test]
    fn test_report_period_parse() {
        assert_eq!(ReportPeriod::parse("today").unwrap(), ReportPeriod::Today);
        assert_eq!(ReportPeriod::parse("Week").unwrap(), ReportPeriod::Week);
        assert_eq!(ReportPeriod::parse("30d").unwrap(), ReportPeriod::Month);
        assert_eq!(ReportPeriod::parse("all").unwrap(), ReportPeriod::AllTime);
        assert!(ReportPeriod::parse("fortnight").is_err());
    }

    #[test]
    fn test_date_range() {
        let today = day(2026, 3, 10);

        let (start, end) = ReportPeriod::Today.date_range_for(today).unwrap();
        assert!(start < end);
        assert!(end - start <= Duration::hours(25));

        let (week_start, week_end) = ReportPeriod::Week.date_range_for(today).unwrap();
        assert_eq!(week_end, end);
        assert!(end - week_start >= Duration::days(7) - Duration::hours(1));

        assert!(ReportPeriod::AllTime.date_range_for(today).is_none());
    }

    #[test]
    fn test_current_streak() {
        let today = day(2026, 3, 10);
        let dates = [day(2026, 3, 10), day(2026, 3, 9), day(2026, 3, 9), day(2026, 3, 8)];
        assert_eq!(current_streak(&dates, today), 3);

        let from_yesterday = [day(2026, 3, 9), day(2026, 3, 8)];
        assert_eq!(current_streak(&from_yesterday, today), 2);

        let broken = [day(2026, 3, 7)];
        assert_eq!(current_streak(&broken, today), 0);
        assert_eq!(current_streak(&[], today), 0);
    }

    #[test]
    fn test_longest_streak() {
        let dates = [
            day(2026, 1, 1),
            day(2026, 1, 2),
            day(2026, 1, 5),
            day(2026, 1, 6),
            day(2026, 1, 7),
            day(2026, 1, 6),
        ];
        assert_eq!(longest_streak(&dates), 3);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_from_entries() {
        let entries = vec![
            entry("box", 240.0, true),
            entry("sos", 90.0, false),
            entry("box", 120.0, false),
        ];
        let today = Local::now().date_naive();
        let report = JournalReport::from_entries("Test", &entries, &[today], today);

        assert_eq!(report.sessions, 3);
        assert_eq!(report.completed_sessions, 1);
        assert_eq!(report.stopped_sessions, 2);
        assert!((report.total_seconds - 450.0).abs() < 1e-9);
        assert!((report.average_seconds - 150.0).abs() < 1e-9);
        assert!((report.longest_seconds - 240.0).abs() < 1e-9);
        assert_eq!(report.total_cycles, 6);
        assert_eq!(report.by_pattern[0].pattern_id, "box");
        assert_eq!(report.by_pattern[0].sessions, 2);
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.current_streak, 1);

        let text = report.format();
        assert!(text.contains("Breathing Report: Test"));
        assert!(text.contains("By Pattern"));
    }

    #[test]
    fn test_empty_report() {
        let today = day(2026, 3, 10);
        let report = JournalReport::from_entries("Today", &[], &[], today);
        assert_eq!(report.sessions, 0);
        assert!(report.average_seconds.abs() < f64::EPSILON);
        assert!(!report.format().contains("By Pattern"));
    }

    #[test]
    fn test_generate_from_storage() {
        let storage = JournalStorage::with_database(Database::open_in_memory().unwrap());
        let mut e = entry("calm", 180.0, true);
        storage.save(&mut e).unwrap();

        let report = JournalReport::generate(&storage, ReportPeriod::AllTime).unwrap();
        assert_eq!(report.sessions, 1);
        assert_eq!(report.current_streak, 1);

        let today = JournalReport::generate(&storage, ReportPeriod::Today).unwrap();
        assert_eq!(today.sessions, 1);
    }
}
