//! Mood tracking domain logic.
//!
//! Scores follow the 1-10 check-in scale (1 = very bad, 10 = excellent). This
//! module buckets scores into categories, validates check-in payloads before
//! they are submitted, and computes the weekly summary shown on the wellness
//! card.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{MoodEntry, MoodSubmission};

use super::formatting::parse_datetime;

/// Days covered by the wellness card
pub const SUMMARY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl MoodCategory {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => MoodCategory::Poor,
            4..=5 => MoodCategory::BelowAverage,
            6..=7 => MoodCategory::Average,
            8 => MoodCategory::Good,
            _ => MoodCategory::Excellent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Poor => "Poor",
            MoodCategory::BelowAverage => "Below average",
            MoodCategory::Average => "Average",
            MoodCategory::Good => "Good",
            MoodCategory::Excellent => "Excellent",
        }
    }
}

/// Problems with a mood check-in payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoodValidationError {
    ScoreOutOfRange(u8),
    EnergyOutOfRange(u8),
    StressOutOfRange(u8),
    SleepOutOfRange(f64),
    NotesTooLong(usize),
}

impl MoodValidationError {
    pub fn message(&self) -> String {
        match self {
            MoodValidationError::ScoreOutOfRange(_) => "Mood score must be between 1 and 10".to_string(),
            MoodValidationError::EnergyOutOfRange(_) => "Energy level must be between 1 and 10".to_string(),
            MoodValidationError::StressOutOfRange(_) => "Stress level must be between 1 and 10".to_string(),
            MoodValidationError::SleepOutOfRange(hours) => {
                format!("Sleep hours must be between 0 and 24 (got {})", hours)
            }
            MoodValidationError::NotesTooLong(len) => {
                format!("Notes are too long ({} characters). Maximum is {}.", len, MAX_NOTES_LENGTH)
            }
        }
    }
}

const MAX_NOTES_LENGTH: usize = 2000;

fn in_scale(value: u8) -> bool {
    (1..=10).contains(&value)
}

/// Validate a check-in before it is sent to the API
pub fn validate_mood_submission(submission: &MoodSubmission) -> Vec<MoodValidationError> {
    let mut errors = Vec::new();

    if !in_scale(submission.mood_score) {
        errors.push(MoodValidationError::ScoreOutOfRange(submission.mood_score));
    }
    if let Some(energy) = submission.energy_level.filter(|value| !in_scale(*value)) {
        errors.push(MoodValidationError::EnergyOutOfRange(energy));
    }
    if let Some(stress) = submission.stress_level.filter(|value| !in_scale(*value)) {
        errors.push(MoodValidationError::StressOutOfRange(stress));
    }
    if let Some(sleep) = submission.sleep_hours.filter(|hours| !(0.0..=24.0).contains(hours)) {
        errors.push(MoodValidationError::SleepOutOfRange(sleep));
    }
    if let Some(notes) = submission.notes.as_ref().filter(|notes| notes.chars().count() > MAX_NOTES_LENGTH) {
        errors.push(MoodValidationError::NotesTooLong(notes.chars().count()));
    }

    errors
}

/// Averages over a set of mood entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub entry_count: usize,
    pub average_mood: f64,
    pub average_energy: f64,
    pub average_stress: f64,
    pub average_sleep: f64,
    /// (mood + energy + (10 - stress)) / 3
    pub wellness_score: f64,
    pub category: Option<MoodCategory>,
}

impl MoodSummary {
    /// Summary of the check-ins from the last [`SUMMARY_WINDOW_DAYS`] days before `now`
    pub fn weekly(entries: &[MoodEntry], now: NaiveDateTime) -> Self {
        Self::from_entries(&recent_entries(entries, now))
    }

    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let average_mood = mean(entries.iter().map(|entry| f64::from(entry.mood_score)));
        let average_energy = mean(entries.iter().filter_map(|entry| entry.energy_level.map(f64::from)));
        let average_stress = mean(entries.iter().filter_map(|entry| entry.stress_level.map(f64::from)));
        let average_sleep = mean(entries.iter().filter_map(|entry| entry.sleep_hours));

        let wellness_score = round_one_decimal((average_mood + average_energy + (10.0 - average_stress)) / 3.0);
        let category = if entries.is_empty() {
            None
        } else {
            Some(MoodCategory::from_score(average_mood.round() as u8))
        };

        Self {
            entry_count: entries.len(),
            average_mood: round_one_decimal(average_mood),
            average_energy: round_one_decimal(average_energy),
            average_stress: round_one_decimal(average_stress),
            average_sleep: round_one_decimal(average_sleep),
            wellness_score,
            category,
        }
    }
}

/// Entries dated within the summary window. Undated entries are left out.
pub fn recent_entries(entries: &[MoodEntry], now: NaiveDateTime) -> Vec<MoodEntry> {
    let since = now - Duration::days(SUMMARY_WINDOW_DAYS);
    entries
        .iter()
        .filter(|entry| entry.date.as_deref().and_then(parse_datetime).is_some_and(|date| date >= since))
        .cloned()
        .collect()
}

/// Average mood per day, oldest first. Entries without a parseable date are skipped.
pub fn daily_mood_trend(entries: &[MoodEntry]) -> Vec<(NaiveDate, f64)> {
    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let Some(day) = entry.date.as_deref().and_then(parse_datetime).map(|dt| dt.date()) else {
            continue;
        };
        let slot = by_day.entry(day).or_insert((0.0, 0));
        slot.0 += f64::from(entry.mood_score);
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(day, (sum, count))| (day, round_one_decimal(sum / count as f64)))
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry(id: i64, score: u8, energy: Option<u8>, stress: Option<u8>, date: &str) -> MoodEntry {
        MoodEntry {
            id,
            mood_score: score,
            mood_label: None,
            energy_level: energy,
            stress_level: stress,
            sleep_hours: Some(7.0),
            exercise_minutes: None,
            notes: None,
            date: Some(date.to_string()),
        }
    }

    fn valid_submission() -> MoodSubmission {
        MoodSubmission {
            mood_score: 7,
            mood_label: Some("calm".to_string()),
            energy_level: Some(6),
            stress_level: Some(3),
            sleep_hours: Some(7.5),
            exercise_minutes: Some(30),
            notes: None,
        }
    }

    #[test]
    fn test_mood_category_boundaries() {
        assert_eq!(MoodCategory::from_score(1), MoodCategory::Poor);
        assert_eq!(MoodCategory::from_score(3), MoodCategory::Poor);
        assert_eq!(MoodCategory::from_score(4), MoodCategory::BelowAverage);
        assert_eq!(MoodCategory::from_score(7), MoodCategory::Average);
        assert_eq!(MoodCategory::from_score(8), MoodCategory::Good);
        assert_eq!(MoodCategory::from_score(10), MoodCategory::Excellent);
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_mood_submission(&valid_submission()).is_empty());
    }

    #[test]
    fn test_out_of_range_fields_are_reported() {
        let mut submission = valid_submission();
        submission.mood_score = 0;
        submission.stress_level = Some(11);
        submission.sleep_hours = Some(25.0);

        let errors = validate_mood_submission(&submission);

        assert_eq!(
            errors,
            vec![
                MoodValidationError::ScoreOutOfRange(0),
                MoodValidationError::StressOutOfRange(11),
                MoodValidationError::SleepOutOfRange(25.0),
            ]
        );
        assert_eq!(errors[0].message(), "Mood score must be between 1 and 10");
    }

    #[test]
    fn test_summary_skips_missing_values() {
        let entries = vec![
            create_test_entry(1, 8, Some(6), Some(4), "2024-05-01"),
            create_test_entry(2, 6, None, Some(2), "2024-05-02"),
        ];

        let summary = MoodSummary::from_entries(&entries);

        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.average_mood, 7.0);
        assert_eq!(summary.average_energy, 6.0);
        assert_eq!(summary.average_stress, 3.0);
        assert_eq!(summary.average_sleep, 7.0);
        assert_eq!(summary.wellness_score, 6.7);
        assert_eq!(summary.category, Some(MoodCategory::Average));
    }

    #[test]
    fn test_weekly_summary_ignores_old_and_undated_entries() {
        let now = parse_datetime("2024-05-10T12:00:00").unwrap();
        let mut undated = create_test_entry(3, 1, Some(1), Some(9), "");
        undated.date = None;
        let entries = vec![
            create_test_entry(1, 2, Some(2), Some(8), "2020-01-01"),
            create_test_entry(2, 9, Some(8), Some(2), "2024-05-08"),
            undated,
        ];

        let summary = MoodSummary::weekly(&entries, now);

        assert_eq!(summary.entry_count, 1);
        assert_eq!(summary.average_mood, 9.0);
        assert_eq!(summary.average_stress, 2.0);
        assert_eq!(summary.category, Some(MoodCategory::from_score(9)));
    }

    #[test]
    fn test_window_starts_seven_days_back() {
        let now = parse_datetime("2024-05-10T12:00:00").unwrap();
        let entries = vec![
            create_test_entry(1, 5, None, None, "2024-05-03T12:00:00"),
            create_test_entry(2, 5, None, None, "2024-05-03T11:59:00"),
        ];

        let ids: Vec<i64> = recent_entries(&entries, now).iter().map(|entry| entry.id).collect();

        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_summary_of_no_entries() {
        let summary = MoodSummary::from_entries(&[]);

        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.average_mood, 0.0);
        assert_eq!(summary.category, None);
    }

    #[test]
    fn test_daily_trend_groups_by_day() {
        let entries = vec![
            create_test_entry(1, 8, None, None, "2024-05-02T09:00:00"),
            create_test_entry(2, 4, None, None, "2024-05-01"),
            create_test_entry(3, 5, None, None, "2024-05-02T21:00:00"),
            create_test_entry(4, 9, None, None, "garbage"),
        ];

        let trend = daily_mood_trend(&entries);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0], (NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), 4.0));
        assert_eq!(trend[1], (NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), 6.5));
    }
}
