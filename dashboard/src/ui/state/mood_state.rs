//! # Mood Check-in State
//!
//! Draft of the quick mood check-in widget. Sliders start at a neutral 5;
//! energy, stress and sleep are optional and only sent when touched.

use shared::MoodSubmission;

use super::list_view_state::SubmitOutcome;
use super::notifications::NotificationQueue;
use crate::backend::domain::{validate_mood_submission, MoodCategory};

pub trait MoodCallbacks {
    fn on_mood_submit(&mut self, payload: &MoodSubmission);
}

#[derive(Debug, Default)]
pub struct MoodSubmissionQueue {
    submissions: Vec<MoodSubmission>,
}

impl MoodSubmissionQueue {
    pub fn drain(&mut self) -> Vec<MoodSubmission> {
        std::mem::take(&mut self.submissions)
    }
}

impl MoodCallbacks for MoodSubmissionQueue {
    fn on_mood_submit(&mut self, payload: &MoodSubmission) {
        self.submissions.push(payload.clone());
    }
}

pub struct MoodFormState<C: MoodCallbacks> {
    pub mood_score: u8,
    pub mood_label: String,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub exercise_minutes: Option<u32>,
    pub notes: String,
    errors: Vec<String>,
    pending: bool,
    callbacks: C,
}

impl<C: MoodCallbacks> MoodFormState<C> {
    pub fn new(callbacks: C) -> Self {
        Self {
            mood_score: 5,
            mood_label: String::new(),
            energy_level: None,
            stress_level: None,
            sleep_hours: None,
            exercise_minutes: None,
            notes: String::new(),
            errors: Vec::new(),
            pending: false,
            callbacks,
        }
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn can_submit(&self) -> bool {
        !self.pending
    }

    /// Category of the current slider value, shown next to it
    pub fn category(&self) -> MoodCategory {
        MoodCategory::from_score(self.mood_score)
    }

    pub fn payload(&self) -> MoodSubmission {
        let label = self.mood_label.trim();
        let notes = self.notes.trim();
        MoodSubmission {
            mood_score: self.mood_score,
            mood_label: (!label.is_empty()).then(|| label.to_string()),
            energy_level: self.energy_level,
            stress_level: self.stress_level,
            sleep_hours: self.sleep_hours,
            exercise_minutes: self.exercise_minutes,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }

    pub fn submit(&mut self) -> bool {
        if self.pending {
            return false;
        }

        let payload = self.payload();
        let problems = validate_mood_submission(&payload);
        if !problems.is_empty() {
            self.errors = problems.iter().map(|problem| problem.message()).collect();
            return false;
        }

        self.errors.clear();
        self.pending = true;
        self.callbacks.on_mood_submit(&payload);
        true
    }

    /// Clear pending; a successful check-in resets the form, a failed one
    /// keeps every field so the user can retry
    pub fn finish_submit(&mut self, outcome: SubmitOutcome, notifications: &mut NotificationQueue) {
        self.pending = false;
        match outcome {
            SubmitOutcome::Succeeded { message } => {
                notifications.push_success(message.unwrap_or_else(|| "Mood logged".to_string()));
                self.reset();
            }
            SubmitOutcome::Failed { message } => {
                notifications.push_error(message);
            }
        }
    }

    fn reset(&mut self) {
        self.mood_score = 5;
        self.mood_label.clear();
        self.energy_level = None;
        self.stress_level = None;
        self.sleep_hours = None;
        self.exercise_minutes = None;
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_forwards_payload_once() {
        let mut form = MoodFormState::new(MoodSubmissionQueue::default());
        form.mood_score = 8;
        form.mood_label = " happy ".to_string();
        form.energy_level = Some(7);

        assert!(form.submit());
        assert!(!form.submit());

        let sent = form.callbacks_mut().drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].mood_label.as_deref(), Some("happy"));
        assert_eq!(sent[0].notes, None);
        assert_eq!(form.category(), MoodCategory::Good);
    }

    #[test]
    fn test_out_of_range_values_are_not_sent() {
        let mut form = MoodFormState::new(MoodSubmissionQueue::default());
        form.stress_level = Some(0);

        assert!(!form.submit());
        assert_eq!(form.errors(), ["Stress level must be between 1 and 10".to_string()]);
        assert!(form.callbacks_mut().drain().is_empty());
    }

    #[test]
    fn test_failure_keeps_fields_and_success_resets() {
        let mut form = MoodFormState::new(MoodSubmissionQueue::default());
        let mut notifications = NotificationQueue::new();
        form.mood_score = 3;
        form.notes = "long day".to_string();
        form.submit();

        form.finish_submit(
            SubmitOutcome::Failed {
                message: "Something went wrong. Please try again.".to_string(),
            },
            &mut notifications,
        );
        assert_eq!(form.mood_score, 3);
        assert_eq!(form.notes, "long day");
        assert!(form.can_submit());

        form.submit();
        form.finish_submit(SubmitOutcome::Succeeded { message: None }, &mut notifications);
        assert_eq!(form.mood_score, 5);
        assert!(form.notes.is_empty());
        assert_eq!(notifications.len(), 2);
    }
}
