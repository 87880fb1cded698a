use std::time::{Duration, Instant};

use crate::common::Profile;

pub const GOAL_MIN_CHARS: usize = 10;
pub const GOAL_MAX_CHARS: usize = 500;
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_SAVED_MESSAGE: &str = "Profile updated! You are ready to chat!";

pub const ENGLISH_LEVELS: [&str; 6] = [
    "Beginner",
    "Elementary",
    "Intermediate",
    "Upper intermediate",
    "Advanced",
    "Proficient",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Please select your English level.")]
    MissingLevel,
    #[error("Please describe your learning goal.")]
    MissingGoal,
    #[error("Please describe your goal in more detail (at least 10 characters).")]
    GoalTooShort,
    #[error("The goal description must be at most 500 characters.")]
    GoalTooLong,
}

/// Editable state of the profile setup screen.
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub english_level: String,
    pub learning_goal: String,
    /// Comma separated genres as typed by the user.
    pub music_genres: String,
    pub is_loading: bool,
    redirect_at: Option<Instant>,
}

impl ProfileForm {
    /// Rules run in order; the first failure wins.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let goal = self.learning_goal.trim();
        if self.english_level.trim().is_empty() {
            return Err(ProfileValidationError::MissingLevel);
        }
        if goal.is_empty() {
            return Err(ProfileValidationError::MissingGoal);
        }
        let goal_len = goal.chars().count();
        if goal_len < GOAL_MIN_CHARS {
            return Err(ProfileValidationError::GoalTooShort);
        }
        if goal_len > GOAL_MAX_CHARS {
            return Err(ProfileValidationError::GoalTooLong);
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        !self.is_loading && self.validate().is_ok()
    }

    /// Validated, trimmed record ready for `/api/profile/save`.
    pub fn submission(&self) -> Result<Profile, ProfileValidationError> {
        self.validate()?;
        Ok(Profile {
            english_level: self.english_level.trim().to_string(),
            learning_goal: self.learning_goal.trim().to_string(),
            music_genres: self
                .music_genres
                .split(',')
                .map(str::trim)
                .filter(|genre| !genre.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn fill(&mut self, profile: &Profile) {
        self.english_level = profile.english_level.clone();
        self.learning_goal = profile.learning_goal.clone();
        self.music_genres = profile
            .music_genres
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
    }

    /// Empties the fields only; an in-flight save and its redirect survive.
    pub fn clear(&mut self) {
        self.english_level.clear();
        self.learning_goal.clear();
        self.music_genres.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn schedule_redirect(&mut self, now: Instant) {
        self.redirect_at = Some(now + REDIRECT_DELAY);
    }

    /// True once, when the post-save redirect is due.
    pub fn take_due_redirect(&mut self, now: Instant) -> bool {
        match self.redirect_at {
            Some(deadline) if now >= deadline => {
                self.redirect_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect_at.is_some()
    }
}
