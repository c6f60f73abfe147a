//! Password strength scoring
//!
//! Scores a password against five independent requirements. The score is
//! feedback for the user; the backup manager applies its own minimums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum character count for the length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum score accepted for an encrypted backup
pub const MIN_BACKUP_SCORE: u8 = 2;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Strength label derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "weak",
            StrengthLabel::Fair => "fair",
            StrengthLabel::Good => "good",
            StrengthLabel::Strong => "strong",
        }
    }

    /// Colour name used when rendering the label
    pub fn color(&self) -> &'static str {
        match self {
            StrengthLabel::Weak => "red",
            StrengthLabel::Fair => "orange",
            StrengthLabel::Good => "yellow",
            StrengthLabel::Strong => "green",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which requirements a password satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl Requirements {
    /// Number of satisfied requirements
    pub fn met_count(&self) -> usize {
        [
            self.length,
            self.uppercase,
            self.lowercase,
            self.number,
            self.special,
        ]
        .iter()
        .filter(|met| **met)
        .count()
    }

    /// Human readable descriptions of the unmet requirements
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.length {
            missing.push("at least 8 characters");
        }
        if !self.uppercase {
            missing.push("an uppercase letter");
        }
        if !self.lowercase {
            missing.push("a lowercase letter");
        }
        if !self.number {
            missing.push("a number");
        }
        if !self.special {
            missing.push("a special character");
        }
        missing
    }
}

/// Result of scoring a password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrengthResult {
    /// 0 (empty) to 4 (all requirements met)
    pub score: u8,
    pub label: StrengthLabel,
    pub requirements: Requirements,
}

/// Score `password`. Never fails.
pub fn evaluate(password: &str) -> PasswordStrengthResult {
    let requirements = Requirements {
        length: password.chars().count() >= MIN_PASSWORD_LENGTH,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    };

    let (score, label) = if password.is_empty() {
        (0, StrengthLabel::Weak)
    } else {
        match requirements.met_count() {
            0..=2 => (1, StrengthLabel::Weak),
            3 => (2, StrengthLabel::Fair),
            4 => (3, StrengthLabel::Good),
            _ => (4, StrengthLabel::Strong),
        }
    };

    PasswordStrengthResult {
        score,
        label,
        requirements,
    }
}
