//! Running applicant profile assembled across a conversation.
//!
//! Fields fill in incrementally as messages reveal them. The merge policy is
//! fixed: an extracted non-null value overwrites (last write wins per field),
//! and an absent field never erases a known value.

pub mod log;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use log::InteractionLog;

/// Lowest GPA accepted on the normalized scale.
pub const GPA_MIN: f64 = 0.0;
/// Highest GPA accepted on the normalized scale.
pub const GPA_MAX: f64 = 4.0;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("GPA {value} is outside the 0.0-4.0 scale")]
    GpaOutOfRange { value: f64 },
}

/// Structured facts known about the applicant.
///
/// Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Intended degree level (Bachelor's, Master's, PhD, or another label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    /// Subject or major.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    /// Destination country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Grade point average, normalized to a 0.0-4.0 scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    /// Yearly budget in USD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Intended start year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_year: Option<i32>,
    /// Free-form preferences that do not fit the fixed fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<HashMap<String, Value>>,
}

impl UserProfile {
    /// Merges `update` into this profile non-destructively.
    ///
    /// The GPA is validated against the 0.0-4.0 scale before anything is
    /// applied, so a rejected update leaves the profile untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::GpaOutOfRange`] when the update carries a GPA
    /// outside the accepted scale. Out-of-range values are never clamped.
    pub fn merged_with(&self, update: &ProfileUpdate) -> Result<UserProfile, ProfileError> {
        if let Some(gpa) = update.gpa {
            if !(GPA_MIN..=GPA_MAX).contains(&gpa) {
                return Err(ProfileError::GpaOutOfRange { value: gpa });
            }
        }

        let mut merged = self.clone();
        if let Some(degree) = &update.degree {
            merged.degree = Some(degree.clone());
        }
        if let Some(field_of_study) = &update.field_of_study {
            merged.field_of_study = Some(field_of_study.clone());
        }
        if let Some(country) = &update.country {
            merged.country = Some(country.clone());
        }
        if let Some(gpa) = update.gpa {
            merged.gpa = Some(gpa);
        }
        if let Some(budget) = update.budget {
            merged.budget = Some(budget);
        }
        if let Some(target_year) = update.target_year {
            merged.target_year = Some(target_year);
        }
        Ok(merged)
    }

    /// Returns `true` when nothing is known yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// One-line rendering of the known fields, for chat replies.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(degree) = &self.degree {
            parts.push(format!("degree: {degree}"));
        }
        if let Some(field_of_study) = &self.field_of_study {
            parts.push(format!("field of study: {field_of_study}"));
        }
        if let Some(country) = &self.country {
            parts.push(format!("country: {country}"));
        }
        if let Some(gpa) = self.gpa {
            parts.push(format!("GPA: {gpa}"));
        }
        if let Some(budget) = self.budget {
            parts.push(format!("budget: ${budget}/year"));
        }
        if let Some(target_year) = self.target_year {
            parts.push(format!("target year: {target_year}"));
        }

        if parts.is_empty() {
            "nothing yet".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Fields pulled out of a single message.
///
/// An absent field means "not mentioned this turn", never "erase".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub country: Option<String>,
    pub gpa: Option<f64>,
    pub budget: Option<f64>,
    pub target_year: Option<i32>,
}

impl ProfileUpdate {
    /// Builds an update from an already-parsed JSON object, coercing
    /// loosely: numeric fields accept numbers or number-shaped strings, and
    /// null or empty values count as absent. Unusable values are skipped
    /// with a warning, never propagated as errors.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            degree: string_field(object, "degree"),
            field_of_study: string_field(object, "field_of_study"),
            country: string_field(object, "country"),
            gpa: numeric_field(object, "gpa"),
            budget: numeric_field(object, "budget"),
            target_year: numeric_field(object, "target_year").map(|year| year.round() as i32),
        }
    }

    /// Returns `true` when no field was identified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Null => None,
        other => {
            tracing::warn!(field = key, value = %other, "Skipping non-string profile value");
            None
        }
    }
}

fn numeric_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    match object.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    tracing::warn!(field = key, value = trimmed, "Skipping non-numeric profile value");
                    None
                }
            }
        }
        Value::Null => None,
        other => {
            tracing::warn!(field = key, value = %other, "Skipping non-numeric profile value");
            None
        }
    }
}
