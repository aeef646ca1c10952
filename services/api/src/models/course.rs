//! Course models

use chrono::{DateTime, Utc};
use common::validation::require;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::optional_text;

/// Accent color used when a course does not pick one
pub const DEFAULT_COURSE_COLOR: &str = "var(--chart-1)";

const LEVEL_MESSAGE: &str = "Level must be Beginner, Intermediate, or Advanced";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(CourseLevel::Beginner),
            "Intermediate" => Ok(CourseLevel::Intermediate),
            "Advanced" => Ok(CourseLevel::Advanced),
            _ => Err(LEVEL_MESSAGE.to_string()),
        }
    }
}

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub details: String,
    pub instructor: String,
    pub level: CourseLevel,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub color: String,
    pub interesting_students: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course fields as submitted to the add and update endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub instructor: Option<String>,
    pub level: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
}

/// Every mutable course field, validated and defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub title: String,
    pub description: String,
    pub details: String,
    pub instructor: String,
    pub level: CourseLevel,
    pub duration: String,
    pub image: Option<String>,
    pub color: String,
}

impl CourseInput {
    /// Validate the payload, reporting the first violated constraint
    pub fn validate(&self) -> Result<CourseFields, String> {
        let title = require(self.title.as_deref(), "Title")?;
        let description = require(self.description.as_deref(), "Description")?;
        let instructor = require(self.instructor.as_deref(), "Instructor")?;
        let level = require(self.level.as_deref(), "Level")?.parse()?;
        let duration = require(self.duration.as_deref(), "Duration")?;

        Ok(CourseFields {
            title: title.to_string(),
            description: description.to_string(),
            details: self.details.clone().unwrap_or_default(),
            instructor: instructor.to_string(),
            level,
            duration: duration.to_string(),
            image: optional_text(self.image.as_ref()),
            color: optional_text(self.color.as_ref())
                .unwrap_or_else(|| DEFAULT_COURSE_COLOR.to_string()),
        })
    }
}

/// Direction of an interest counter adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestAction {
    Increment,
    Decrement,
}

impl FromStr for InterestAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increment" => Ok(InterestAction::Increment),
            "decrement" => Ok(InterestAction::Decrement),
            _ => Err("Invalid action. Must be increment or decrement".to_string()),
        }
    }
}
