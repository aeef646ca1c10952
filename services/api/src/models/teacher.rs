//! Teacher models

use chrono::{DateTime, Utc};
use common::validation::{require, validate_email};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::optional_text;

pub const DEFAULT_TEACHER_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err("Gender must be male or female".to_string()),
        }
    }
}

/// Academic degree held by a teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub university: String,
}

/// Teacher entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub bio: String,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub rating: f64,
    pub degrees: Vec<Degree>,
    pub gender: Gender,
    pub backgrounds: Vec<String>,
    pub languages: Vec<String>,
    pub students: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Teacher fields as submitted to the add and update endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<String>,
    pub avatar: Option<String>,
    pub rating: Option<f64>,
    pub degrees: Option<Vec<Degree>>,
    pub gender: Option<String>,
    pub backgrounds: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub students: Option<i64>,
}

/// Every mutable teacher field, validated and defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub bio: String,
    pub experience: String,
    pub avatar: Option<String>,
    pub rating: f64,
    pub degrees: Vec<Degree>,
    pub gender: Gender,
    pub backgrounds: Vec<String>,
    pub languages: Vec<String>,
    pub students: i32,
}

impl TeacherInput {
    /// Validate the payload, reporting the first violated constraint
    pub fn validate(&self) -> Result<TeacherFields, String> {
        let name = require(self.name.as_deref(), "Name")?;
        let email = require(self.email.as_deref(), "Email")?;
        let subject = require(self.subject.as_deref(), "Subject")?;
        let bio = require(self.bio.as_deref(), "Bio")?;
        let experience = require(self.experience.as_deref(), "Experience")?;

        validate_email(email)?;

        let rating = self.rating.unwrap_or(DEFAULT_TEACHER_RATING);
        if !(0.0..=5.0).contains(&rating) {
            return Err("Rating must be between 0 and 5".to_string());
        }

        let gender = match optional_text(self.gender.as_ref()) {
            Some(gender) => gender.parse()?,
            None => Gender::Male,
        };

        let students = self.students.unwrap_or(0);
        if students < 0 {
            return Err("Students must not be negative".to_string());
        }
        let students =
            i32::try_from(students).map_err(|_| "Students is out of range".to_string())?;

        Ok(TeacherFields {
            name: name.to_string(),
            email: email.to_string(),
            phone: optional_text(self.phone.as_ref()),
            subject: subject.to_string(),
            bio: bio.to_string(),
            experience: experience.to_string(),
            avatar: optional_text(self.avatar.as_ref()),
            rating,
            degrees: self.degrees.clone().unwrap_or_default(),
            gender,
            backgrounds: self.backgrounds.clone().unwrap_or_default(),
            languages: self.languages.clone().unwrap_or_default(),
            students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> TeacherInput {
        TeacherInput {
            name: Some("Amina Rahman".to_string()),
            email: Some("amina@alkainaat.edu".to_string()),
            subject: Some("Arabic grammar".to_string()),
            bio: Some("Teaches nahw and sarf".to_string()),
            experience: Some("3-5 years".to_string()),
            ..TeacherInput::default()
        }
    }

    #[test]
    fn optional_fields_take_defaults() {
        let fields = input().validate().unwrap();

        assert_eq!(fields.rating, DEFAULT_TEACHER_RATING);
        assert_eq!(fields.gender, Gender::Male);
        assert_eq!(fields.students, 0);
        assert!(fields.degrees.is_empty());
        assert!(fields.languages.is_empty());
        assert_eq!(fields.phone, None);
    }

    #[test]
    fn rejects_bad_email() {
        let mut teacher = input();
        teacher.email = Some("amina-at-alkainaat".to_string());
        assert_eq!(teacher.validate().unwrap_err(), "Invalid email format");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut teacher = input();
        teacher.rating = Some(7.5);
        assert_eq!(teacher.validate().unwrap_err(), "Rating must be between 0 and 5");

        let mut teacher = input();
        teacher.students = Some(-1);
        assert_eq!(teacher.validate().unwrap_err(), "Students must not be negative");

        let mut teacher = input();
        teacher.gender = Some("other".to_string());
        assert_eq!(teacher.validate().unwrap_err(), "Gender must be male or female");
    }

    #[test]
    fn missing_name_is_reported_first() {
        let teacher = TeacherInput::default();
        assert_eq!(teacher.validate().unwrap_err(), "Name is required");
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let input: TeacherInput = serde_json::from_value(serde_json::json!({
            "name": "Bilal Hassan",
            "email": "bilal@alkainaat.edu",
            "subject": "Fiqh",
            "bio": "Hanafi fiqh",
            "experience": "5+ years",
            "gender": "male",
            "degrees": [{ "degree": "BA Islamic Studies", "university": "Al-Azhar" }],
            "languages": ["Arabic", "Urdu"]
        }))
        .unwrap();

        let fields = input.validate().unwrap();
        assert_eq!(fields.degrees[0].university, "Al-Azhar");
        assert_eq!(fields.languages, vec!["Arabic", "Urdu"]);
    }
}
