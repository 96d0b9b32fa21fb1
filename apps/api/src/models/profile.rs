//! Profile data model: the user's durable professional-background record,
//! source material for every CV generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Profile row as stored. One per user (`user_id` is unique); document-shaped
/// sections live in JSONB columns, skill/certification lists in text arrays.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub summary: Option<String>,
    pub experience: Value,
    pub education: Value,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Value,
    pub certifications: Vec<String>,
    pub complementary_education: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A work-experience entry. `is_current` and `end_date` are mutually
/// exclusive. Ordering within the profile is user-controlled and meaningful
/// (most relevant first) — the system never re-sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default)]
    pub city: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_ongoing: Option<bool>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub status: Option<EducationStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationStatus {
    Finished,
    Ongoing,
    Incomplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplementaryEducationEntry {
    pub institution: String,
    pub program: String,
    pub year: String,
}

const MAX_SUMMARY_CHARS: usize = 2000;

/// Full-document profile replacement payload. Profiles are always replaced
/// whole, never partially patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Vec<LanguageEntry>,
    pub certifications: Vec<String>,
    #[serde(default)]
    pub complementary_education: Vec<ComplementaryEducationEntry>,
}

impl ProfileInput {
    /// Structural validation of a profile document before it replaces the
    /// stored one. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(summary) = &self.summary {
            if summary.chars().count() > MAX_SUMMARY_CHARS {
                return Err(format!("summary must be at most {MAX_SUMMARY_CHARS} characters"));
            }
        }

        for (i, exp) in self.experience.iter().enumerate() {
            for (field, value) in [
                ("company", &exp.company),
                ("position", &exp.position),
                ("startDate", &exp.start_date),
                ("description", &exp.description),
            ] {
                if value.trim().is_empty() {
                    return Err(format!("experience[{i}].{field} must not be empty"));
                }
            }
            let is_current = exp.is_current.unwrap_or(false);
            let has_end = exp.end_date.as_deref().is_some_and(|d| !d.trim().is_empty());
            if is_current && has_end {
                return Err(format!(
                    "experience[{i}]: isCurrent and endDate are mutually exclusive"
                ));
            }
            if !is_current && !has_end {
                return Err(format!(
                    "experience[{i}].endDate is required unless isCurrent is set"
                ));
            }
        }

        for (i, edu) in self.education.iter().enumerate() {
            for (field, value) in [
                ("institution", &edu.institution),
                ("degree", &edu.degree),
                ("startDate", &edu.start_date),
            ] {
                if value.trim().is_empty() {
                    return Err(format!("education[{i}].{field} must not be empty"));
                }
            }
        }

        for (i, lang) in self.languages.iter().enumerate() {
            if lang.name.trim().is_empty() || lang.level.trim().is_empty() {
                return Err(format!("languages[{i}] requires both name and level"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(end_date: Option<&str>, is_current: Option<bool>) -> ExperienceEntry {
        ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: "Ene 2022".to_string(),
            end_date: end_date.map(str::to_string),
            is_current,
            city: None,
            description: "Built things".to_string(),
        }
    }

    fn minimal_input(experience_entries: Vec<ExperienceEntry>) -> ProfileInput {
        ProfileInput {
            full_name: Some("Ana Torres".to_string()),
            job_title: None,
            phone: None,
            email: None,
            city: None,
            linkedin: None,
            portfolio: None,
            summary: Some("Backend developer".to_string()),
            experience: experience_entries,
            education: vec![],
            technical_skills: vec!["Rust".to_string()],
            soft_skills: vec![],
            languages: vec![LanguageEntry {
                name: "English".to_string(),
                level: "C1".to_string(),
            }],
            certifications: vec![],
            complementary_education: vec![],
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        let input = minimal_input(vec![experience(Some("Mar 2024"), None)]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_current_role_without_end_date_passes() {
        let input = minimal_input(vec![experience(None, Some(true))]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_is_current_and_end_date_are_mutually_exclusive() {
        let input = minimal_input(vec![experience(Some("Mar 2024"), Some(true))]);
        let err = input.validate().unwrap_err();
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn test_end_date_required_when_not_current() {
        let input = minimal_input(vec![experience(None, None)]);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_summary_over_2000_chars_rejected() {
        let mut input = minimal_input(vec![]);
        input.summary = Some("x".repeat(2001));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_blank_company_rejected() {
        let mut entry = experience(Some("Mar 2024"), None);
        entry.company = "  ".to_string();
        let input = minimal_input(vec![entry]);
        assert!(input.validate().unwrap_err().contains("company"));
    }

    #[test]
    fn test_input_deserializes_camel_case() {
        let json = r#"{
            "fullName": "Ana",
            "experience": [{
                "company": "Acme",
                "position": "Dev",
                "startDate": "Ene 2022",
                "isCurrent": true,
                "description": "..."
            }],
            "education": [],
            "technicalSkills": ["Rust"],
            "softSkills": [],
            "languages": [],
            "certifications": []
        }"#;
        let input: ProfileInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.full_name.as_deref(), Some("Ana"));
        assert_eq!(input.experience[0].is_current, Some(true));
        assert!(input.complementary_education.is_empty());
    }
}
