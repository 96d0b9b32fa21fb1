//! CV data model: the AI-generated document shape, the ATS score response,
//! and the persisted CV record rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Personal contact block of a generated CV. Every field is optional because
/// the model carries through whatever the (possibly partial) profile provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvEducation {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvComplementaryEducation {
    pub institution: String,
    pub program: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvLanguage {
    pub name: String,
    pub level: String,
}

/// The adapted CV produced by the generation service.
///
/// This is the fixed JSON schema the CV system prompt demands. It is treated
/// as an opaque structured document once produced — stored verbatim in the
/// `generated_content` JSONB column and never algorithmically edited.
/// Missing required sections make deserialization (and thus generation) fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCvContent {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    pub summary: String,
    pub experience: Vec<CvExperience>,
    pub education: Vec<CvEducation>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub complementary_education: Option<Vec<CvComplementaryEducation>>,
    pub languages: Vec<CvLanguage>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
}

impl GeneratedCvContent {
    /// Flattens the document into one text blob for keyword extraction.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.summary.clone()];
        if let Some(info) = &self.personal_info {
            parts.extend(info.job_title.clone());
        }
        for exp in &self.experience {
            parts.push(exp.position.clone());
            parts.push(exp.description.clone());
        }
        for edu in &self.education {
            parts.push(edu.degree.clone());
        }
        parts.extend(self.technical_skills.iter().cloned());
        parts.extend(self.soft_skills.iter().cloned());
        if let Some(certs) = &self.certifications {
            parts.extend(certs.iter().cloned());
        }
        parts.join("\n")
    }
}

/// ATS compatibility analysis for a CV against a job description.
///
/// Ephemeral: only `score` is persisted (on the CV record). The minimum-3
/// suggestions-below-80 policy is instructed to the model, not verified here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreResponse {
    /// Compatibility score, 0-100.
    pub score: i32,
    /// Vacancy keywords found in the CV.
    pub matched_keywords: Vec<String>,
    /// Relevant vacancy keywords absent from the CV.
    pub missing_keywords: Vec<String>,
    /// Concrete improvement suggestions.
    pub suggestions: Vec<String>,
}

/// A persisted generation result. Created once, never mutated, deleted only
/// by explicit user action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_description: String,
    pub cache_key: String,
    pub generated_content: Value,
    pub ats_score: i32,
    pub created_at: DateTime<Utc>,
}

/// Listing shape for the CV history view — skips the content blob.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CvSummary {
    pub id: Uuid,
    pub job_description: String,
    pub ats_score: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CV_JSON: &str = r#"{
        "personalInfo": {
            "fullName": "Ana Torres",
            "jobTitle": "Backend Developer",
            "phone": "+34 600 000 000",
            "email": "ana@example.com",
            "city": "Madrid",
            "linkedin": "https://linkedin.com/in/anatorres",
            "portfolio": null
        },
        "summary": "Backend developer with 6 years of experience in Rust and Python.",
        "experience": [{
            "company": "Acme",
            "position": "Backend Developer",
            "startDate": "Jan 2020",
            "endDate": "Present",
            "description": "Built event-driven microservices in Rust."
        }],
        "education": [{
            "institution": "UCM",
            "degree": "BSc Computer Science",
            "startDate": "Sep 2013",
            "endDate": "Jun 2017"
        }],
        "technicalSkills": ["Rust", "PostgreSQL"],
        "softSkills": ["Communication"],
        "complementaryEducation": [{
            "institution": "Platzi",
            "program": "Cloud Architecture",
            "year": "2023"
        }],
        "languages": [{"name": "Spanish", "level": "Native"}],
        "certifications": ["AWS SAA"]
    }"#;

    #[test]
    fn test_generated_cv_full_deserializes() {
        let cv: GeneratedCvContent = serde_json::from_str(FULL_CV_JSON).unwrap();
        assert_eq!(
            cv.personal_info.as_ref().unwrap().full_name.as_deref(),
            Some("Ana Torres")
        );
        assert_eq!(cv.experience.len(), 1);
        assert_eq!(cv.experience[0].end_date, "Present");
        assert_eq!(cv.technical_skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(cv.certifications.as_deref(), Some(&["AWS SAA".to_string()][..]));
    }

    #[test]
    fn test_generated_cv_optional_sections_may_be_absent() {
        let json = r#"{
            "summary": "s",
            "experience": [],
            "education": [],
            "technicalSkills": [],
            "softSkills": [],
            "languages": []
        }"#;
        let cv: GeneratedCvContent = serde_json::from_str(json).unwrap();
        assert!(cv.personal_info.is_none());
        assert!(cv.complementary_education.is_none());
        assert!(cv.certifications.is_none());
    }

    #[test]
    fn test_generated_cv_missing_required_section_fails() {
        // no "summary"
        let json = r#"{
            "experience": [],
            "education": [],
            "technicalSkills": [],
            "softSkills": [],
            "languages": []
        }"#;
        assert!(serde_json::from_str::<GeneratedCvContent>(json).is_err());
    }

    #[test]
    fn test_searchable_text_covers_all_keyword_sources() {
        let cv: GeneratedCvContent = serde_json::from_str(FULL_CV_JSON).unwrap();
        let text = cv.searchable_text();
        assert!(text.contains("microservices"));
        assert!(text.contains("PostgreSQL"));
        assert!(text.contains("Communication"));
        assert!(text.contains("AWS SAA"));
    }

    #[test]
    fn test_ats_score_response_camel_case() {
        let json = r#"{
            "score": 74,
            "matchedKeywords": ["rust"],
            "missingKeywords": ["kafka"],
            "suggestions": ["Mention Kafka experience", "Add metrics", "Quantify impact"]
        }"#;
        let response: AtsScoreResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.score, 74);
        assert_eq!(response.matched_keywords, vec!["rust"]);
        assert_eq!(response.suggestions.len(), 3);
    }
}
