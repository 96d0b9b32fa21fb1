//! Export rendering: flattens a generated CV into a clean, single-column,
//! ATS-parseable text document. Templates only change the header framing —
//! no tables, columns or decorative layout, by the same rule the generation
//! prompt imposes on the model.

use serde::{Deserialize, Serialize};

use crate::models::cv::GeneratedCvContent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Classic,
    Modern,
    Minimalist,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimalist => "minimalist",
        }
    }

    fn heading(self, title: &str) -> String {
        match self {
            TemplateKind::Classic => {
                let upper = title.to_uppercase();
                format!("{upper}\n{}\n", "=".repeat(upper.len()))
            }
            TemplateKind::Modern => format!("## {title}\n"),
            TemplateKind::Minimalist => format!("{title}\n"),
        }
    }
}

/// Renders the exported document. Section order is fixed; empty optional
/// sections are skipped entirely.
pub fn render_export(content: &GeneratedCvContent, template: TemplateKind) -> String {
    let mut doc = String::new();

    if let Some(info) = &content.personal_info {
        if let Some(name) = &info.full_name {
            doc.push_str(name);
            doc.push('\n');
        }
        if let Some(title) = &info.job_title {
            doc.push_str(title);
            doc.push('\n');
        }
        let contact: Vec<&str> = [&info.phone, &info.email, &info.city]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !contact.is_empty() {
            doc.push_str(&contact.join(" | "));
            doc.push('\n');
        }
        for link in [&info.linkedin, &info.portfolio].into_iter().flatten() {
            doc.push_str(link);
            doc.push('\n');
        }
        doc.push('\n');
    }

    doc.push_str(&template.heading("Professional Summary"));
    doc.push_str(&content.summary);
    doc.push_str("\n\n");

    if !content.experience.is_empty() {
        doc.push_str(&template.heading("Experience"));
        for exp in &content.experience {
            doc.push_str(&format!(
                "{} — {} ({} - {})\n{}\n\n",
                exp.position, exp.company, exp.start_date, exp.end_date, exp.description
            ));
        }
    }

    if !content.education.is_empty() {
        doc.push_str(&template.heading("Education"));
        for edu in &content.education {
            doc.push_str(&format!(
                "{} — {} ({} - {})\n",
                edu.degree, edu.institution, edu.start_date, edu.end_date
            ));
        }
        doc.push('\n');
    }

    if let Some(entries) = &content.complementary_education {
        if !entries.is_empty() {
            doc.push_str(&template.heading("Complementary Education"));
            for entry in entries {
                doc.push_str(&format!(
                    "{} — {} ({})\n",
                    entry.program, entry.institution, entry.year
                ));
            }
            doc.push('\n');
        }
    }

    if !content.technical_skills.is_empty() {
        doc.push_str(&template.heading("Technical Skills"));
        doc.push_str(&content.technical_skills.join(", "));
        doc.push_str("\n\n");
    }

    if !content.soft_skills.is_empty() {
        doc.push_str(&template.heading("Soft Skills"));
        doc.push_str(&content.soft_skills.join(", "));
        doc.push_str("\n\n");
    }

    if !content.languages.is_empty() {
        doc.push_str(&template.heading("Languages"));
        for lang in &content.languages {
            doc.push_str(&format!("{} — {}\n", lang.name, lang.level));
        }
        doc.push('\n');
    }

    if let Some(certs) = &content.certifications {
        if !certs.is_empty() {
            doc.push_str(&template.heading("Certifications"));
            for cert in certs {
                doc.push_str(cert);
                doc.push('\n');
            }
        }
    }

    doc.trim_end().to_string() + "\n"
}
