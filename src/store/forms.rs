use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::store::models::{NewJob, NewResume};

/// MIME types the CV picker accepts: PDF, legacy Word, OOXML Word
pub const ACCEPTED_CV_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// CV upload form. All four user-facing fields are required and the file
/// must declare an accepted MIME type; validation runs before the store is
/// ever touched, so the store can assume clean input.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadForm {
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,

    #[validate(length(min = 1, message = "University is required"))]
    pub university: String,

    #[validate(custom(function = numeric_salary))]
    pub expected_salary: String,

    #[validate(length(min = 1, message = "A CV file is required"))]
    pub file_name: String,

    /// Declared MIME type of the selected file; content is never read
    #[validate(custom(function = accepted_cv_type))]
    pub mime_type: String,
}

impl UploadForm {
    pub fn into_new_resume(self) -> NewResume {
        NewResume {
            position: self.position,
            university: self.university,
            expected_salary: self.expected_salary,
            file_name: self.file_name,
        }
    }
}

/// Job-posting form. Title presence is validated here; the salary-range
/// invariant belongs to the creation path in the store.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingForm {
    #[validate(length(min = 1, message = "Position title is required"))]
    pub title: String,

    pub salary_min: u32,
    pub salary_max: u32,

    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub responsibilities: String,

    /// Optional reference CV attached by the recruiter
    #[serde(default)]
    pub cv_file_name: Option<String>,
}

impl JobPostingForm {
    pub fn into_new_job(self) -> NewJob {
        NewJob {
            title: self.title,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            description: self.description,
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            cv_file_name: self.cv_file_name,
        }
    }
}

fn numeric_salary(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    let mut err = ValidationError::new("numeric_salary");
    err.message = Some("Expected salary must be a number".into());
    Err(err)
}

fn accepted_cv_type(mime: &str) -> Result<(), ValidationError> {
    if ACCEPTED_CV_TYPES.contains(&mime) {
        return Ok(());
    }
    let mut err = ValidationError::new("cv_type");
    err.message = Some("Please upload a PDF or Word document".into());
    Err(err)
}
