//! Resource shapes: stored records, their create/update payloads, and report rows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::timestamp;
use crate::validation::{
    validate_email, validate_float_range, validate_optional_text, validate_range, validate_text,
    Validate, ValidationError, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH,
};

/// New public identifier for a record.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_true() -> bool {
    true
}

// -------------------------
// Company
// -------------------------

/// The company profile. Exactly one lives in `company_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub tagline: String,
    pub tagline_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub address_en: Option<String>,
    /// Average rating, 0 to 5.
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    pub working_hours_weekdays: String,
    pub working_hours_friday: String,
    pub whatsapp: String,
    pub map_url: Option<String>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Validate for CompanyInfo {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_float_range("rating", self.rating, 0.0, 5.0)?;
        validate_range("review_count", self.review_count, 0, i64::MAX)
    }
}

/// Partial update of the company profile; only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_weekdays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_friday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl Validate for CompanyInfoUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        let short = [
            ("name", &self.name),
            ("tagline", &self.tagline),
            ("phone", &self.phone),
            ("address", &self.address),
            ("working_hours_weekdays", &self.working_hours_weekdays),
            ("working_hours_friday", &self.working_hours_friday),
            ("whatsapp", &self.whatsapp),
        ];
        for (field, value) in short {
            validate_optional_text(field, value.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        }
        validate_optional_text("description", self.description.as_deref(), MAX_LONG_TEXT_LENGTH)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(rating) = self.rating {
            validate_float_range("rating", rating, 0.0, 5.0)?;
        }
        if let Some(review_count) = self.review_count {
            validate_range("review_count", review_count, 0, i64::MAX)?;
        }
        Ok(())
    }
}

// -------------------------
// Services
// -------------------------

/// A service offered by the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    /// Icon class name (e.g. "fas fa-home").
    pub icon: String,
    /// Free-form grouping label.
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub title: String,
    #[serde(default)]
    pub title_en: Option<String>,
    pub description: String,
    #[serde(default)]
    pub description_en: Option<String>,
    pub icon: String,
    pub category: String,
}

impl Validate for ServiceCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("description", &self.description, MAX_LONG_TEXT_LENGTH)?;
        validate_text("icon", &self.icon, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("category", &self.category, MAX_SHORT_TEXT_LENGTH)
    }
}

impl Validate for Service {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("description", &self.description, MAX_LONG_TEXT_LENGTH)?;
        validate_text("icon", &self.icon, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("category", &self.category, MAX_SHORT_TEXT_LENGTH)
    }
}

impl Service {
    pub fn from_create(input: ServiceCreate) -> Self {
        Self {
            id: new_id(),
            title: input.title,
            title_en: input.title_en,
            description: input.description,
            description_en: input.description_en,
            icon: input.icon,
            category: input.category,
            is_active: true,
            created_at: timestamp::now(),
        }
    }
}

// -------------------------
// Projects
// -------------------------

/// A gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub title_en: Option<String>,
    pub description: String,
    pub description_en: Option<String>,
    pub image_url: String,
    pub category: String,
    pub location: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Mutable fields of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub title: String,
    #[serde(default)]
    pub title_en: Option<String>,
    pub description: String,
    #[serde(default)]
    pub description_en: Option<String>,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
}

impl Validate for ProjectCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("description", &self.description, MAX_LONG_TEXT_LENGTH)?;
        validate_text("image_url", &self.image_url, MAX_LONG_TEXT_LENGTH)?;
        validate_text("category", &self.category, MAX_SHORT_TEXT_LENGTH)?;
        validate_optional_text("location", self.location.as_deref(), MAX_SHORT_TEXT_LENGTH)
    }
}

impl Validate for Project {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("description", &self.description, MAX_LONG_TEXT_LENGTH)?;
        validate_text("image_url", &self.image_url, MAX_LONG_TEXT_LENGTH)?;
        validate_text("category", &self.category, MAX_SHORT_TEXT_LENGTH)
    }
}

impl Project {
    pub fn from_create(input: ProjectCreate) -> Self {
        Self {
            id: new_id(),
            title: input.title,
            title_en: input.title_en,
            description: input.description,
            description_en: input.description_en,
            image_url: input.image_url,
            category: input.category,
            location: input.location,
            completion_date: input.completion_date,
            is_featured: input.is_featured,
            is_active: true,
            created_at: timestamp::now(),
        }
    }
}

// -------------------------
// Reviews
// -------------------------

/// Lowest accepted review rating.
pub const MIN_REVIEW_RATING: i64 = 1;
/// Highest accepted review rating.
pub const MAX_REVIEW_RATING: i64 = 5;

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub rating: i64,
    pub text: String,
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub google_review_id: Option<String>,
}

impl Validate for Review {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_range("rating", self.rating, MIN_REVIEW_RATING, MAX_REVIEW_RATING)
    }
}

/// Mutable fields of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub name: String,
    pub rating: i64,
    pub text: String,
    /// Defaults to now on create; kept as stored on update when absent.
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub google_review_id: Option<String>,
}

impl Validate for ReviewCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_range("rating", self.rating, MIN_REVIEW_RATING, MAX_REVIEW_RATING)?;
        validate_text("name", &self.name, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("text", &self.text, MAX_LONG_TEXT_LENGTH)
    }
}

impl Review {
    pub fn from_create(input: ReviewCreate) -> Self {
        Self {
            id: new_id(),
            name: input.name,
            rating: input.rating,
            text: input.text,
            date: input.date.unwrap_or_else(timestamp::now),
            is_verified: true,
            is_active: true,
            google_review_id: input.google_review_id,
        }
    }
}

/// Aggregate view over active reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Rounded to one decimal; 0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: u64,
    /// Keys "1" through "5", always all present.
    pub rating_distribution: std::collections::BTreeMap<String, u64>,
}

// -------------------------
// Contact forms
// -------------------------

/// Follow-up state of a contact form. Any state may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Contacted,
    Completed,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 3] = [
        ContactStatus::Pending,
        ContactStatus::Contacted,
        ContactStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// A contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ContactStatus,
}

/// Fields supplied by the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for ContactFormCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("phone", &self.phone, MAX_SHORT_TEXT_LENGTH)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_optional_text("service", self.service.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        validate_optional_text("message", self.message.as_deref(), MAX_LONG_TEXT_LENGTH)
    }
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, MAX_SHORT_TEXT_LENGTH)?;
        validate_text("phone", &self.phone, MAX_SHORT_TEXT_LENGTH)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl ContactForm {
    pub fn from_create(input: ContactFormCreate) -> Self {
        Self {
            id: new_id(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            service: input.service,
            message: input.message,
            created_at: timestamp::now(),
            status: ContactStatus::Pending,
        }
    }
}

/// Submissions created in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

/// Reporting view over contact forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total: u64,
    pub pending: u64,
    pub contacted: u64,
    pub completed: u64,
    pub monthly: Vec<MonthlyCount>,
}

// -------------------------
// Statistics
// -------------------------

/// The four headline counters shown on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsCounters {
    pub projects_completed: i64,
    pub happy_clients: i64,
    pub years_experience: i64,
    pub team_members: i64,
}

impl Default for StatisticsCounters {
    fn default() -> Self {
        Self {
            projects_completed: 100,
            happy_clients: 150,
            years_experience: 5,
            team_members: 25,
        }
    }
}

/// The statistics singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub id: String,
    #[serde(flatten)]
    pub counters: StatisticsCounters,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Statistics {
    pub fn new(counters: StatisticsCounters) -> Self {
        Self {
            id: new_id(),
            counters,
            updated_at: timestamp::now(),
        }
    }
}

/// Partial update of the statistics counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_completed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_clients: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<i64>,
}

impl Validate for StatisticsUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        let counters = [
            ("projects_completed", self.projects_completed),
            ("happy_clients", self.happy_clients),
            ("years_experience", self.years_experience),
            ("team_members", self.team_members),
        ];
        for (field, value) in counters {
            if let Some(value) = value {
                validate_range(field, value, 0, i64::MAX)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_status_parse() {
        assert_eq!("pending".parse::<ContactStatus>(), Ok(ContactStatus::Pending));
        assert_eq!("completed".parse::<ContactStatus>(), Ok(ContactStatus::Completed));
        assert!(matches!(
            "archived".parse::<ContactStatus>(),
            Err(ValidationError::InvalidStatus(_))
        ));
        assert_eq!(ContactStatus::default(), ContactStatus::Pending);
    }

    #[test]
    fn test_review_rating_bounds() {
        let mut input = ReviewCreate {
            name: "Sara".to_string(),
            rating: 0,
            text: "Great work".to_string(),
            date: None,
            google_review_id: None,
        };
        assert!(input.validate().is_err());
        input.rating = 6;
        assert!(input.validate().is_err());
        input.rating = 5;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_company_update_skips_absent_fields() {
        let update = CompanyInfoUpdate {
            phone: Some("+966 50 000 0000".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"phone": "+966 50 000 0000"}));
    }

    #[test]
    fn test_statistics_serialize_flat() {
        let stats = Statistics::new(StatisticsCounters::default());
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["projects_completed"], 100);
        assert_eq!(value["team_members"], 25);
        assert!(value.get("counters").is_none());
    }
}
