//! Employee-profile domain models.
//!
//! Categorical fields are declared enumerations mapping to the stable
//! integer codes stored in `user_info`. Parsing rejects unknown values:
//! the server is the trust boundary, so a submission outside the
//! enumeration is a validation failure, never a silent default.

use chrono::NaiveDate;

/// Gender selection, stored as `gender_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// Parse a submitted form value.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "others" => Some(Self::Others),
            _ => None,
        }
    }

    /// The stable integer code stored in the database.
    pub fn code(self) -> i32 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
            Self::Others => 3,
        }
    }
}

/// Position selection, stored as `position_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Staff,
    AssistantManager,
    Manager,
    SeniorManager,
    DeputyGeneralManager,
    GeneralManager,
}

impl Position {
    /// Parse a submitted form value.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "staff" => Some(Self::Staff),
            "assistant_manager" => Some(Self::AssistantManager),
            "manager" => Some(Self::Manager),
            "senior_manager" => Some(Self::SeniorManager),
            "deputy_general_manager" => Some(Self::DeputyGeneralManager),
            "general_manager" => Some(Self::GeneralManager),
            _ => None,
        }
    }

    /// The stable integer code stored in the database.
    pub fn code(self) -> i32 {
        match self {
            Self::Staff => 10,
            Self::AssistantManager => 20,
            Self::Manager => 30,
            Self::SeniorManager => 40,
            Self::DeputyGeneralManager => 50,
            Self::GeneralManager => 60,
        }
    }
}

/// A live profile row from `user_info`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub login_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub first_name_kana: String,
    pub last_name_kana: String,
    pub birth: NaiveDate,
    pub phone_number: String,
    pub address: Option<String>,
    pub gender_id: i32,
    pub position_id: i32,
    pub upper_department: String,
    pub lower_department: String,
    pub career_start_date: NaiveDate,
    pub notes: Option<String>,
}

/// Validated attributes for inserting a new profile.
///
/// Carries the parsed enumerations rather than raw codes; free-text
/// fields are stored verbatim, departments included.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub login_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub first_name_kana: String,
    pub last_name_kana: String,
    pub birth: NaiveDate,
    pub phone_number: String,
    pub address: Option<String>,
    pub gender: Gender,
    pub position: Position,
    pub upper_department: String,
    pub lower_department: String,
    pub career_start_date: NaiveDate,
    pub notes: Option<String>,
}
