//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, zipcodes and enumerated values are enforced at the boundary.

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// US postal code in 5 digit or ZIP+4 form.
static ZIPCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zipcode regex is valid"));

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Zipcode did not match `NNNNN` or `NNNNN-NNNN`.
    #[error("zipcode must be a 5 or 9 digit US postal code")]
    InvalidZipcode,
    /// Category is not part of the closed category set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(ResourceId, "Unique identifier for a resource.", "resource_id");
id_newtype!(NoteId, "Unique identifier for a resource note.", "note_id");
id_newtype!(UserId, "Unique identifier for a user.", "user_id");

non_empty_string_newtype!(
    OrganizationName,
    "Organization name enforcing non-empty values.",
    "organization"
);
non_empty_string_newtype!(
    ProgramName,
    "Program name enforcing non-empty values.",
    "program"
);
non_empty_string_newtype!(
    NoteContent,
    "Note body enforcing non-empty values.",
    "note content"
);
non_empty_string_newtype!(Username, "Display name of a user.", "username");

/// US postal code, either `NNNNN` or `NNNNN-NNNN`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Zipcode(String);

impl Zipcode {
    /// Trims the input and validates it against the postal code pattern.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if ZIPCODE_REGEX.is_match(&trimmed) {
            Ok(Self(trimmed))
        } else {
            Err(TypeConstraintError::InvalidZipcode)
        }
    }

    /// Borrow the zipcode as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Zipcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Zipcode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Zipcode {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Zipcode> for String {
    fn from(value: Zipcode) -> Self {
        value.0
    }
}

/// Closed set of categories a resource can be filed under.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceCategory {
    Housing,
    Food,
    Healthcare,
    Employment,
    Legal,
    Transportation,
    Childcare,
    SubstanceAbuse,
    MentalHealth,
    Education,
    FinancialAssistance,
    SeniorServices,
    VeteransServices,
    Clothing,
    DomesticViolence,
    CrisisSupport,
    DisabilityServices,
    LgbtqServices,
}

impl ResourceCategory {
    /// Every category in display order.
    pub const ALL: [ResourceCategory; 18] = [
        Self::Housing,
        Self::Food,
        Self::Healthcare,
        Self::Employment,
        Self::Legal,
        Self::Transportation,
        Self::Childcare,
        Self::SubstanceAbuse,
        Self::MentalHealth,
        Self::Education,
        Self::FinancialAssistance,
        Self::SeniorServices,
        Self::VeteransServices,
        Self::Clothing,
        Self::DomesticViolence,
        Self::CrisisSupport,
        Self::DisabilityServices,
        Self::LgbtqServices,
    ];

    /// String representation used in persistence and in the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Healthcare => "Healthcare",
            Self::Employment => "Employment",
            Self::Legal => "Legal",
            Self::Transportation => "Transportation",
            Self::Childcare => "Childcare",
            Self::SubstanceAbuse => "Substance-Abuse",
            Self::MentalHealth => "Mental Health",
            Self::Education => "Education",
            Self::FinancialAssistance => "Financial Assistance",
            Self::SeniorServices => "Senior Services",
            Self::VeteransServices => "Veterans Services",
            Self::Clothing => "Clothing",
            Self::DomesticViolence => "Domestic Violence",
            Self::CrisisSupport => "Crisis Support",
            Self::DisabilityServices => "Disability Services",
            Self::LgbtqServices => "LGBTQ+ Services",
        }
    }
}

impl Display for ResourceCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ResourceCategory {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| TypeConstraintError::UnknownCategory(value.to_string()))
    }
}

impl TryFrom<String> for ResourceCategory {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<ResourceCategory> for String {
    fn from(value: ResourceCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Availability of a resource.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    #[default]
    Available,
    Limited,
    Unavailable,
}

impl ResourceStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Limited => "LIMITED",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ResourceStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "LIMITED" => Ok(Self::Limited),
            "UNAVAILABLE" => Ok(Self::Unavailable),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "resource status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for ResourceStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Role carried by an authenticated user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    CaseManager,
    Admin,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaseManager => "CASE_MANAGER",
            Self::Admin => "ADMIN",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CASE_MANAGER" => Ok(Self::CaseManager),
            "ADMIN" => Ok(Self::Admin),
            other => Err(TypeConstraintError::InvalidValue(format!("role: {other}"))),
        }
    }
}
