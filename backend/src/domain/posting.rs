//! Job postings and their validated fields.
//!
//! A posting has exactly one owner, fixed at creation. Field limits mirror
//! the inbound validation rules so the registry can trust what it receives.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::email::EmailAddress;
use super::text::{FreeTextError, free_text, optional_free_text};
use super::user::UserId;

/// Bounds for the posting title.
pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 120;
/// Bounds for the company name.
pub const COMPANY_MIN: usize = 2;
pub const COMPANY_MAX: usize = 120;
/// Upper bound for the optional location.
pub const LOCATION_MAX: usize = 120;
/// Upper bound for the optional description.
pub const DESCRIPTION_MAX: usize = 4000;

/// Posting field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingField {
    Title,
    Company,
    Location,
    Description,
}

impl PostingField {
    /// JSON field name used by inbound adapters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Location => "location",
            Self::Description => "description",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Title => "job title",
            Self::Company => "company name",
            Self::Location => "location",
            Self::Description => "description",
        }
    }
}

/// Validation errors raised by posting field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingValidationError {
    InvalidId,
    Required { field: PostingField },
    TooShort { field: PostingField, min: usize },
    TooLong { field: PostingField, max: usize },
    AngleBrackets { field: PostingField },
}

impl PostingValidationError {
    fn from_text(field: PostingField, error: FreeTextError, required: bool) -> Self {
        match error {
            FreeTextError::TooShort { .. } if required => Self::Required { field },
            FreeTextError::TooShort { min } => Self::TooShort { field, min },
            FreeTextError::TooLong { max } => Self::TooLong { field, max },
            FreeTextError::AngleBrackets => Self::AngleBrackets { field },
        }
    }

    /// Field responsible for the failure, if any.
    pub fn field(&self) -> Option<PostingField> {
        match self {
            Self::InvalidId => None,
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::AngleBrackets { field } => Some(*field),
        }
    }

    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_uuid",
            Self::Required { .. } => "required",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::AngleBrackets { .. } => "angle_brackets",
        }
    }
}

impl fmt::Display for PostingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "job id must be a valid UUID"),
            Self::Required { field } => {
                let label = field.label();
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => write!(f, "{}{} is required", first.to_uppercase(), chars.as_str()),
                    None => write!(f, "field is required"),
                }
            }
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {min} characters", field.label())
            }
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.label())
            }
            Self::AngleBrackets { field } => {
                write!(f, "{} must not contain angle brackets", field.label())
            }
        }
    }
}

impl std::error::Error for PostingValidationError {}

/// Stable posting identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String, example = "9b2f3c1e-7f7a-4a51-9a1c-2d0f7f3f5b10")]
pub struct PostingId(Uuid);

impl PostingId {
    /// Parse a posting identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PostingValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| PostingValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! text_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(into = "String")]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = PostingValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

text_newtype!(
    /// Posting title, 3 to 120 characters.
    PostingTitle
);
text_newtype!(
    /// Hiring company, 2 to 120 characters.
    CompanyName
);
text_newtype!(
    /// Free-form location, at most 120 characters.
    Location
);
text_newtype!(
    /// Free-form description, at most 4000 characters.
    Description
);

impl PostingTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PostingValidationError> {
        free_text(raw.as_ref(), TITLE_MIN, TITLE_MAX)
            .map(Self)
            .map_err(|error| {
                let required = raw.as_ref().trim().is_empty();
                PostingValidationError::from_text(PostingField::Title, error, required)
            })
    }
}

impl CompanyName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PostingValidationError> {
        free_text(raw.as_ref(), COMPANY_MIN, COMPANY_MAX)
            .map(Self)
            .map_err(|error| {
                let required = raw.as_ref().trim().is_empty();
                PostingValidationError::from_text(PostingField::Company, error, required)
            })
    }
}

impl Location {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PostingValidationError> {
        free_text(raw.as_ref(), 1, LOCATION_MAX)
            .map(Self)
            .map_err(|error| PostingValidationError::from_text(PostingField::Location, error, false))
    }

    /// Validate optional input, treating blank text as absent.
    pub fn optional(raw: Option<&str>) -> Result<Option<Self>, PostingValidationError> {
        optional_free_text(raw, LOCATION_MAX)
            .map(|value| value.map(Self))
            .map_err(|error| PostingValidationError::from_text(PostingField::Location, error, false))
    }
}

impl Description {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PostingValidationError> {
        free_text(raw.as_ref(), 1, DESCRIPTION_MAX)
            .map(Self)
            .map_err(|error| {
                PostingValidationError::from_text(PostingField::Description, error, false)
            })
    }

    /// Validate optional input, treating blank text as absent.
    pub fn optional(raw: Option<&str>) -> Result<Option<Self>, PostingValidationError> {
        optional_free_text(raw, DESCRIPTION_MAX)
            .map(|value| value.map(Self))
            .map_err(|error| {
                PostingValidationError::from_text(PostingField::Description, error, false)
            })
    }
}

/// Validated input for creating a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosting {
    pub id: PostingId,
    pub title: PostingTitle,
    pub company: CompanyName,
    pub location: Option<Location>,
    pub description: Option<Description>,
    pub owner: UserId,
}

impl NewPosting {
    /// Prepare a posting with a freshly generated identifier.
    pub fn new(
        title: PostingTitle,
        company: CompanyName,
        location: Option<Location>,
        description: Option<Description>,
        owner: UserId,
    ) -> Self {
        Self {
            id: PostingId::random(),
            title,
            company,
            location,
            description,
            owner,
        }
    }
}

/// Persisted job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    id: PostingId,
    #[schema(value_type = String, example = "Backend Engineer")]
    title: PostingTitle,
    #[schema(value_type = String, example = "Acme Ltd")]
    company: CompanyName,
    #[schema(value_type = Option<String>, example = "Remote")]
    location: Option<Location>,
    #[schema(value_type = Option<String>)]
    description: Option<Description>,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner_user_id: UserId,
    created_at: DateTime<Utc>,
}

impl Posting {
    /// Assemble a persisted posting.
    pub fn new(new_posting: NewPosting, created_at: DateTime<Utc>) -> Self {
        let NewPosting {
            id,
            title,
            company,
            location,
            description,
            owner,
        } = new_posting;
        Self {
            id,
            title,
            company,
            location,
            description,
            owner_user_id: owner,
            created_at,
        }
    }

    pub fn id(&self) -> PostingId {
        self.id
    }

    pub fn title(&self) -> &PostingTitle {
        &self.title
    }

    pub fn company(&self) -> &CompanyName {
        &self.company
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// The only user allowed to manage this posting's registrations.
    pub fn owner(&self) -> &UserId {
        &self.owner_user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A posting together with its registrant emails, oldest registration first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostingWithRegistrations {
    #[serde(flatten)]
    pub posting: Posting,
    #[schema(value_type = Vec<String>, example = json!(["a@example.com"]))]
    pub registrations: Vec<EmailAddress>,
}

#[cfg(test)]
mod tests {
    //! Field validation coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", PostingValidationError::Required { field: PostingField::Title })]
    #[case("  ", PostingValidationError::Required { field: PostingField::Title })]
    #[case("ab", PostingValidationError::TooShort { field: PostingField::Title, min: TITLE_MIN })]
    #[case("a <b>", PostingValidationError::AngleBrackets { field: PostingField::Title })]
    fn title_rejects_invalid_values(#[case] raw: &str, #[case] expected: PostingValidationError) {
        assert_eq!(PostingTitle::new(raw), Err(expected));
    }

    #[rstest]
    fn company_rejects_overlong_values() {
        let raw = "c".repeat(COMPANY_MAX + 1);
        assert_eq!(
            CompanyName::new(raw),
            Err(PostingValidationError::TooLong {
                field: PostingField::Company,
                max: COMPANY_MAX
            })
        );
    }

    #[rstest]
    fn required_message_names_the_field() {
        let err = CompanyName::new("").expect_err("blank company");
        assert_eq!(err.to_string(), "Company name is required");
        assert_eq!(err.field(), Some(PostingField::Company));
        assert_eq!(err.code(), "required");
    }

    #[rstest]
    fn optional_fields_treat_blank_as_absent() {
        assert_eq!(Location::optional(Some("   ")), Ok(None));
        assert_eq!(Description::optional(None), Ok(None));
        let location = Location::optional(Some(" Remote ")).expect("valid location");
        assert_eq!(location.map(String::from), Some("Remote".to_owned()));
    }

    #[rstest]
    fn description_rejects_overlong_values() {
        let raw = "d".repeat(DESCRIPTION_MAX + 1);
        let err = Description::optional(Some(&raw)).expect_err("too long");
        assert_eq!(err.field(), Some(PostingField::Description));
    }

    #[rstest]
    fn posting_id_rejects_non_uuid() {
        assert_eq!(PostingId::new("42"), Err(PostingValidationError::InvalidId));
    }

    #[rstest]
    fn posting_with_registrations_flattens_posting_fields() {
        let owner = UserId::random();
        let new_posting = NewPosting::new(
            PostingTitle::new("Backend Engineer").expect("title"),
            CompanyName::new("Acme").expect("company"),
            None,
            None,
            owner,
        );
        let posting = Posting::new(new_posting, Utc::now());
        let detail = PostingWithRegistrations {
            posting,
            registrations: vec![EmailAddress::new("a@example.com").expect("email")],
        };

        let value = serde_json::to_value(&detail).expect("serialise posting");
        assert_eq!(value["title"], "Backend Engineer");
        assert_eq!(value["registrations"][0], "a@example.com");
        assert!(value.get("ownerUserId").is_some());
        assert!(value.get("posting").is_none());
    }
}
