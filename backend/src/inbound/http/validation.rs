//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report what is wrong; these helpers turn that into an
//! `invalid_request` error whose details name the offending field and a
//! machine-readable code.

use serde_json::json;

use crate::domain::{
    EmailAddress, EmailValidationError, Error, PostingId, PostingValidationError,
    UserValidationError,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ID_FIELD: FieldName = FieldName::new("id");
pub(crate) const EMAIL_FIELD: FieldName = FieldName::new("email");
pub(crate) const NAME_FIELD: FieldName = FieldName::new("name");

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Parse a path segment as a posting identifier.
pub(crate) fn parse_posting_id(raw: &str, field: FieldName) -> Result<PostingId, Error> {
    PostingId::new(raw).map_err(|_| {
        let field = field.as_str();
        field_error(field, "invalid_uuid", format!("{field} must be a valid UUID"))
    })
}

/// Parse and normalise an email address from a request body.
pub(crate) fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(email_error)
}

pub(crate) fn email_error(err: EmailValidationError) -> Error {
    let code = match err {
        EmailValidationError::Empty => "required",
        EmailValidationError::TooLong { .. } => "too_long",
        EmailValidationError::InvalidFormat => "invalid_email",
    };
    field_error(EMAIL_FIELD.as_str(), code, err.to_string())
}

pub(crate) fn posting_error(err: PostingValidationError) -> Error {
    let field = err.field().map_or(ID_FIELD.as_str(), |field| field.as_str());
    field_error(field, err.code(), err.to_string())
}

pub(crate) fn user_error(err: UserValidationError) -> Error {
    let (field, code) = match &err {
        UserValidationError::Email(inner) => return email_error(inner.clone()),
        UserValidationError::DisplayNameTooShort { .. } => (NAME_FIELD, "too_short"),
        UserValidationError::DisplayNameTooLong { .. } => (NAME_FIELD, "too_long"),
        UserValidationError::DisplayNameInvalidCharacters => (NAME_FIELD, "angle_brackets"),
        UserValidationError::EmptyId | UserValidationError::InvalidId => (ID_FIELD, "invalid_uuid"),
        UserValidationError::UnknownRole { .. } => (FieldName::new("role"), "unknown_role"),
    };
    field_error(field.as_str(), code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, PostingField, PostingTitle};
    use rstest::rstest;

    fn details(err: &Error) -> (String, String) {
        let details = err.details().expect("details present");
        (
            details["field"].as_str().expect("field").to_owned(),
            details["code"].as_str().expect("code").to_owned(),
        )
    }

    #[rstest]
    fn invalid_path_ids_report_the_id_field() {
        let err = parse_posting_id("not-a-uuid", ID_FIELD).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "id must be a valid UUID");
        assert_eq!(details(&err), ("id".to_owned(), "invalid_uuid".to_owned()));
    }

    #[rstest]
    fn valid_path_ids_parse() {
        let id = PostingId::random();
        assert_eq!(parse_posting_id(&id.to_string(), ID_FIELD), Ok(id));
    }

    #[rstest]
    #[case("", "required")]
    #[case("nobody", "invalid_email")]
    fn email_failures_name_the_email_field(#[case] raw: &str, #[case] code: &str) {
        let err = parse_email(raw).expect_err("invalid email");
        assert_eq!(details(&err), ("email".to_owned(), code.to_owned()));
    }

    #[rstest]
    fn posting_failures_name_the_posting_field() {
        let err = PostingTitle::new("ab").map_err(posting_error).expect_err("too short");
        assert_eq!(
            details(&err),
            (PostingField::Title.as_str().to_owned(), "too_short".to_owned())
        );
    }

    #[rstest]
    fn display_name_failures_name_the_name_field() {
        let err = user_error(UserValidationError::DisplayNameInvalidCharacters);
        assert_eq!(details(&err), ("name".to_owned(), "angle_brackets".to_owned()));
    }

    #[rstest]
    fn nested_email_failures_keep_the_email_field() {
        let err = user_error(UserValidationError::Email(EmailValidationError::InvalidFormat));
        assert_eq!(details(&err), ("email".to_owned(), "invalid_email".to_owned()));
    }
}
