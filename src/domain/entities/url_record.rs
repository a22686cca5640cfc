//! Url record entity and its create/update inputs.

use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

use crate::utils::alias_generator::{ALIAS_REGEX, reject_reserved_alias};

/// A stored mapping from an alias to its target URL.
///
/// `id` is assigned by the store and never changes. `visit_count` only grows,
/// and only through the resolution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub alias: String,
    pub target_url: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        alias: String,
        target_url: String,
        visit_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            alias,
            target_url,
            visit_count,
            created_at,
        }
    }
}

/// Input for creating a record. `alias: None` asks for a generated alias.
#[derive(Debug, Clone, Validate)]
pub struct NewUrl {
    #[validate(custom(function = "validate_target_url"))]
    pub target_url: String,

    #[validate(
        length(min = 1, max = 32),
        regex(path = *ALIAS_REGEX, code = "charset"),
        custom(function = "reject_reserved_alias")
    )]
    pub alias: Option<String>,
}

/// Caller-facing changes for an existing record.
///
/// Has no visit counter; only resolution advances it.
#[derive(Debug, Clone, Default, Validate)]
pub struct UrlChanges {
    #[validate(
        length(min = 1, max = 32),
        regex(path = *ALIAS_REGEX, code = "charset"),
        custom(function = "reject_reserved_alias")
    )]
    pub alias: Option<String>,

    #[validate(custom(function = "validate_target_url"))]
    pub target_url: Option<String>,
}

impl UrlChanges {
    /// Returns true if no field would be written.
    pub fn is_empty(&self) -> bool {
        self.alias.is_none() && self.target_url.is_none()
    }
}

/// Partial update as understood by the store.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPatch {
    pub alias: Option<String>,
    pub target_url: Option<String>,
    pub visit_count: Option<i64>,
}

impl From<UrlChanges> for UrlPatch {
    fn from(changes: UrlChanges) -> Self {
        Self {
            alias: changes.alias,
            target_url: changes.target_url,
            visit_count: None,
        }
    }
}

/// Accepts non-empty absolute `http`/`https` URLs with a host.
///
/// The value is stored as typed and later sent back as a `Location` header,
/// so control characters and surrounding whitespace are refused rather than
/// left for the parser to strip.
///
/// Violation codes: `required`, `url_chars`, `url`, `url_scheme`.
pub fn validate_target_url(target_url: &str) -> Result<(), ValidationError> {
    if target_url.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    if target_url.trim() != target_url || target_url.chars().any(char::is_control) {
        return Err(ValidationError::new("url_chars"));
    }

    let parsed = url::Url::parse(target_url).map_err(|_| ValidationError::new("url"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::new("url_scheme"));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::new("url"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::alias_generator::MAX_ALIAS_LENGTH;

    fn new_url(target_url: &str, alias: Option<&str>) -> NewUrl {
        NewUrl {
            target_url: target_url.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    fn first_code(errors: &validator::ValidationErrors, field: &str) -> String {
        errors.field_errors()[field][0].code.to_string()
    }

    #[test]
    fn test_url_record_creation() {
        let now = Utc::now();
        let record = UrlRecord::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            now,
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.alias, "abc123");
        assert_eq!(record.target_url, "https://example.com");
        assert_eq!(record.visit_count, 0);
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_new_url_valid_without_alias() {
        assert!(new_url("https://example.com", None).validate().is_ok());
    }

    #[test]
    fn test_new_url_valid_with_alias() {
        assert!(
            new_url("http://example.com/a?b=c", Some("My-Link_1"))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_new_url_empty_target_is_required() {
        let errors = new_url("", None).validate().unwrap_err();
        assert_eq!(first_code(&errors, "target_url"), "required");
    }

    #[test]
    fn test_new_url_malformed_target() {
        let errors = new_url("not a url", None).validate().unwrap_err();
        assert_eq!(first_code(&errors, "target_url"), "url");
    }

    #[test]
    fn test_new_url_rejects_non_http_scheme() {
        let errors = new_url("javascript:alert(1)", None)
            .validate()
            .unwrap_err();
        assert_eq!(first_code(&errors, "target_url"), "url_scheme");

        let errors = new_url("ftp://example.com/file", None)
            .validate()
            .unwrap_err();
        assert_eq!(first_code(&errors, "target_url"), "url_scheme");
    }

    #[test]
    fn test_new_url_rejects_control_characters() {
        for target in [
            "https://exa\nmple.com/",
            "https://example.com/\tpath",
            "https://example.com/\r",
            "https://example.com/\u{7f}",
            " https://example.com/",
            "https://example.com/ ",
        ] {
            let errors = new_url(target, None).validate().unwrap_err();
            assert_eq!(first_code(&errors, "target_url"), "url_chars", "{target:?}");
        }
    }

    #[test]
    fn test_new_url_alias_too_long() {
        let long = "a".repeat(MAX_ALIAS_LENGTH + 1);
        let errors = new_url("https://example.com", Some(&long))
            .validate()
            .unwrap_err();
        assert_eq!(first_code(&errors, "alias"), "length");
    }

    #[test]
    fn test_new_url_alias_at_max_length() {
        let longest = "a".repeat(MAX_ALIAS_LENGTH);
        assert!(
            new_url("https://example.com", Some(&longest))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_new_url_alias_bad_characters() {
        let errors = new_url("https://example.com", Some("has space"))
            .validate()
            .unwrap_err();
        assert_eq!(first_code(&errors, "alias"), "charset");
    }

    #[test]
    fn test_new_url_alias_reserved() {
        let errors = new_url("https://example.com", Some("health"))
            .validate()
            .unwrap_err();
        assert_eq!(first_code(&errors, "alias"), "reserved");
    }

    #[test]
    fn test_url_changes_empty_is_valid() {
        let changes = UrlChanges::default();
        assert!(changes.is_empty());
        assert!(changes.validate().is_ok());
    }

    #[test]
    fn test_url_changes_validates_present_fields() {
        let changes = UrlChanges {
            alias: Some("custom".to_string()),
            target_url: Some("mailto:someone@example.com".to_string()),
        };

        let errors = changes.validate().unwrap_err();
        assert!(!errors.field_errors().contains_key("alias"));
        assert_eq!(first_code(&errors, "target_url"), "url_scheme");
    }

    #[test]
    fn test_patch_from_changes_never_touches_visit_count() {
        let patch = UrlPatch::from(UrlChanges {
            alias: Some("custom".to_string()),
            target_url: None,
        });

        assert_eq!(patch.alias.as_deref(), Some("custom"));
        assert!(patch.target_url.is_none());
        assert!(patch.visit_count.is_none());
    }
}
