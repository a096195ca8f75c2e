//! Draft validation, run before any record reaches the store.
//!
//! The storage layer accepts NULL in every text column; validation is the
//! only gate. A draft that fails here is never persisted.

use std::fmt;

use crate::types::AgentDraft;

/// A rejected draft, naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}


/// Check a draft before persistence.
///
/// Rules: at least one of first/last name must be non-blank, and an email,
/// when given, must contain `@`. Everything else stays optional.
pub fn validate(draft: &AgentDraft) -> Result<(), ValidationError> {
    if draft.first_name.trim().is_empty() && draft.last_name.trim().is_empty() {
        return Err(ValidationError {
            field: "name",
            message: "enter a first or last name".into(),
        });
    }
    let email = draft.email.trim();
    if !email.is_empty() && !email.contains('@') {
        return Err(ValidationError {
            field: "email",
            message: format!("'{}' is not an email address", email),
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_first_name_only() {
        let draft = AgentDraft {
            first_name: "Janet".into(),
            ..AgentDraft::default()
        };
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn accepts_last_name_only() {
        let draft = AgentDraft {
            last_name: "Delton".into(),
            ..AgentDraft::default()
        };
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn rejects_nameless_draft() {
        let err = validate(&AgentDraft::default()).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn whitespace_names_count_as_blank() {
        let draft = AgentDraft {
            first_name: "   ".into(),
            last_name: "\t".into(),
            ..AgentDraft::default()
        };
        assert!(validate(&draft).is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        let draft = AgentDraft {
            first_name: "Janet".into(),
            email: "not-an-email".into(),
            ..AgentDraft::default()
        };
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.field, "email");
        assert!(err.to_string().contains("not-an-email"));
    }

    #[test]
    fn accepts_blank_email() {
        let draft = AgentDraft {
            first_name: "Janet".into(),
            email: "  ".into(),
            ..AgentDraft::default()
        };
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn accepts_well_formed_email() {
        let draft = AgentDraft {
            first_name: "Janet".into(),
            email: "janet.delton@travelexperts.com".into(),
            ..AgentDraft::default()
        };
        assert!(validate(&draft).is_ok());
    }
}
