use serde::{Deserialize, Serialize};

/// Agency every record belongs to. There is no agency table; the original
/// schema carried the column anyway, so we keep it.
pub const DEFAULT_AGENCY_ID: i64 = 1;

/// Static display asset shown for every agent.
pub const DEFAULT_IMAGE_REF: &str = "blank_profile_image";


/// A travel-agency staff record — the sole domain entity.
///
/// `id` is assigned by the store at insert time and never changes. All text
/// fields are nullable at the storage layer; validation happens before
/// persistence, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub business_phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub image_ref: String,
    pub agency_id: Option<i64>,
}


/// The editable field set collected by the detail form.
///
/// Every user-editable attribute as a plain string; an empty (or
/// whitespace-only) value means "absent". `image_ref` and `agency_id` are
/// not user-editable and do not appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDraft {
    pub first_name: String,
    pub middle_initial: String,
    pub last_name: String,
    pub business_phone: String,
    pub email: String,
    pub position: String,
}


impl Agent {
    /// Build a new record from a draft, with the store-assigned id still
    /// pending (0). This is the single place defaults are applied.
    pub fn from_draft(draft: &AgentDraft) -> Agent {
        Agent {
            id: 0,
            first_name: opt(&draft.first_name),
            middle_initial: opt(&draft.middle_initial),
            last_name: opt(&draft.last_name),
            business_phone: opt(&draft.business_phone),
            email: opt(&draft.email),
            position: opt(&draft.position),
            image_ref: DEFAULT_IMAGE_REF.into(),
            agency_id: Some(DEFAULT_AGENCY_ID),
        }
    }

    /// Overwrite the editable fields from a draft, keeping the id and
    /// re-applying the non-editable defaults.
    pub fn apply_draft(&mut self, draft: &AgentDraft) {
        self.first_name = opt(&draft.first_name);
        self.middle_initial = opt(&draft.middle_initial);
        self.last_name = opt(&draft.last_name);
        self.business_phone = opt(&draft.business_phone);
        self.email = opt(&draft.email);
        self.position = opt(&draft.position);
        self.image_ref = DEFAULT_IMAGE_REF.into();
        self.agency_id = Some(DEFAULT_AGENCY_ID);
    }

    /// Human-readable name for list rows: "First Last", falling back to
    /// whichever part exists, then to "(unnamed)".
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => "(unnamed)".into(),
        }
    }
}


impl AgentDraft {
    /// Seed a draft from an existing record (detail form in edit mode).
    pub fn from_agent(agent: &Agent) -> AgentDraft {
        AgentDraft {
            first_name: agent.first_name.clone().unwrap_or_default(),
            middle_initial: agent.middle_initial.clone().unwrap_or_default(),
            last_name: agent.last_name.clone().unwrap_or_default(),
            business_phone: agent.business_phone.clone().unwrap_or_default(),
            email: agent.email.clone().unwrap_or_default(),
            position: agent.position.clone().unwrap_or_default(),
        }
    }
}


/// Empty or whitespace-only strings become None; everything else is kept
/// trimmed.
fn opt(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
