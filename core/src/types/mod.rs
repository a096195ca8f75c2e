pub mod agent;

pub use agent::{Agent, AgentDraft, DEFAULT_AGENCY_ID, DEFAULT_IMAGE_REF};
