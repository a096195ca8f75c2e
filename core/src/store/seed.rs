//! First-run seed data.
//!
//! On an empty store the application inserts these four records so a fresh
//! install has something to show. Ids are assigned by the store, not here.

use crate::types::{Agent, AgentDraft};

/// The four records inserted when the `Agents` table is empty.
pub fn seed_agents() -> Vec<Agent> {
    [
        ("Janet", "", "Delton", "(403) 210-7801", "janet.delton@travelexperts.com", "Senior Agent"),
        ("Judy", "", "Lisle", "(403) 210-7802", "judy.lisle@travelexperts.com", "Intermediate Agent"),
        ("Dennis", "C", "Reynolds", "(403) 210-7843", "dennis.reynolds@travelexperts.com", "Junior Agent"),
        ("John", "D", "Coville", "(403) 210-7823", "john.coville@travelexperts.com", "Intermediate Agent"),
    ]
    .iter()
    .map(|(first, middle, last, phone, email, position)| {
        Agent::from_draft(&AgentDraft {
            first_name: (*first).into(),
            middle_initial: (*middle).into(),
            last_name: (*last).into(),
            business_phone: (*phone).into(),
            email: (*email).into(),
            position: (*position).into(),
        })
    })
    .collect()
}
