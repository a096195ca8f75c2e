//! SQLite record store for the `Agents` table.
//!
//! One table, keyed by `AgentId`. The schema carries a version stamp in
//! `PRAGMA user_version`; there are no migrations — on a version mismatch
//! the table is dropped and rebuilt (destructive upgrade).

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::store::error::StoreError;
use crate::store::seed::seed_agents;
use crate::types::Agent;

/// Bumped whenever the column set changes. Mismatched stores are rebuilt.
pub const SCHEMA_VERSION: i64 = 3;

const CREATE_AGENTS: &str = "\
CREATE TABLE IF NOT EXISTS Agents (
    AgentId          INTEGER PRIMARY KEY AUTOINCREMENT,
    AgtFirstName     TEXT,
    AgtMiddleInitial TEXT,
    AgtLastName      TEXT,
    AgtBusPhone      TEXT,
    AgtEmail         TEXT,
    AgtPosition      TEXT,
    ImageRef         TEXT NOT NULL,
    AgencyId         INTEGER
)";


/// Handle to the agents database. Owns the connection; not `Sync` — the
/// roster moves it into its worker thread, which is the only writer.
pub struct AgentStore {
    conn: Connection,
}

impl AgentStore {
    /// Open (or create) the database at `path` and prepare the schema.
    pub fn open(path: &Path) -> Result<AgentStore, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let store = AgentStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<AgentStore, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let store = AgentStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let version: i64 =
            self.conn
                .pragma_query_value(None, "user_version", |row| row.get(0))?;
        if version != 0 && version != SCHEMA_VERSION {
            self.conn.execute("DROP TABLE IF EXISTS Agents", [])?;
        }
        self.conn.execute(CREATE_AGENTS, [])?;
        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// All agents in insertion order.
    pub fn list_all(&self) -> Result<Vec<Agent>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT AgentId, AgtFirstName, AgtMiddleInitial, AgtLastName,
                    AgtBusPhone, AgtEmail, AgtPosition, ImageRef, AgencyId
             FROM Agents ORDER BY AgentId",
        )?;
        let rows = stmt.query_map([], row_to_agent)?;
        let mut agents = Vec::new();
        for row in rows {
            agents.push(row?);
        }
        Ok(agents)
    }

    /// Fetch one agent by id, or `None` if absent.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Agent>, StoreError> {
        let agent = self
            .conn
            .query_row(
                "SELECT AgentId, AgtFirstName, AgtMiddleInitial, AgtLastName,
                        AgtBusPhone, AgtEmail, AgtPosition, ImageRef, AgencyId
                 FROM Agents WHERE AgentId = ?1",
                params![id],
                row_to_agent,
            )
            .optional()?;
        Ok(agent)
    }

    /// Number of rows in the table.
    pub fn count(&self) -> Result<i64, StoreError> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM Agents", [], |row| row.get(0))?;
        Ok(n)
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Insert a record. The incoming id is ignored; the store assigns one
    /// and the returned record carries it.
    pub fn insert(&self, agent: &Agent) -> Result<Agent, StoreError> {
        self.conn.execute(
            "INSERT INTO Agents (AgtFirstName, AgtMiddleInitial, AgtLastName,
                                 AgtBusPhone, AgtEmail, AgtPosition, ImageRef, AgencyId)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                agent.first_name,
                agent.middle_initial,
                agent.last_name,
                agent.business_phone,
                agent.email,
                agent.position,
                agent.image_ref,
                agent.agency_id,
            ],
        )?;
        let mut inserted = agent.clone();
        inserted.id = self.conn.last_insert_rowid();
        Ok(inserted)
    }

    /// Replace the row matching `agent.id`. Fails with `RecordNotFound`
    /// when no such row exists.
    pub fn update(&self, agent: &Agent) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE Agents SET AgtFirstName = ?1, AgtMiddleInitial = ?2,
                               AgtLastName = ?3, AgtBusPhone = ?4, AgtEmail = ?5,
                               AgtPosition = ?6, ImageRef = ?7, AgencyId = ?8
             WHERE AgentId = ?9",
            params![
                agent.first_name,
                agent.middle_initial,
                agent.last_name,
                agent.business_phone,
                agent.email,
                agent.position,
                agent.image_ref,
                agent.agency_id,
                agent.id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::RecordNotFound(agent.id));
        }
        Ok(())
    }

    /// Remove the row with the given id. Fails with `RecordNotFound` when
    /// no such row exists.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM Agents WHERE AgentId = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::RecordNotFound(id));
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Seeding
    // -------------------------------------------------------------------

    /// Insert the fixed seed records if the table is empty. Returns the
    /// number of records inserted (0 when the store already has data).
    pub fn seed_if_empty(&self) -> Result<usize, StoreError> {
        if self.count()? > 0 {
            return Ok(0);
        }
        let seeds = seed_agents();
        for agent in &seeds {
            self.insert(agent)?;
        }
        Ok(seeds.len())
    }
}


fn row_to_agent(row: &Row<'_>) -> rusqlite::Result<Agent> {
    Ok(Agent {
        id: row.get(0)?,
        first_name: row.get(1)?,
        middle_initial: row.get(2)?,
        last_name: row.get(3)?,
        business_phone: row.get(4)?,
        email: row.get(5)?,
        position: row.get(6)?,
        image_ref: row.get(7)?,
        agency_id: row.get(8)?,
    })
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentDraft, DEFAULT_AGENCY_ID, DEFAULT_IMAGE_REF};

    fn make_agent(first: &str, last: &str) -> Agent {
        Agent::from_draft(&AgentDraft {
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@travelexperts.com", first.to_lowercase()),
            ..AgentDraft::default()
        })
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let store = AgentStore::open_in_memory().unwrap();
        let a = store.insert(&make_agent("Janet", "Delton")).unwrap();
        let b = store.insert(&make_agent("Judy", "Lisle")).unwrap();
        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn insert_then_fetch_equals_except_id() {
        let store = AgentStore::open_in_memory().unwrap();
        let original = make_agent("Janet", "Delton");
        let inserted = store.insert(&original).unwrap();
        let fetched = store.get_by_id(inserted.id).unwrap().unwrap();

        assert_eq!(fetched.id, inserted.id);
        let mut expected = original;
        expected.id = inserted.id;
        assert_eq!(fetched, expected);
    }

    #[test]
    fn get_by_id_absent_is_none() {
        let store = AgentStore::open_in_memory().unwrap();
        assert!(store.get_by_id(999).unwrap().is_none());
    }

    #[test]
    fn list_all_in_insertion_order() {
        let store = AgentStore::open_in_memory().unwrap();
        store.insert(&make_agent("Janet", "Delton")).unwrap();
        store.insert(&make_agent("Judy", "Lisle")).unwrap();
        store.insert(&make_agent("Dennis", "Reynolds")).unwrap();

        let names: Vec<String> = store
            .list_all()
            .unwrap()
            .iter()
            .map(|a| a.display_name())
            .collect();
        assert_eq!(names, vec!["Janet Delton", "Judy Lisle", "Dennis Reynolds"]);
    }

    #[test]
    fn update_replaces_fields() {
        let store = AgentStore::open_in_memory().unwrap();
        let mut agent = store.insert(&make_agent("Janet", "Delton")).unwrap();
        agent.position = Some("Senior Agent".into());
        store.update(&agent).unwrap();

        let fetched = store.get_by_id(agent.id).unwrap().unwrap();
        assert_eq!(fetched.position.as_deref(), Some("Senior Agent"));
        assert_eq!(fetched.id, agent.id);
    }

    #[test]
    fn update_missing_id_fails() {
        let store = AgentStore::open_in_memory().unwrap();
        let mut agent = make_agent("Ghost", "Agent");
        agent.id = 12345;
        match store.update(&agent) {
            Err(StoreError::RecordNotFound(id)) => assert_eq!(id, 12345),
            other => panic!("expected RecordNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn delete_removes_row() {
        let store = AgentStore::open_in_memory().unwrap();
        let agent = store.insert(&make_agent("Janet", "Delton")).unwrap();
        store.delete(agent.id).unwrap();
        assert!(store.get_by_id(agent.id).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn delete_missing_id_fails() {
        let store = AgentStore::open_in_memory().unwrap();
        assert!(matches!(
            store.delete(7),
            Err(StoreError::RecordNotFound(7))
        ));
    }

    #[test]
    fn seed_if_empty_inserts_four() {
        let store = AgentStore::open_in_memory().unwrap();
        assert_eq!(store.seed_if_empty().unwrap(), 4);
        let agents = store.list_all().unwrap();
        assert_eq!(agents.len(), 4);

        // Distinct assigned ids, defaults applied.
        let mut ids: Vec<i64> = agents.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        for agent in &agents {
            assert_eq!(agent.image_ref, DEFAULT_IMAGE_REF);
            assert_eq!(agent.agency_id, Some(DEFAULT_AGENCY_ID));
        }
    }

    #[test]
    fn seed_if_empty_is_idempotent() {
        let store = AgentStore::open_in_memory().unwrap();
        store.seed_if_empty().unwrap();
        assert_eq!(store.seed_if_empty().unwrap(), 0);
        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn seed_skipped_when_store_has_data() {
        let store = AgentStore::open_in_memory().unwrap();
        store.insert(&make_agent("Janet", "Delton")).unwrap();
        assert_eq!(store.seed_if_empty().unwrap(), 0);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn nullable_fields_persist_as_null() {
        let store = AgentStore::open_in_memory().unwrap();
        let inserted = store
            .insert(&Agent::from_draft(&AgentDraft {
                first_name: "Solo".into(),
                ..AgentDraft::default()
            }))
            .unwrap();
        let fetched = store.get_by_id(inserted.id).unwrap().unwrap();
        assert_eq!(fetched.last_name, None);
        assert_eq!(fetched.email, None);
        assert_eq!(fetched.business_phone, None);
    }

    #[test]
    fn schema_version_mismatch_rebuilds_table() {
        let dir = std::env::temp_dir().join("agentdesk-schema-test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("agents.db");

        {
            let store = AgentStore::open(&path).unwrap();
            store.insert(&make_agent("Janet", "Delton")).unwrap();
            // Pretend this file was written by an older schema.
            store.conn.pragma_update(None, "user_version", 2).unwrap();
        }

        let store = AgentStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        let version: i64 = store
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reopen_keeps_data_when_version_matches() {
        let dir = std::env::temp_dir().join("agentdesk-reopen-test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("agents.db");

        {
            let store = AgentStore::open(&path).unwrap();
            store.insert(&make_agent("Janet", "Delton")).unwrap();
        }
        let store = AgentStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
