//! Roster — the application state holder.
//!
//! Holds the last successful snapshot of all agent records and routes every
//! mutation through a single worker thread that owns the store connection.
//! The worker is the only consumer of the command channel, so commands run
//! strictly in the order they were issued: a mutation and its follow-up
//! reload form one unit of work, and two overlapping mutations can never
//! race on the final snapshot.
//!
//! Each command produces exactly one event back to the UI thread — either a
//! fresh snapshot or a typed failure. Failures leave the previous snapshot
//! intact; there is no rollback because nothing partial was applied.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::store::AgentStore;
use crate::types::{Agent, AgentDraft};
use crate::validate::{validate, ValidationError};


// ---------------------------------------------------------------------------
// Commands and events
// ---------------------------------------------------------------------------

/// A unit of work for the store worker.
#[derive(Debug)]
enum RosterCommand {
    Reload,
    Add(Agent),
    Update(Agent),
    Remove(i64),
}

/// Which logical operation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOp {
    Reload,
    Add,
    Update,
    Remove,
}

impl RosterOp {
    pub fn label(&self) -> &'static str {
        match self {
            RosterOp::Reload => "reload",
            RosterOp::Add => "add",
            RosterOp::Update => "update",
            RosterOp::Remove => "remove",
        }
    }
}

/// Outcome of one command, sent back to the UI thread.
#[derive(Debug)]
enum RosterEvent {
    /// The command succeeded; here is the refreshed snapshot.
    Snapshot(Vec<Agent>),
    /// The command failed; the previous snapshot still stands.
    Failed { op: RosterOp, message: String },
}


// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Cached view of all agent records plus the handle to the store worker.
///
/// Constructed with an explicitly injected [`AgentStore`]; the store is
/// moved into the worker thread and nothing else ever touches it.
pub struct Roster {
    tx: mpsc::Sender<RosterCommand>,
    rx: mpsc::Receiver<RosterEvent>,
    agents: Vec<Agent>,
    last_error: Option<String>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Roster {
    /// Spawn the worker around the given store and return the holder.
    /// The snapshot starts empty; call [`Roster::reload`] to populate it.
    pub fn new(store: AgentStore) -> Roster {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(store, cmd_rx, event_tx));
        Roster {
            tx: cmd_tx,
            rx: event_rx,
            agents: Vec::new(),
            last_error: None,
            worker: Some(worker),
        }
    }

    // -------------------------------------------------------------------
    // Snapshot access
    // -------------------------------------------------------------------

    /// The last successfully loaded snapshot, in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Take the last operation failure, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    // -------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------

    /// Fetch-all and replace the snapshot.
    pub fn reload(&mut self) {
        self.send(RosterCommand::Reload);
    }

    /// Validate a draft, build the record with defaults applied, and queue
    /// the insert. Validation failures return immediately; nothing is sent.
    pub fn add(&mut self, draft: &AgentDraft) -> Result<(), ValidationError> {
        validate(draft)?;
        self.send(RosterCommand::Add(Agent::from_draft(draft)));
        Ok(())
    }

    /// Validate the edited fields, apply them to the existing record, and
    /// queue the update (same id).
    pub fn update(&mut self, agent: &Agent, draft: &AgentDraft) -> Result<(), ValidationError> {
        validate(draft)?;
        let mut updated = agent.clone();
        updated.apply_draft(draft);
        self.send(RosterCommand::Update(updated));
        Ok(())
    }

    /// Queue the removal of the record with the given id.
    pub fn remove(&mut self, id: i64) {
        self.send(RosterCommand::Remove(id));
    }

    fn send(&mut self, cmd: RosterCommand) {
        if self.tx.send(cmd).is_err() {
            self.last_error = Some("store worker is gone".into());
        }
    }

    // -------------------------------------------------------------------
    // Event draining
    // -------------------------------------------------------------------

    /// Apply all pending events without blocking. Returns how many were
    /// applied. Called once per UI tick.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for the next event and apply it. Returns false
    /// on timeout. Used at startup and by tests that need determinism.
    pub fn poll_blocking(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply(event);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::Snapshot(agents) => {
                self.agents = agents;
            }
            RosterEvent::Failed { op, message } => {
                self.last_error = Some(format!("{} failed: {}", op.label(), message));
            }
        }
    }
}

impl Drop for Roster {
    fn drop(&mut self) {
        // Closing the command channel ends the worker loop.
        let (dead_tx, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.tx, dead_tx));
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}


// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// The single writer. Owns the store; executes each command and its reload
/// as one unit, then reports exactly one event.
fn run_worker(
    store: AgentStore,
    rx: mpsc::Receiver<RosterCommand>,
    tx: mpsc::Sender<RosterEvent>,
) {
    while let Ok(cmd) = rx.recv() {
        let (op, result) = match cmd {
            RosterCommand::Reload => (RosterOp::Reload, store.list_all()),
            RosterCommand::Add(agent) => (
                RosterOp::Add,
                store.insert(&agent).and_then(|_| store.list_all()),
            ),
            RosterCommand::Update(agent) => (
                RosterOp::Update,
                store.update(&agent).and_then(|_| store.list_all()),
            ),
            RosterCommand::Remove(id) => (
                RosterOp::Remove,
                store.delete(id).and_then(|_| store.list_all()),
            ),
        };
        let event = match result {
            Ok(agents) => RosterEvent::Snapshot(agents),
            Err(e) => RosterEvent::Failed {
                op,
                message: e.to_string(),
            },
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_secs(5);

    fn roster() -> Roster {
        Roster::new(AgentStore::open_in_memory().unwrap())
    }

    fn draft(first: &str, last: &str) -> AgentDraft {
        AgentDraft {
            first_name: first.into(),
            last_name: last.into(),
            ..AgentDraft::default()
        }
    }

    #[test]
    fn reload_populates_snapshot() {
        let store = AgentStore::open_in_memory().unwrap();
        store.seed_if_empty().unwrap();
        let mut roster = Roster::new(store);
        assert!(roster.agents().is_empty());

        roster.reload();
        assert!(roster.poll_blocking(TICK));
        assert_eq!(roster.agents().len(), 4);
    }

    #[test]
    fn add_refreshes_snapshot_with_assigned_id() {
        let mut roster = roster();
        roster.add(&draft("Janet", "Delton")).unwrap();
        assert!(roster.poll_blocking(TICK));

        let agents = roster.agents();
        assert_eq!(agents.len(), 1);
        assert!(agents[0].id > 0);
        assert_eq!(agents[0].display_name(), "Janet Delton");
        assert!(roster.take_error().is_none());
    }

    #[test]
    fn add_invalid_draft_is_rejected_synchronously() {
        let mut roster = roster();
        let err = roster.add(&AgentDraft::default()).unwrap_err();
        assert_eq!(err.field, "name");
        // Nothing was queued.
        assert_eq!(roster.poll(), 0);
        assert!(roster.agents().is_empty());
    }

    #[test]
    fn update_changes_fields_keeps_id() {
        let mut roster = roster();
        roster.add(&draft("Janet", "Delton")).unwrap();
        assert!(roster.poll_blocking(TICK));
        let agent = roster.agents()[0].clone();

        let mut edited = AgentDraft::from_agent(&agent);
        edited.position = "Senior Agent".into();
        roster.update(&agent, &edited).unwrap();
        assert!(roster.poll_blocking(TICK));

        let after = &roster.agents()[0];
        assert_eq!(after.id, agent.id);
        assert_eq!(after.position.as_deref(), Some("Senior Agent"));
    }

    #[test]
    fn remove_drops_record_from_snapshot() {
        let mut roster = roster();
        roster.add(&draft("Janet", "Delton")).unwrap();
        roster.add(&draft("Judy", "Lisle")).unwrap();
        assert!(roster.poll_blocking(TICK));
        assert!(roster.poll_blocking(TICK));
        let gone = roster.agents()[0].clone();

        roster.remove(gone.id);
        assert!(roster.poll_blocking(TICK));
        assert_eq!(roster.agents().len(), 1);
        assert!(roster.agents().iter().all(|a| a.id != gone.id));
    }

    #[test]
    fn remove_missing_id_reports_error_keeps_snapshot() {
        let mut roster = roster();
        roster.add(&draft("Janet", "Delton")).unwrap();
        assert!(roster.poll_blocking(TICK));

        roster.remove(9999);
        assert!(roster.poll_blocking(TICK));
        let err = roster.take_error().expect("error should be surfaced");
        assert!(err.contains("remove failed"));
        assert!(err.contains("9999"));
        assert_eq!(roster.agents().len(), 1);
    }

    #[test]
    fn update_missing_id_reports_error() {
        let mut roster = roster();
        let mut ghost = Agent::from_draft(&draft("Ghost", "Agent"));
        ghost.id = 4242;
        roster
            .update(&ghost, &AgentDraft::from_agent(&ghost))
            .unwrap();
        assert!(roster.poll_blocking(TICK));
        let err = roster.take_error().unwrap();
        assert!(err.contains("update failed"));
    }

    #[test]
    fn overlapping_mutations_apply_in_issue_order() {
        let mut roster = roster();
        // Queue several mutations back to back without draining.
        roster.add(&draft("Janet", "Delton")).unwrap();
        roster.add(&draft("Judy", "Lisle")).unwrap();
        roster.add(&draft("Dennis", "Reynolds")).unwrap();
        for _ in 0..3 {
            assert!(roster.poll_blocking(TICK));
        }
        let first_id = roster.agents()[0].id;
        roster.remove(first_id);
        roster.add(&draft("John", "Coville")).unwrap();
        for _ in 0..2 {
            assert!(roster.poll_blocking(TICK));
        }

        // Final snapshot reflects the last issued operation.
        let names: Vec<String> = roster.agents().iter().map(|a| a.display_name()).collect();
        assert_eq!(
            names,
            vec!["Judy Lisle", "Dennis Reynolds", "John Coville"]
        );
    }

    #[test]
    fn poll_applies_all_pending_events() {
        let mut roster = roster();
        roster.add(&draft("Janet", "Delton")).unwrap();
        roster.add(&draft("Judy", "Lisle")).unwrap();
        // Give the worker time to process both.
        let deadline = std::time::Instant::now() + TICK;
        let mut applied = 0;
        while applied < 2 && std::time::Instant::now() < deadline {
            applied += roster.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(applied, 2);
        assert_eq!(roster.agents().len(), 2);
    }

    #[test]
    fn drop_joins_worker() {
        let roster = roster();
        drop(roster); // must not hang
    }
}
