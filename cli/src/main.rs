//! ADK CLI — the command-line entry point for AgentDesk.
//!
//! # Usage
//!
//! ```text
//! adk              # open the agent roster TUI
//! adk --help
//! ```
//!
//! Data lives in `$ADK_DATA_DIR`, or `~/.config/agentdesk` by default. On
//! first run the database is created and seeded with a starter roster.

use std::path::PathBuf;
use std::process;

use agentdesk_core::roster::Roster;
use agentdesk_core::store::AgentStore;


const USAGE: &str = "\
adk — agent roster manager

Usage:
  adk            open the roster
  adk --help     show this message

Environment:
  ADK_DATA_DIR   data directory (default: ~/.config/agentdesk)";


fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args[1..].iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }
    if args.len() > 1 {
        eprintln!("adk: unexpected argument '{}'", args[1]);
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let data_dir = resolve_data_dir();
    let db_path = data_dir.join("agents.db");

    let store = match AgentStore::open(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("adk: failed to open {}: {}", db_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = store.seed_if_empty() {
        eprintln!("adk: failed to seed database: {}", e);
        process::exit(1);
    }

    let roster = Roster::new(store);

    match adk_tui::tui::Tui::new(roster) {
        Ok(mut tui) => {
            if let Err(e) = tui.run() {
                eprintln!("adk: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("adk: failed to start terminal: {}", e);
            process::exit(1);
        }
    }
}


fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("agentdesk")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_data_dir_default() {
        let old = std::env::var("ADK_DATA_DIR").ok();
        std::env::remove_var("ADK_DATA_DIR");
        let dir = resolve_data_dir();
        assert!(dir.to_string_lossy().contains(".config/agentdesk"));
        if let Some(v) = old {
            std::env::set_var("ADK_DATA_DIR", v);
        }
    }

    #[test]
    fn resolve_data_dir_from_env() {
        std::env::set_var("ADK_DATA_DIR", "/tmp/test-adk-data");
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-adk-data"));
        std::env::remove_var("ADK_DATA_DIR");
    }

    #[test]
    fn first_open_creates_and_seeds() {
        let dir = std::env::temp_dir().join("adk-cli-test-seed");
        let _ = std::fs::remove_dir_all(&dir);
        let store = AgentStore::open(&dir.join("agents.db")).unwrap();
        let inserted = store.seed_if_empty().unwrap();
        assert_eq!(inserted, 4);
        // A second seed pass must not duplicate records.
        assert_eq!(store.seed_if_empty().unwrap(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
