//! Durable alias -> identity records in SQLite.
//!
//! A connection is opened, the schema ensured and the connection
//! released for each logical operation, so an interrupted process
//! never holds the store hostage between operations.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;

use crate::error::StoreError;
use crate::keys::WalletIdentity;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS wallet (
        alias   TEXT PRIMARY KEY,
        private TEXT NOT NULL,
        public  TEXT NOT NULL,
        address TEXT NOT NULL
    );
";

#[derive(Clone)]
pub struct WalletStore {
    db_path: PathBuf,
}

impl WalletStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }

    /// Save an identity under its alias. An existing record with the
    /// same alias is fully replaced; rename is save-new + delete-old,
    /// composed by the caller.
    pub fn save(&self, identity: &WalletIdentity) -> Result<(), StoreError> {
        log::debug!("Saving wallet record: alias={}", identity.alias);
        let conn = self.open()?;
        conn.execute(
            "INSERT OR REPLACE INTO wallet (alias, private, public, address) VALUES (?1, ?2, ?3, ?4)",
            params![
                identity.alias,
                identity.private_key_hex(),
                identity.public_key_hex(),
                identity.address,
            ],
        )?;
        Ok(())
    }

    /// Load the identity stored under `alias`. `Ok(None)` means no
    /// such record exists; `Err` is reserved for operational faults.
    pub fn load(&self, alias: &str) -> Result<Option<WalletIdentity>, StoreError> {
        let conn = self.open()?;
        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT private, public, address FROM wallet WHERE alias = ?1",
                params![alias],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            None => {
                log::debug!("No wallet record for alias '{}'", alias);
                Ok(None)
            }
            Some((private_hex, public_hex, address)) => {
                let identity = WalletIdentity::from_stored_parts(
                    alias.to_string(),
                    &private_hex,
                    &public_hex,
                    address,
                )
                .ok_or_else(|| StoreError::Corrupted(alias.to_string()))?;
                Ok(Some(identity))
            }
        }
    }

    /// Delete the record under `alias`. Deleting an absent alias is
    /// not an error.
    pub fn delete(&self, alias: &str) -> Result<(), StoreError> {
        log::debug!("Deleting wallet record: alias={}", alias);
        let conn = self.open()?;
        conn.execute("DELETE FROM wallet WHERE alias = ?1", params![alias])?;
        Ok(())
    }

    /// All stored aliases, in no particular order.
    pub fn list_aliases(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT alias FROM wallet")?;
        let aliases = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, WalletStore) {
        let dir = TempDir::new().unwrap();
        let store = WalletStore::new(dir.path().join("wallet.db"));
        (dir, store)
    }

    fn identity_with_alias(alias: &str) -> WalletIdentity {
        let mut id = WalletIdentity::generate(Network::Mainnet).unwrap();
        id.alias = alias.to_string();
        id
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = test_store();
        let id = identity_with_alias("A");
        store.save(&id).unwrap();

        let loaded = store.load("A").unwrap().expect("record should exist");
        assert_eq!(loaded.alias, "A");
        assert_eq!(loaded.private_key_hex(), id.private_key_hex());
        assert_eq!(loaded.public_key_hex(), id.public_key_hex());
        assert_eq!(loaded.address, id.address);
    }

    #[test]
    fn test_load_missing_is_none_not_error() {
        let (_dir, store) = test_store();
        assert!(store.load("missing-alias").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_whole_record() {
        let (_dir, store) = test_store();
        let first = identity_with_alias("main");
        let second = identity_with_alias("main");
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        let loaded = store.load("main").unwrap().unwrap();
        assert_eq!(loaded.private_key_hex(), second.private_key_hex());
        assert_eq!(loaded.address, second.address);
        assert_ne!(loaded.private_key_hex(), first.private_key_hex());
    }

    #[test]
    fn test_delete_then_load_is_none() {
        let (_dir, store) = test_store();
        let id = identity_with_alias("gone");
        store.save(&id).unwrap();
        store.delete("gone").unwrap();
        assert!(store.load("gone").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let (_dir, store) = test_store();
        store.delete("never-existed").unwrap();
    }

    #[test]
    fn test_list_aliases() {
        let (_dir, store) = test_store();
        assert!(store.list_aliases().unwrap().is_empty());

        for alias in ["one", "two", "three"] {
            store.save(&identity_with_alias(alias)).unwrap();
        }
        let mut aliases = store.list_aliases().unwrap();
        aliases.sort();
        assert_eq!(aliases, vec!["one", "three", "two"]);
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        let (_dir, store) = test_store();
        let upper = identity_with_alias("Savings");
        let lower = identity_with_alias("savings");
        store.save(&upper).unwrap();
        store.save(&lower).unwrap();

        assert_eq!(
            store.load("Savings").unwrap().unwrap().private_key_hex(),
            upper.private_key_hex()
        );
        assert_eq!(
            store.load("savings").unwrap().unwrap().private_key_hex(),
            lower.private_key_hex()
        );
    }

    #[test]
    fn test_rename_is_save_then_delete() {
        let (_dir, store) = test_store();
        let mut id = identity_with_alias("old-name");
        store.save(&id).unwrap();

        id.alias = "new-name".to_string();
        store.save(&id).unwrap();
        store.delete("old-name").unwrap();

        assert!(store.load("old-name").unwrap().is_none());
        let renamed = store.load("new-name").unwrap().unwrap();
        assert_eq!(renamed.private_key_hex(), id.private_key_hex());
    }
}
