//! The core API surface consumed by the presentation layer.
//!
//! A [`WalletSession`] is an explicit context value: it owns the
//! configuration, the record store, the ledger client and the send
//! orchestrator, and the active identity is passed in and out of every
//! call rather than held as ambient state. Two sessions never
//! interfere, which also keeps test harnesses independent.

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keys::WalletIdentity;
use crate::ledger::client::{LedgerApi, LedgerClient};
use crate::ledger::types::AddressOverview;
use crate::send::{SendOrchestrator, SpendIntent};
use crate::store::WalletStore;

pub struct WalletSession {
    config: WalletConfig,
    store: WalletStore,
    client: LedgerClient,
    sender: SendOrchestrator<LedgerClient>,
}

impl WalletSession {
    pub fn new(config: WalletConfig) -> Result<Self, WalletError> {
        let store = WalletStore::new(config.db_path.clone());
        let client = LedgerClient::new(&config.api_url, config.http_timeout)?;
        let sender = SendOrchestrator::new(client.clone(), config.fee_sats);
        Ok(Self {
            config,
            store,
            client,
            sender,
        })
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Generate a fresh identity. The caller decides whether to
    /// persist it under an alias.
    pub fn generate_identity(&self) -> Result<WalletIdentity, WalletError> {
        WalletIdentity::generate(self.config.network)
    }

    /// Rebuild an identity from a hex private key (import flow).
    pub fn identity_from_private_hex(
        &self,
        private_hex: &str,
    ) -> Result<WalletIdentity, WalletError> {
        WalletIdentity::from_private_hex(private_hex, self.config.network)
    }

    pub fn save_identity(&self, identity: &WalletIdentity) -> Result<(), WalletError> {
        Ok(self.store.save(identity)?)
    }

    /// `Ok(None)` when no record exists under `alias`.
    pub fn load_identity(&self, alias: &str) -> Result<Option<WalletIdentity>, WalletError> {
        Ok(self.store.load(alias)?)
    }

    pub fn delete_identity(&self, alias: &str) -> Result<(), WalletError> {
        Ok(self.store.delete(alias)?)
    }

    pub fn list_aliases(&self) -> Result<Vec<String>, WalletError> {
        Ok(self.store.list_aliases()?)
    }

    pub async fn address_overview(
        &self,
        address: &str,
    ) -> Result<AddressOverview, WalletError> {
        self.client.address_overview(address).await
    }

    pub async fn balance(&self, address: &str) -> Result<i64, WalletError> {
        self.client.balance(address).await
    }

    /// Execute a send; the returned string is the broadcast
    /// transaction hash.
    pub async fn send(
        &self,
        identity: &WalletIdentity,
        intent: &SpendIntent,
    ) -> Result<String, WalletError> {
        self.sender.send(identity, intent).await
    }
}
