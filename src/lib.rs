//! Litecoin wallet core.
//!
//! Key and address derivation, a SQLite-backed alias store, a typed
//! client for a BlockCypher-shaped ledger service, per-digest
//! transaction signing, and the orchestrator that composes them into
//! the two-phase send protocol (build skeleton remotely, sign locally,
//! submit). Interactive presentation — menus, QR rendering, CSV
//! export, clipboard — lives outside this crate and consumes
//! [`WalletSession`].

pub mod config;
pub mod error;
pub mod keys;
pub mod ledger;
pub mod send;
pub mod session;
pub mod signer;
pub mod store;

pub use config::{Network, WalletConfig, DEFAULT_FEE_SATS};
pub use error::{StoreError, WalletError};
pub use keys::WalletIdentity;
pub use ledger::client::{LedgerApi, LedgerClient};
pub use ledger::types::{AddressOverview, SignedSubmission, TransactionSkeleton, TxRef};
pub use send::{SendOrchestrator, SpendAmount, SpendIntent};
pub use session::WalletSession;

/// Smallest-unit-per-coin divisor shared with the remote service; all
/// wire amounts are satoshis, display conversion divides by this.
pub const SATS_PER_COIN: i64 = 100_000_000;

/// Convert a satoshi amount to whole-coin units for display.
pub fn sats_to_coins(sats: i64) -> f64 {
    sats as f64 / SATS_PER_COIN as f64
}
