//! Send orchestration: turns a spend intent into a broadcast
//! transaction hash via build -> sign -> submit, strictly sequential.
//!
//! A failure at any step is terminal for that attempt; the caller
//! retries with a fresh intent so a stale skeleton is never reused.
//! Free-text rejection messages from the remote are classified into
//! the typed taxonomy here, at this boundary only.

use tokio::sync::Mutex;

use crate::error::WalletError;
use crate::keys::WalletIdentity;
use crate::ledger::client::LedgerApi;
use crate::signer::sign_skeleton;

/// A caller's request to move value out of the wallet.
#[derive(Clone, Debug)]
pub struct SpendIntent {
    pub from_address: String,
    pub to_address: String,
    pub amount: SpendAmount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpendAmount {
    /// Spend exactly this many satoshis. Must be positive.
    Exact(i64),
    /// Spend the entire balance minus the flat fee, resolved against a
    /// balance fetched at execution time.
    All,
}

pub struct SendOrchestrator<L> {
    ledger: L,
    fee_sats: i64,
    // The balance-then-spend sequence must not interleave with another
    // send in this process.
    send_lock: Mutex<()>,
}

impl<L: LedgerApi> SendOrchestrator<L> {
    pub fn new(ledger: L, fee_sats: i64) -> Self {
        Self {
            ledger,
            fee_sats,
            send_lock: Mutex::new(()),
        }
    }

    pub fn fee_sats(&self) -> i64 {
        self.fee_sats
    }

    /// Execute one send attempt end to end, returning the broadcast
    /// transaction hash. Wallet state is never modified on failure.
    pub async fn send(
        &self,
        identity: &WalletIdentity,
        intent: &SpendIntent,
    ) -> Result<String, WalletError> {
        let _serialized = self.send_lock.lock().await;
        log::info!(
            "Sending from {} to {}",
            intent.from_address,
            intent.to_address
        );

        let amount = match intent.amount {
            SpendAmount::Exact(value) => {
                if value <= 0 {
                    return Err(WalletError::ZeroValueRejected);
                }
                value
            }
            SpendAmount::All => {
                // Fresh read, never cached: an external spend between
                // sync and send would otherwise oversize the amount.
                let balance = self.ledger.balance(&intent.from_address).await?;
                if balance <= self.fee_sats {
                    return Err(WalletError::InsufficientFunds);
                }
                balance - self.fee_sats
            }
        };

        let skeleton = self
            .ledger
            .build_unsigned(&intent.from_address, &intent.to_address, Some(amount))
            .await
            .map_err(classify_service_error)?;
        log::debug!(
            "Skeleton built: {} digest(s), remote fee {} sats",
            skeleton.digests.len(),
            skeleton.fee_sats
        );

        let submission = sign_skeleton(&skeleton, identity)?;

        let tx_hash = self
            .ledger
            .submit(&submission)
            .await
            .map_err(classify_service_error)?;
        log::info!("Transaction accepted: {}", tx_hash);
        Ok(tx_hash)
    }
}

/// Map known remote rejection phrases onto typed errors.
///
/// Best effort: the service's error text is not a stable contract, so
/// anything unrecognized is surfaced verbatim (and loudly) rather than
/// guessed at.
fn classify_service_error(err: WalletError) -> WalletError {
    let WalletError::Service(message) = err else {
        return err;
    };
    if message.contains("Insufficient funds") {
        WalletError::InsufficientFunds
    } else if message.contains("can't have zero for value") {
        WalletError::ZeroValueRejected
    } else if message.contains("Unable to find a transaction to spend") {
        WalletError::NoSpendableInputs
    } else {
        log::warn!("Unrecognized service error: {}", message);
        WalletError::UnclassifiedService(message)
    }
}
