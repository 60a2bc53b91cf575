//! Request and response records for the ledger API, one type per
//! endpoint, plus the domain types that cross the signing boundary.
//!
//! Amounts on the wire are integer satoshis throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /addrs/{address}?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressOverview {
    pub balance: i64,
    pub total_received: i64,
    pub total_sent: i64,
    pub n_tx: i64,
    #[serde(default)]
    pub unconfirmed_balance: i64,
    /// Absent on the wire when the address has no history.
    #[serde(default)]
    pub txrefs: Vec<TxRef>,
}

/// One entry of an address's recent transaction history.
#[derive(Debug, Clone, Deserialize)]
pub struct TxRef {
    pub tx_hash: String,
    pub value: i64,
    #[serde(default)]
    pub confirmations: i64,
    #[serde(default)]
    pub confirmed: Option<DateTime<Utc>>,
}

/// `GET /addrs/{address}/balance`
#[derive(Debug, Deserialize)]
pub(crate) struct BalanceResponse {
    pub balance: i64,
}

/// `POST /txs/new` request body.
#[derive(Debug, Serialize)]
pub(crate) struct NewTxRequest {
    pub inputs: Vec<AddressParty>,
    pub outputs: Vec<OutputSpec>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddressParty {
    pub addresses: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutputSpec {
    pub addresses: Vec<String>,
    /// Omitted only for the full-drain variant, where the remote
    /// computes the spend amount itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// `POST /txs/new` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TxSkeletonResponse {
    pub tosign: Vec<String>,
    pub tx: serde_json::Value,
    pub fees: i64,
}

/// An unsigned transaction as handed to the signer: the digests the
/// remote requires signatures over (order is authoritative), the fee
/// the remote charged, and the opaque transaction body to echo back.
#[derive(Debug, Clone)]
pub struct TransactionSkeleton {
    pub digests: Vec<Vec<u8>>,
    pub fee_sats: i64,
    pub tx: serde_json::Value,
}

/// `POST /txs/send` request body. Signatures match the skeleton's
/// digests positionally; `tx` is echoed back unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct SignedSubmission {
    pub signatures: Vec<String>,
    pub pubkeys: Vec<String>,
    pub tx: serde_json::Value,
}

/// `POST /txs/send` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastResponse {
    pub tx: BroadcastedTx,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastedTx {
    pub hash: String,
}

/// Error body on non-success responses. The service emits either a
/// list of `errors` or a single `error` depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorItem {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.errors.iter().map(|e| e.error.clone()).collect();
        if let Some(single) = &self.error {
            messages.push(single.clone());
        }
        messages
    }
}
