//! HTTP client for the ledger-data service.
//!
//! A stateless request/response boundary: no retries, no local
//! validation beyond decoding. Transport failures and malformed bodies
//! surface as [`WalletError::Network`]; rejection text from the remote
//! surfaces as [`WalletError::Service`] and is classified into the
//! domain taxonomy by the send orchestrator, never here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{
    AddressOverview, AddressParty, BalanceResponse, BroadcastResponse, ErrorEnvelope,
    NewTxRequest, OutputSpec, SignedSubmission, TransactionSkeleton, TxSkeletonResponse,
};
use crate::error::WalletError;

/// The ledger operations the send path depends on. The orchestrator is
/// written against this trait so its policies can be exercised without
/// a live service.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Current spendable balance of `address`, in satoshis.
    async fn balance(&self, address: &str) -> Result<i64, WalletError>;

    /// Ask the remote to assemble an unsigned transaction. `value` is
    /// omitted only for the full-drain variant.
    async fn build_unsigned(
        &self,
        from_address: &str,
        to_address: &str,
        value: Option<i64>,
    ) -> Result<TransactionSkeleton, WalletError>;

    /// Broadcast a signed transaction; returns its hash.
    async fn submit(&self, submission: &SignedSubmission) -> Result<String, WalletError>;
}

#[derive(Clone)]
pub struct LedgerClient {
    http: Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Balance, totals and recent transactions for an address.
    pub async fn address_overview(&self, address: &str) -> Result<AddressOverview, WalletError> {
        let url = format!("{}/addrs/{}?limit=10", self.base_url, address);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        decode_response(response).await
    }
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn balance(&self, address: &str) -> Result<i64, WalletError> {
        let url = format!("{}/addrs/{}/balance", self.base_url, address);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body: BalanceResponse = decode_response(response).await?;
        Ok(body.balance)
    }

    async fn build_unsigned(
        &self,
        from_address: &str,
        to_address: &str,
        value: Option<i64>,
    ) -> Result<TransactionSkeleton, WalletError> {
        let request = NewTxRequest {
            inputs: vec![AddressParty {
                addresses: vec![from_address.to_string()],
            }],
            outputs: vec![OutputSpec {
                addresses: vec![to_address.to_string()],
                value,
            }],
        };

        let url = format!("{}/txs/new", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;
        let skeleton: TxSkeletonResponse = decode_response(response).await?;

        let digests = skeleton
            .tosign
            .iter()
            .map(|digest_hex| hex::decode(digest_hex))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| WalletError::Network(format!("malformed digest in skeleton: {}", e)))?;

        Ok(TransactionSkeleton {
            digests,
            fee_sats: skeleton.fees,
            tx: skeleton.tx,
        })
    }

    async fn submit(&self, submission: &SignedSubmission) -> Result<String, WalletError> {
        let url = format!("{}/txs/send", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(transport)?;
        let body: BroadcastResponse = decode_response(response).await?;
        Ok(body.tx.hash)
    }
}

fn transport(err: reqwest::Error) -> WalletError {
    WalletError::Network(err.to_string())
}

/// Decode a success body, or turn a non-success status into a
/// `Service` error carrying the remote's own message text.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WalletError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !status.is_success() {
        return Err(service_error(status, &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| WalletError::Network(format!("malformed response body: {}", e)))
}

fn service_error(status: StatusCode, body: &str) -> WalletError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let messages = envelope.messages();
    if messages.is_empty() {
        WalletError::Service(format!("HTTP {}: {}", status, body.trim()))
    } else {
        WalletError::Service(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = LedgerClient::new(
            "https://api.blockcypher.com/v1/ltc/main/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.blockcypher.com/v1/ltc/main");
    }

    #[test]
    fn test_service_error_prefers_envelope_text() {
        let err = service_error(
            StatusCode::BAD_REQUEST,
            r#"{"errors": [{"error": "Error validating generated transaction: Insufficient funds in address"}]}"#,
        );
        match err {
            WalletError::Service(message) => {
                assert!(message.contains("Insufficient funds"));
            }
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_service_error_falls_back_to_raw_body() {
        let err = service_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        match err {
            WalletError::Service(message) => {
                assert!(message.contains("502"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected Service error, got {:?}", other),
        }
    }
}
