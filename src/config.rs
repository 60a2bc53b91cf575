/// Wallet configuration from environment variables.
///
/// Controls the target network, the ledger API endpoint, the wallet
/// database location and the flat send fee. Defaults to Litecoin
/// mainnet against the public BlockCypher endpoint.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Networks the wallet can derive addresses for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// P2PKH address version byte for this network.
    pub fn p2pkh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x30,
            Network::Testnet => 0x6f,
        }
    }

    /// Default ledger API base URL for this network.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.blockcypher.com/v1/ltc/main",
            Network::Testnet => "http://localhost:3000",
        }
    }
}

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Target network (address version byte, default endpoint)
    pub network: Network,
    /// Ledger API base URL
    pub api_url: String,
    /// Path to the wallet record database
    pub db_path: PathBuf,
    /// Flat fee charged per send, in satoshis
    pub fee_sats: i64,
    /// Timeout applied to every remote call
    pub http_timeout: Duration,
}

/// Flat per-transaction fee, in satoshis.
pub const DEFAULT_FEE_SATS: i64 = 10_000;

const DEFAULT_DB_FILE: &str = "litecoin_wallet.db";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

impl WalletConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEDGER_NETWORK`: "mainnet" (default) or "testnet"
    /// - `LEDGER_API_URL`: ledger API endpoint (optional, per-network default)
    /// - `WALLET_DB_PATH`: wallet database file (default `./litecoin_wallet.db`)
    /// - `FLAT_FEE_SATS`: flat send fee in satoshis (default 10000)
    /// - `HTTP_TIMEOUT_SECS`: remote call timeout (default 30)
    pub fn from_env() -> Self {
        let network_str = env::var("LEDGER_NETWORK")
            .unwrap_or_else(|_| "mainnet".to_string())
            .to_lowercase();

        let network = match network_str.as_str() {
            "testnet" => {
                log::info!("Using TESTNET network");
                Network::Testnet
            }
            "mainnet" | "" => Network::Mainnet,
            other => {
                log::warn!("Unknown network '{}', defaulting to mainnet", other);
                Network::Mainnet
            }
        };

        let api_url = env::var("LEDGER_API_URL").unwrap_or_else(|_| {
            let url = network.default_api_url().to_string();
            log::info!("Ledger API URL: {}", url);
            url
        });

        let db_path = env::var("WALLET_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE));
        log::info!("Wallet database: {}", db_path.display());

        let fee_sats = env::var("FLAT_FEE_SATS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FEE_SATS);

        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        Self {
            network,
            api_url,
            db_path,
            fee_sats,
            http_timeout,
        }
    }
}

impl Default for WalletConfig {
    /// Default configuration (mainnet, public BlockCypher endpoint).
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            api_url: Network::Mainnet.default_api_url().to_string(),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            fee_sats: DEFAULT_FEE_SATS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mainnet() {
        let config = WalletConfig::default();
        assert!(matches!(config.network, Network::Mainnet));
        assert_eq!(config.api_url, "https://api.blockcypher.com/v1/ltc/main");
        assert_eq!(config.fee_sats, 10_000);
    }

    #[test]
    fn test_version_bytes() {
        assert_eq!(Network::Mainnet.p2pkh_version(), 0x30);
        assert_eq!(Network::Testnet.p2pkh_version(), 0x6f);
    }
}
