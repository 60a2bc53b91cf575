//! Per-digest transaction signing.
//!
//! The security-critical step of the send protocol: every digest the
//! skeleton carries is signed exactly as received, in the order
//! received, and nothing else. Purely local, no network access.

use secp256k1::{Message, Secp256k1};

use crate::error::WalletError;
use crate::keys::WalletIdentity;
use crate::ledger::types::{SignedSubmission, TransactionSkeleton};

/// Sign every digest in the skeleton with the identity's private key.
///
/// Produces one DER-encoded ECDSA signature per digest, positionally
/// matched, plus the single compressed public key — all skeleton
/// inputs are assumed to spend from the same address. The opaque `tx`
/// body is echoed back unchanged for resubmission.
pub fn sign_skeleton(
    skeleton: &TransactionSkeleton,
    identity: &WalletIdentity,
) -> Result<SignedSubmission, WalletError> {
    let secp = Secp256k1::signing_only();
    let mut signatures = Vec::with_capacity(skeleton.digests.len());

    for (index, digest) in skeleton.digests.iter().enumerate() {
        let bytes: [u8; 32] = digest.as_slice().try_into().map_err(|_| {
            WalletError::Signing(format!(
                "digest {} is {} bytes, expected 32",
                index,
                digest.len()
            ))
        })?;
        let message = Message::from_digest(bytes);
        let signature = secp.sign_ecdsa(&message, identity.secret_key());
        signatures.push(hex::encode(signature.serialize_der()));
    }

    Ok(SignedSubmission {
        signatures,
        pubkeys: vec![identity.public_key_hex()],
        tx: skeleton.tx.clone(),
    })
}
