//! Pending one-time verification codes.
//!
//! Codes are six decimal digits, stored hashed, keyed by user id. Expiry is
//! checked at verification time rather than by a background sweeper; the
//! window is ten minutes. A mismatched attempt leaves the pending entry in
//! place, a successful one consumes it.

use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long an issued code stays redeemable.
pub const CODE_TTL: Duration = Duration::from_secs(10 * 60);

/// SHA-256 of a code, hex-encoded.
#[must_use]
pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCheck {
    /// No code pending for the user, or the pending one expired
    Missing,
    /// A code is pending but the supplied one does not match
    Mismatch,
    /// The code matched; the hash is returned for the session token
    Valid {
        /// Hash of the redeemed code
        code_hash: String,
    },
}

struct PendingCode {
    code_hash: String,
    issued_at: Instant,
}

/// In-memory store of pending verification codes.
#[derive(Default)]
pub struct CodeStore {
    pending: Mutex<HashMap<String, PendingCode>>,
}

impl CodeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh code for `user_id`, replacing any pending one, and
    /// returns the plaintext code for delivery.
    pub fn issue<R: Rng>(&self, rng: &mut R, user_id: &str, now: Instant) -> String {
        let code = rng.gen_range(100_000..=999_999u32).to_string();
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.insert(
            user_id.to_string(),
            PendingCode {
                code_hash: hash_code(&code),
                issued_at: now,
            },
        );
        code
    }

    /// Checks `code` against the pending entry for `user_id`.
    pub fn verify(&self, user_id: &str, code: &str, now: Instant) -> CodeCheck {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());

        let Some(entry) = pending.get(user_id) else {
            return CodeCheck::Missing;
        };
        if now.duration_since(entry.issued_at) >= CODE_TTL {
            pending.remove(user_id);
            return CodeCheck::Missing;
        }
        let supplied_hash = hash_code(code);
        if entry.code_hash != supplied_hash {
            return CodeCheck::Mismatch;
        }

        pending.remove(user_id);
        CodeCheck::Valid {
            code_hash: supplied_hash,
        }
    }
}
