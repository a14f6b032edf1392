//! Per-submission diagnostic correlation ids.

use rand::distr::Alphanumeric;
use rand::Rng;

const TRANSACTION_PREFIX: &str = "TX-";
const TRANSACTION_TOKEN_LEN: usize = 9;

/// Generate a transaction id such as `TX-K3F9Q2ZAB`.
///
/// Used only to correlate a result with operator diagnostics; it is not
/// persisted and uniqueness is not guaranteed.
pub fn new_transaction_id() -> String {
    let token: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(TRANSACTION_TOKEN_LEN)
        .map(char::from)
        .collect();
    format!("{TRANSACTION_PREFIX}{}", token.to_ascii_uppercase())
}
