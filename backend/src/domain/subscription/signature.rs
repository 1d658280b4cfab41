//! Gateway callback signature verification.
//!
//! After checkout the gateway redirects the browser back with
//! `{payment_id, subscription_id, signature}`. The signature is the hex
//! HMAC-SHA256 of `"{payment_id}|{subscription_id}"` keyed with the
//! account's key secret, so only the gateway and this server can produce it.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::SubscriptionError;

type HmacSha256 = Hmac<Sha256>;

/// Verifies signed payment callbacks.
#[derive(Clone)]
pub struct PaymentSignatureVerifier {
    secret: Vec<u8>,
}

impl std::fmt::Debug for PaymentSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentSignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl PaymentSignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Checks `signature` against the expected HMAC.
    ///
    /// `subscription_id` must be the id stored on the user, not the one
    /// echoed back by the client.
    ///
    /// # Errors
    ///
    /// - `SignatureMismatch` - signature is not valid hex or does not match
    /// - `Infrastructure` - the MAC could not be keyed
    pub fn verify(
        &self,
        payment_id: &str,
        subscription_id: &str,
        signature: &str,
    ) -> Result<(), SubscriptionError> {
        let provided = hex::decode(signature.trim())
            .map_err(|_| SubscriptionError::SignatureMismatch)?;
        let expected = self.compute(payment_id, subscription_id)?;

        if !constant_time_compare(&expected, &provided) {
            return Err(SubscriptionError::SignatureMismatch);
        }
        Ok(())
    }

    /// Produces the hex signature the gateway would send for this pair.
    pub fn sign(&self, payment_id: &str, subscription_id: &str) -> Result<String, SubscriptionError> {
        Ok(hex::encode(self.compute(payment_id, subscription_id)?))
    }

    fn compute(&self, payment_id: &str, subscription_id: &str) -> Result<Vec<u8>, SubscriptionError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SubscriptionError::infrastructure(format!("invalid HMAC key: {}", e)))?;
        mac.update(payment_id.as_bytes());
        mac.update(b"|");
        mac.update(subscription_id.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Constant-time byte comparison. Length is not secret.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
