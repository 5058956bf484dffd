//! Gateway payment signatures.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 keyed by the merchant secret
//! and sends the digest as lowercase hex.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature is not valid hex")]
    Malformed,

    #[error("signature does not match")]
    Mismatch,

    #[error("signing key is unusable")]
    InvalidKey,
}

#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Zeroizing<Vec<u8>>,
}

impl SignatureVerifier {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_bytes().to_vec()),
        }
    }

    fn mac(&self, order_id: &str, payment_id: &str) -> Result<HmacSha256, SignatureError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_ignored| SignatureError::InvalidKey)?;

        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        Ok(mac)
    }

    /// Lowercase hex signature the gateway would send for this pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be used for HMAC.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> Result<String, SignatureError> {
        let mac = self.mac(order_id, payment_id)?;

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check `signature` against the pair in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Malformed`] for anything but lowercase hex and
    /// [`SignatureError::Mismatch`] when the digest differs.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), SignatureError> {
        if !signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(SignatureError::Malformed);
        }

        let expected = hex::decode(signature).map_err(|_ignored| SignatureError::Malformed)?;

        self.mac(order_id, payment_id)?
            .verify_slice(&expected)
            .map_err(|_ignored| SignatureError::Mismatch)
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignatureVerifier(**redacted**)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector_matches() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign("order_1", "pay_1").expect("signing should work");

        assert_eq!(
            signature,
            "52115a0d3400de9e86aade1f1b6eba9e8974604f4e267a9e9a16633a4c8dd2cb"
        );
        assert_eq!(verifier.verify("order_1", "pay_1", &signature), Ok(()));
    }

    #[test]
    fn swapped_ids_do_not_verify() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign("order_1", "pay_1").expect("signing should work");

        assert_eq!(
            verifier.verify("pay_1", "order_1", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn flipping_any_payment_id_character_fails() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign("order_1", "pay_1").expect("signing should work");

        for flipped in ["qay_1", "pby_1", "paz_1", "pay-1", "pay_2"] {
            assert_eq!(
                verifier.verify("order_1", flipped, &signature),
                Err(SignatureError::Mismatch),
                "{flipped} should not verify"
            );
        }
    }

    #[test]
    fn uppercase_signature_is_malformed() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign("order_1", "pay_1").expect("signing should work");

        assert_eq!(
            verifier.verify("order_1", "pay_1", &signature.to_uppercase()),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn other_secret_does_not_verify() {
        let signature = SignatureVerifier::new("secret")
            .sign("order_1", "pay_1")
            .expect("signing should work");

        assert_eq!(
            SignatureVerifier::new("other").verify("order_1", "pay_1", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn tampered_signature_does_not_verify() {
        let verifier = SignatureVerifier::new("secret");
        let mut signature = verifier.sign("order_1", "pay_1").expect("signing should work");
        let last = if signature.ends_with('0') { "1" } else { "0" };
        signature.replace_range(63.., last);

        assert_eq!(
            verifier.verify("order_1", "pay_1", &signature),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn truncated_signature_does_not_verify() {
        let verifier = SignatureVerifier::new("secret");
        let signature = verifier.sign("order_1", "pay_1").expect("signing should work");

        assert_eq!(
            verifier.verify("order_1", "pay_1", &signature[..32]),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn non_hex_signature_is_malformed() {
        let verifier = SignatureVerifier::new("secret");

        assert_eq!(
            verifier.verify("order_1", "pay_1", "not-hex"),
            Err(SignatureError::Malformed)
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", SignatureVerifier::new("hunter2"));

        assert!(!rendered.contains("hunter2"));
    }
}
