use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_big_array::big_array;
use std::fmt;
use std::fmt::{Display, Formatter};

big_array! {BigArray;}

const PUBLIC_KEY_BYTE_COUNT: usize = 32;
const SIGNATURE_BYTE_COUNT: usize = 64;

/// An ed25519 public key that owns transaction outputs.
/// A spend of an output must carry a signature that verifies under this key.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, Eq, PartialEq)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTE_COUNT]);

impl PublicKey {
    pub const fn from_raw(raw_bytes: [u8; PUBLIC_KEY_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    /// Checks whether `signature` is a valid signature of `message` under this key.
    /// The check is total: a byte array that is not a valid curve point fails
    /// verification rather than raising an error.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        match VerifyingKey::from_bytes(&self.0) {
            Ok(verifying_key) => {
                let signature = ed25519_dalek::Signature::from_bytes(&signature.0);
                verifying_key.verify(message, &signature).is_ok()
            }
            Err(_) => false,
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An ed25519 signature attached to a transaction input.
#[derive(Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "BigArray")] [u8; SIGNATURE_BYTE_COUNT]);

impl Signature {
    pub const fn from_raw(raw_bytes: [u8; SIGNATURE_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..]))
    }
}

/// A signing key together with its public key.
/// The ledger core only verifies signatures; the keypair exists for the
/// surrounding system that creates transactions.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_raw(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_raw(self.signing_key.sign(message).to_bytes())
    }
}
