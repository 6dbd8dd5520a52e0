//! Strong type definitions for EventEye.
//!
//! Tokens are newtypes so that a raw string can never be passed where a
//! minted token is expected.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Number of random bytes in a verification token.
pub const TOKEN_BYTES: usize = 16;

/// Length of the hex form of a verification token.
pub const TOKEN_HEX_LEN: usize = TOKEN_BYTES * 2;

/// A 16-byte verification token, minted from the OS CSPRNG.
///
/// The token is the only key into the verification registry, so it must be
/// unguessable. It is never derived from participant or event data: two
/// issuances for the same participant always produce different tokens.
///
/// The textual form is 32 lowercase hex characters, which is URL-safe.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerificationToken([u8; TOKEN_BYTES]);

impl VerificationToken {
    /// Mint a fresh token from the operating system's random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create a token from raw bytes.
    pub const fn from_bytes(bytes: [u8; TOKEN_BYTES]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; TOKEN_BYTES] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex. Upper and lower case digits are both accepted.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() != TOKEN_HEX_LEN {
            return Err(CoreError::InvalidToken(format!(
                "expected {} hex characters, got {}",
                TOKEN_HEX_LEN,
                s.len()
            )));
        }
        let mut arr = [0u8; TOKEN_BYTES];
        hex::decode_to_slice(s, &mut arr)
            .map_err(|e| CoreError::InvalidToken(e.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationToken({}..)", &self.to_hex()[..8])
    }
}

impl fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for VerificationToken {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[u8]> for VerificationToken {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; TOKEN_BYTES]> for VerificationToken {
    fn from(bytes: [u8; TOKEN_BYTES]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for VerificationToken {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; TOKEN_BYTES] = slice.try_into()?;
        Ok(Self(arr))
    }
}

impl Serialize for VerificationToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VerificationToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
