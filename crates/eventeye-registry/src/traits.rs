//! Registry trait: the abstract interface for verification records.
//!
//! The issuance engine and the verify path only see this trait, so the
//! backing store can be swapped without touching either.

use std::sync::Arc;

use async_trait::async_trait;
use eventeye_core::{VerificationRecord, VerificationToken};

use crate::error::Result;

/// Append-only mapping from token to verification record.
///
/// A token is either unregistered or registered; once registered it never
/// changes and is never removed.
///
/// # Design Notes
///
/// - **Insert-once**: `register` on an existing token returns
///   [`RegistryError::DuplicateToken`](crate::RegistryError::DuplicateToken)
///   and leaves the existing record untouched.
/// - **Concurrent**: implementations must accept concurrent writers and
///   readers.
/// - **Misses are not errors**: `lookup` of an unknown token is `Ok(None)`.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Register a record under a freshly minted token.
    async fn register(&self, token: &VerificationToken, record: &VerificationRecord)
        -> Result<()>;

    /// Look up the record for a token.
    async fn lookup(&self, token: &VerificationToken) -> Result<Option<VerificationRecord>>;

    /// Check if a token is registered.
    async fn contains(&self, token: &VerificationToken) -> Result<bool> {
        Ok(self.lookup(token).await?.is_some())
    }

    /// Number of registered tokens.
    async fn len(&self) -> Result<usize>;

    /// True if nothing has been registered yet.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

#[async_trait]
impl<R: Registry + ?Sized> Registry for Arc<R> {
    async fn register(
        &self,
        token: &VerificationToken,
        record: &VerificationRecord,
    ) -> Result<()> {
        (**self).register(token, record).await
    }

    async fn lookup(&self, token: &VerificationToken) -> Result<Option<VerificationRecord>> {
        (**self).lookup(token).await
    }

    async fn contains(&self, token: &VerificationToken) -> Result<bool> {
        (**self).contains(token).await
    }

    async fn len(&self) -> Result<usize> {
        (**self).len().await
    }
}
