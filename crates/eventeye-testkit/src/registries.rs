//! Registry test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use eventeye_core::{VerificationRecord, VerificationToken};
use eventeye_registry::{MemoryRegistry, Registry, RegistryError, Result};

/// A [`MemoryRegistry`] whose `n`th `register` call fails with a task error.
/// Every other call goes through.
pub struct FlakyRegistry {
    inner: MemoryRegistry,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FlakyRegistry {
    /// Fail the `n`th registration (1-based).
    pub fn failing_on(n: usize) -> Self {
        Self {
            inner: MemoryRegistry::new(),
            fail_on: n,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Registry for FlakyRegistry {
    async fn register(
        &self,
        token: &VerificationToken,
        record: &VerificationRecord,
    ) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(RegistryError::Task(format!("registration {} dropped", call)));
        }
        self.inner.register(token, record).await
    }

    async fn lookup(&self, token: &VerificationToken) -> Result<Option<VerificationRecord>> {
        self.inner.lookup(token).await
    }

    async fn len(&self) -> Result<usize> {
        self.inner.len().await
    }
}

/// Rejects every token as already registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatingRegistry;

#[async_trait]
impl Registry for DuplicatingRegistry {
    async fn register(
        &self,
        token: &VerificationToken,
        _record: &VerificationRecord,
    ) -> Result<()> {
        Err(RegistryError::DuplicateToken(*token))
    }

    async fn lookup(&self, _token: &VerificationToken) -> Result<Option<VerificationRecord>> {
        Ok(None)
    }

    async fn len(&self) -> Result<usize> {
        Ok(0)
    }
}
