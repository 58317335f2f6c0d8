//! Worker pool that runs merge computations and writes.

use std::future::Future;
use std::sync::Arc;

use sched_config::GeneralConfig;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::error::RepositoryError;

/// Where feed tasks and mutations are spawned.
///
/// Cloning is cheap; clones share the same runtime. A dedicated runtime is
/// shut down in the background once the last clone is dropped.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    handle: Handle,
    owned: Option<Arc<OwnedRuntime>>,
}

#[derive(Debug)]
struct OwnedRuntime(Option<Runtime>);

impl Drop for OwnedRuntime {
    fn drop(&mut self) {
        // A plain drop blocks, which panics when the last clone goes away
        // inside an async context.
        if let Some(runtime) = self.0.take() {
            runtime.shutdown_background();
        }
    }
}

impl WorkerPool {
    /// Start a dedicated multi-thread runtime with `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Runtime` if the runtime cannot be built.
    pub fn dedicated(threads: usize) -> Result<Self, RepositoryError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(threads.max(1))
            .thread_name("sched-worker")
            .enable_all()
            .build()
            .map_err(|e| RepositoryError::Runtime(e.to_string()))?;
        tracing::debug!(threads, "started worker pool");
        Ok(Self {
            handle: runtime.handle().clone(),
            owned: Some(Arc::new(OwnedRuntime(Some(runtime)))),
        })
    }

    /// Dedicated pool sized from `[general] worker_threads`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Config` for an invalid size, or
    /// `RepositoryError::Runtime` if the runtime cannot be built.
    pub fn from_config(config: &GeneralConfig) -> Result<Self, RepositoryError> {
        Self::dedicated(config.worker_threads()?)
    }

    /// Share the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Runtime` when called outside a tokio runtime.
    pub fn current() -> Result<Self, RepositoryError> {
        let handle = Handle::try_current().map_err(|e| RepositoryError::Runtime(e.to_string()))?;
        Ok(Self {
            handle,
            owned: None,
        })
    }

    /// `true` if this pool owns its runtime.
    #[must_use]
    pub const fn is_dedicated(&self) -> bool {
        self.owned.is_some()
    }

    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Run `future` on the pool and wait for it.
    ///
    /// The task keeps running if the returned future is dropped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Worker` if the task panicked, otherwise the
    /// task's own result.
    pub async fn run<F, T>(&self, future: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>> + Send + 'static,
        T: Send + 'static,
    {
        self.spawn(future).await?
    }
}
