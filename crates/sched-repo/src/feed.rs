//! Multicast feeds.
//!
//! A [`Feed`] runs one upstream computation on the worker pool and fans its
//! output out to any number of subscribers through a `watch` channel. Late
//! subscribers start from the latest value. The driving task stops when its
//! source ends or when the feed handle and every subscriber are gone.

use std::future;
use std::pin::pin;
use std::sync::Arc;

use futures::stream::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::error::RepositoryError;
use crate::ports::SourceStream;
use crate::worker::WorkerPool;

pub struct Feed<T> {
    name: &'static str,
    rx: watch::Receiver<Option<Arc<T>>>,
}

impl<T> Clone for Feed<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            rx: self.rx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Feed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("name", &self.name)
            .field("ready", &self.rx.borrow().is_some())
            .finish()
    }
}

impl<T> Feed<T>
where
    T: Send + Sync + 'static,
{
    /// Drive `source` on `pool`, publishing every item it yields.
    pub fn spawn<S>(pool: &WorkerPool, name: &'static str, source: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        pool.spawn(async move {
            let mut source = pin!(source);
            loop {
                tokio::select! {
                    () = tx.closed() => {
                        tracing::debug!(feed = name, "no subscribers left, stopping");
                        break;
                    }
                    next = source.next() => {
                        let Some(value) = next else {
                            tracing::debug!(feed = name, "source ended");
                            break;
                        };
                        tx.send_replace(Some(Arc::new(value)));
                    }
                }
            }
        });
        Self { name, rx }
    }

    /// A feed whose values are `f` applied to each value of `self`.
    pub fn map<U, F>(&self, pool: &WorkerPool, name: &'static str, f: F) -> Feed<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + 'static,
    {
        Feed::spawn(pool, name, self.subscribe().map(move |value| f(&value)))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Stream of values, starting with the latest one if there is one.
    #[must_use]
    pub fn subscribe(&self) -> SourceStream<Arc<T>> {
        WatchStream::new(self.rx.clone())
            .filter_map(future::ready)
            .boxed()
    }

    /// The latest value, if any has been produced yet.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<T>> {
        self.rx.borrow().clone()
    }

    /// The latest value, waiting for the first one if necessary.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::SourceClosed` if the feed stops before it
    /// produces anything.
    pub async fn first(&self) -> Result<Arc<T>, RepositoryError> {
        let mut rx = self.rx.clone();
        let value = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| RepositoryError::SourceClosed(self.name))?
            .clone();
        value.ok_or(RepositoryError::SourceClosed(self.name))
    }
}
