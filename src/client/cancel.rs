use std::{future::Future, sync::Arc};

use tokio::sync::watch;

use crate::errors::{AppError, AppResult};

/// Cloneable cancellation signal. A session holds one per in-flight fetch
/// and cancels it on teardown so a late response cannot be applied.
#[derive(Clone, Debug)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once `cancel` has been called on any clone.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Races `future` against cancellation. Cancellation wins ties.
    pub async fn run<F, T>(&self, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(AppError::Cancelled),
            result = future => {
                if self.is_cancelled() {
                    Err(AppError::Cancelled)
                } else {
                    result
                }
            }
        }
    }
}
