use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps how many downloads run at once.
///
/// Requests over the limit are turned away instead of waiting.
#[derive(Clone)]
pub struct DownloadLimiter {
    semaphore: Option<Arc<Semaphore>>,
}

/// Held for the duration of one download
pub struct DownloadPermit {
    _permit: Option<OwnedSemaphorePermit>,
}

impl DownloadLimiter {
    /// `0` means unlimited
    pub fn new(max_concurrent: usize) -> Self {
        let semaphore = (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent)));
        Self { semaphore }
    }

    pub fn try_acquire(&self) -> Option<DownloadPermit> {
        match &self.semaphore {
            None => Some(DownloadPermit { _permit: None }),
            Some(semaphore) => semaphore
                .clone()
                .try_acquire_owned()
                .ok()
                .map(|permit| DownloadPermit {
                    _permit: Some(permit),
                }),
        }
    }
}
