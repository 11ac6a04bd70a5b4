//! Concurrency governor
//!
//! Bounds in-flight remote calls per lane. Waiters are served in arrival
//! order. Permits release on drop, so a permit held across a failed call
//! is returned exactly once.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Class of remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Submissions and cancellations
    Submit,
    /// Status polls
    Poll,
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lane::Submit => f.write_str("submit"),
            Lane::Poll => f.write_str("poll"),
        }
    }
}

/// The governor was closed while waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernorClosed;

impl std::fmt::Display for GovernorClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("concurrency governor is closed")
    }
}

impl std::error::Error for GovernorClosed {}

/// Held while a remote call is in flight
#[derive(Debug)]
pub struct Permit {
    lane: Lane,
    _permit: OwnedSemaphorePermit,
}

impl Permit {
    pub fn lane(&self) -> Lane {
        self.lane
    }
}

/// Per-lane bound on in-flight remote calls
#[derive(Debug, Clone)]
pub struct ConcurrencyGovernor {
    submit: Arc<Semaphore>,
    poll: Arc<Semaphore>,
}

impl ConcurrencyGovernor {
    pub fn new(max_submits: usize, max_polls: usize) -> Self {
        Self {
            submit: Arc::new(Semaphore::new(max_submits)),
            poll: Arc::new(Semaphore::new(max_polls)),
        }
    }

    /// Waits for a permit on `lane`
    pub async fn acquire(&self, lane: Lane) -> Result<Permit, GovernorClosed> {
        let permit = Arc::clone(self.semaphore(lane))
            .acquire_owned()
            .await
            .map_err(|_| GovernorClosed)?;
        Ok(Permit {
            lane,
            _permit: permit,
        })
    }

    /// Permits currently free on `lane`
    pub fn available(&self, lane: Lane) -> usize {
        self.semaphore(lane).available_permits()
    }

    /// Fails every current and future waiter
    pub fn close(&self) {
        self.submit.close();
        self.poll.close();
    }

    fn semaphore(&self, lane: Lane) -> &Arc<Semaphore> {
        match lane {
            Lane::Submit => &self.submit,
            Lane::Poll => &self.poll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[tokio::test]
    async fn test_lanes_are_independent() {
        let governor = ConcurrencyGovernor::new(1, 2);
        let _submit = governor.acquire(Lane::Submit).await.unwrap();
        assert_eq!(governor.available(Lane::Submit), 0);
        assert_eq!(governor.available(Lane::Poll), 2);

        let poll = governor.acquire(Lane::Poll).await.unwrap();
        assert_eq!(poll.lane(), Lane::Poll);
        assert_eq!(governor.available(Lane::Poll), 1);

        drop(poll);
        assert_eq!(governor.available(Lane::Poll), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiters_are_served_in_order() {
        let governor = ConcurrencyGovernor::new(1, 1);
        let order = Arc::new(Mutex::new(Vec::new()));
        let held = governor.acquire(Lane::Submit).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..3 {
            let governor = governor.clone();
            let order = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                let _permit = governor.acquire(Lane::Submit).await.unwrap();
                order.lock().unwrap().push(i);
                tokio::time::sleep(Duration::from_millis(10)).await;
            }));
            // Let each waiter enqueue before the next one
            tokio::task::yield_now().await;
        }

        drop(held);
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_close_fails_waiters() {
        let governor = ConcurrencyGovernor::new(1, 1);
        let _held = governor.acquire(Lane::Poll).await.unwrap();

        let waiter = {
            let governor = governor.clone();
            tokio::spawn(async move { governor.acquire(Lane::Poll).await.map(|_| ()) })
        };
        tokio::task::yield_now().await;

        governor.close();
        assert_eq!(waiter.await.unwrap(), Err(GovernorClosed));
    }
}
