use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::debug;

/// Cancel-and-replace scheduler: at most one pending task per key.
///
/// Scheduling a key aborts whatever was pending for it, including a task that
/// already finished sleeping and is mid-request.
pub struct Debouncer<K> {
    runtime: Handle,
    delay: Duration,
    tasks: HashMap<K, AbortHandle>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Copy + std::fmt::Debug,
{
    pub fn new(runtime: Handle, delay: Duration) -> Self {
        Self {
            runtime,
            delay,
            tasks: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay unless `key` is scheduled or cancelled again first.
    pub fn schedule<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel(key);
        let delay = self.delay;
        let handle = self.runtime.spawn(async move {
            sleep(delay).await;
            task.await;
        });
        self.tasks.insert(key, handle.abort_handle());
        debug!(?key, delay_ms = delay.as_millis() as u64, "debounce scheduled");
    }

    /// Abort the pending task for `key`, returning whether one was still running.
    pub fn cancel(&mut self, key: K) -> bool {
        match self.tasks.remove(&key) {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    debug!(?key, "debounce cancelled");
                }
                was_running
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.tasks.get(&key).is_some_and(|h| !h.is_finished())
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::advance;

    fn counting(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut debouncer = Debouncer::new(Handle::current(), Duration::from_millis(500));
        let fired = Arc::new(AtomicUsize::new(0));

        debouncer.schedule("email", counting(&fired));
        settle().await;
        advance(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending("email"));

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending("email"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once() {
        let mut debouncer = Debouncer::new(Handle::current(), Duration::from_millis(500));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            debouncer.schedule("email", counting(&fired));
            settle().await;
            advance(Duration::from_millis(100)).await;
            settle().await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let mut debouncer = Debouncer::new(Handle::current(), Duration::from_millis(500));
        let fired = Arc::new(AtomicUsize::new(0));

        debouncer.schedule("username", counting(&fired));
        assert!(debouncer.cancel("username"));
        assert!(!debouncer.cancel("username"));
        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let mut debouncer = Debouncer::new(Handle::current(), Duration::from_millis(500));
        let fired = Arc::new(AtomicUsize::new(0));

        debouncer.schedule("email", counting(&fired));
        debouncer.schedule("username", counting(&fired));
        settle().await;
        advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
