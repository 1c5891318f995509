//! Trailing-edge debouncer
//!
//! Values pushed in quick succession collapse into the last one, delivered
//! once the input has been quiet for the configured interval. A value still
//! waiting when the debouncer is dropped is discarded.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Forwards the latest pushed value after a quiet period
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task; settled values arrive on the receiver
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, mut input) = mpsc::unbounded_channel::<T>();
        let (output, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                if pending.is_none() {
                    match input.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    }
                    continue;
                }

                tokio::select! {
                    next = input.recv() => match next {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    () = tokio::time::sleep(interval) => {
                        if let Some(value) = pending.take() {
                            if output.send(value).is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        (Self { tx, task }, rx)
    }

    /// Feed a value; restarts the quiet period
    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::debug!("debouncer task has stopped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));
        for q in ["u", "un", "uni", "union"] {
            debouncer.push(q.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(rx.recv().await.as_deref(), Some("union"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_values_all_arrive() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));
        debouncer.push(1);
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.push(2);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_discards_the_pending_value() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));
        debouncer.push("abc");
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_sent_before_the_interval() {
        let (debouncer, mut rx) = Debouncer::new(Duration::from_millis(300));
        debouncer.push(7);
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(7));
    }
}
