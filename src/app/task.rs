// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned from `update`
//!
//! A [`Task`] is a batch of futures that each resolve to at most one
//! message. `update` never awaits; it hands tasks to the runtime, which
//! spawns them and dispatches whatever they produce.

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

#[must_use = "a Task does nothing unless handed to the runtime"]
pub struct Task<T> {
    futures: Vec<BoxFuture<'static, Option<T>>>,
}

impl<T: Send + 'static> Task<T> {
    /// No work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Run `future` and map its output into a message
    pub fn perform<A, F, M>(future: F, map: M) -> Self
    where
        F: Future<Output = A> + Send + 'static,
        M: FnOnce(A) -> T + Send + 'static,
    {
        Self {
            futures: vec![future.map(move |output| Some(map(output))).boxed()],
        }
    }

    /// Drop every future in this task as soon as `token` is cancelled
    ///
    /// A cancelled future resolves to no message at all.
    pub fn abortable(self, token: &CancellationToken) -> Self {
        let futures = self
            .futures
            .into_iter()
            .map(|future| {
                let token = token.clone();
                async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => None,
                        output = future => output,
                    }
                }
                .boxed()
            })
            .collect();
        Self { futures }
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, Option<T>>> {
        self.futures
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({} futures)", self.futures.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_perform_maps_output() {
        let task = Task::perform(async { 20 }, |n| n + 1);
        let mut futures = task.into_futures();
        assert_eq!(futures.remove(0).await, Some(21));
    }

    #[tokio::test]
    async fn test_cancelled_task_yields_nothing() {
        let token = CancellationToken::new();
        let task: Task<u32> = Task::perform(futures::future::pending::<u32>(), |n| n)
            .abortable(&token);
        token.cancel();

        let mut futures = task.into_futures();
        assert_eq!(futures.remove(0).await, None);
    }

    #[tokio::test]
    async fn test_uncancelled_abortable_task_completes() {
        let token = CancellationToken::new();
        let task = Task::perform(async { "fix" }, str::len).abortable(&token);

        let mut futures = task.into_futures();
        assert_eq!(futures.remove(0).await, Some(3));
        assert!(Task::<u8>::none().into_futures().is_empty());
    }
}
