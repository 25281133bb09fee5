//! Activation scope of a view.
//!
//! A view's state lives behind a mutex together with an `active` flag. Work
//! the view starts is spawned through its [`ViewScope`]: fetches race a
//! cancellation token and only write back while the view is active, so a
//! response arriving after [`ViewScope::close`] is dropped. Fire-and-forget
//! requests keep running after close but can no longer touch the state.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct Scoped<T> {
    value: T,
    active: bool,
}

/// View state plus the tasks spawned on its behalf.
#[derive(Debug)]
pub struct ViewScope<T> {
    state: Arc<Mutex<Scoped<T>>>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

/// Write access to a scope's state from a spawned task.
#[derive(Debug)]
pub struct StateHandle<T> {
    state: Arc<Mutex<Scoped<T>>>,
}

impl<T> Clone for StateHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> StateHandle<T> {
    /// Apply `f` if the owning view is still active. Returns whether it ran.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut scoped = self.state.lock().expect("view state lock poisoned");
        if !scoped.active {
            return false;
        }
        f(&mut scoped.value);
        true
    }
}

impl<T: Send + 'static> ViewScope<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(Scoped {
                value: initial,
                active: true,
            })),
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
        }
    }

    /// Read the current state.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let scoped = self.state.lock().expect("view state lock poisoned");
        f(&scoped.value)
    }

    /// Mutate the state synchronously; ignored once closed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        self.handle().update(f)
    }

    pub fn handle(&self) -> StateHandle<T> {
        StateHandle {
            state: self.state.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().expect("view state lock poisoned").active
    }

    /// Run `fetch` and hand its output to `apply`.
    ///
    /// Closing the scope abandons the fetch; `apply` never runs after close.
    pub fn load<F, A>(&mut self, fetch: F, apply: A)
    where
        F: Future + Send + 'static,
        F::Output: Send,
        A: FnOnce(&mut T, F::Output) + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let handle = self.handle();
        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!("view closed before fetch resolved");
                }
                output = fetch => {
                    handle.update(|value| apply(value, output));
                }
            }
        });
        self.track(task);
    }

    /// Run `task` to completion regardless of the scope's lifetime.
    pub fn fire<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.track(tokio::spawn(task));
    }

    /// Hold on to `task` for `settle`, forgetting tasks that already finished.
    fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(task);
    }

    /// Wait for every task spawned so far.
    pub async fn settle(&mut self) {
        for task in self.tasks.drain(..) {
            match task.await {
                Err(e) if !e.is_cancelled() => {
                    tracing::warn!(error = %e, "view task did not complete");
                }
                _ => {}
            }
        }
    }

    /// Deactivate the view: pending fetches are dropped and state is frozen.
    pub fn close(&self) {
        self.state.lock().expect("view state lock poisoned").active = false;
        self.cancel.cancel();
    }
}

impl<T> Drop for ViewScope<T> {
    fn drop(&mut self) {
        if let Ok(mut scoped) = self.state.lock() {
            scoped.active = false;
        }
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn load_writes_while_active() {
        let mut scope = ViewScope::new(0);
        scope.load(async { 7 }, |value, output| *value = output);
        scope.settle().await;

        assert_eq!(scope.read(|v| *v), 7);
    }

    #[tokio::test]
    async fn load_is_dropped_after_close() {
        let mut scope = ViewScope::new(0);
        scope.load(
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                7
            },
            |value, output| *value = output,
        );
        scope.close();
        scope.settle().await;

        assert_eq!(scope.read(|v| *v), 0);
        assert!(!scope.is_active());
    }

    #[tokio::test]
    async fn fired_tasks_outlive_close_but_cannot_write() {
        let mut scope = ViewScope::new(Vec::<u8>::new());
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = scope.handle();
        scope.fire(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let wrote = handle.update(|v| v.push(1));
            let _ = tx.send(wrote);
        });
        scope.close();
        scope.settle().await;

        assert!(!rx.await.unwrap());
        assert!(scope.read(Vec::is_empty));
    }

    #[tokio::test]
    async fn finished_tasks_are_not_held_until_settle() {
        let mut scope = ViewScope::new(0);
        for i in 0..100 {
            scope.load(async move { i }, |value, output| *value = output);
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert!(scope.tasks.len() <= 2, "held {} tasks", scope.tasks.len());
        scope.settle().await;
        assert_eq!(scope.read(|v| *v), 99);
        assert!(scope.tasks.is_empty());
    }
}
