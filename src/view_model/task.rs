//! Ownership of in-flight fetch tasks.

use tokio::task::JoinHandle;

/// Owns a spawned fetch and aborts it when dropped.
///
/// A view-model holds at most one of these. Replacing it (reload) or
/// dropping the view-model cancels the previous request, so its result is
/// never delivered.
#[derive(Debug)]
pub struct FetchTask {
    handle: JoinHandle<()>,
}

impl FetchTask {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    /// Spawn `future` on the current tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self::new(tokio::spawn(future))
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::debug!("Aborting in-flight fetch");
            self.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let (tx, rx) = oneshot::channel::<()>();
        let task = FetchTask::spawn(async move {
            futures::future::pending::<()>().await;
            let _ = tx.send(());
        });

        drop(task);
        // Sender is dropped with the aborted future
        let result = tokio::time::timeout(Duration::from_secs(1), rx).await;
        assert!(matches!(result, Ok(Err(_))));
    }

    #[tokio::test]
    async fn test_finished_task() {
        let task = FetchTask::spawn(async {});
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(task.is_finished());
    }
}
