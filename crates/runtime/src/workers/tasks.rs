//! Bookkeeping for every task the battle worker spawns.

use std::future::Future;

use tokio::task::JoinHandle;

/// Tracks periodic skill timers and one-shot window tasks so that a stop can
/// abort all of them. Finished one-shots are pruned on every spawn.
#[derive(Default)]
pub(crate) struct TaskTracker {
    timers: Vec<JoinHandle<()>>,
    oneshots: Vec<JoinHandle<()>>,
}

impl TaskTracker {
    pub(crate) fn spawn_timer<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.timers.push(tokio::spawn(task));
    }

    pub(crate) fn spawn_oneshot<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.oneshots.retain(|handle| !handle.is_finished());
        self.oneshots.push(tokio::spawn(task));
    }

    /// Aborts everything still tracked. Returns how many handles were dropped.
    ///
    /// Aborted handles are never awaited, so cancellation errors never surface.
    pub(crate) fn abort_all(&mut self) -> usize {
        let count = self.timers.len() + self.oneshots.len();
        for handle in self.timers.drain(..).chain(self.oneshots.drain(..)) {
            handle.abort();
        }
        count
    }

    pub(crate) fn timer_count(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for TaskTracker {
    fn drop(&mut self) {
        self.abort_all();
    }
}
