//! Scoped interval timer
//!
//! A `Ticker` spawns one tokio interval task that forwards ticks over a
//! channel. The task lives exactly as long as the returned `TickHandle`:
//! dropping the handle aborts it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Buffered ticks before the timer starts waiting on the consumer
const TICK_BUFFER: usize = 64;

pub struct Ticker;

impl Ticker {
    /// Start ticking every `period`. Must be called inside a tokio runtime.
    pub fn start(period: Duration) -> TickHandle {
        let (tx, rx) = mpsc::channel(TICK_BUFFER);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let at = interval.tick().await;
                if tx.send(at.into_std()).await.is_err() {
                    break;
                }
            }
        });
        trace!(?period, "ticker started");
        TickHandle { task, rx, period }
    }
}

/// Owner of a running ticker
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
    rx: mpsc::Receiver<std::time::Instant>,
    period: Duration,
}

impl TickHandle {
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Collect the ticks delivered since the last call without waiting
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    /// Wait for the next tick
    pub async fn next(&mut self) -> Option<std::time::Instant> {
        self.rx.recv().await
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
        trace!("ticker stopped");
    }
}
