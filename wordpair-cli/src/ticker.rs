use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::debug;
use wordpair_core::{TickSource, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Stop,
    Start {
        handle: TimerHandle,
        interval: Duration,
    },
}

/// Tick source for the terminal loop. Scheduling only publishes a command;
/// the loop owns the actual `tokio::time::Interval`.
pub struct IntervalTicker {
    tx: watch::Sender<TimerCommand>,
    next_id: u64,
    active: Option<TimerHandle>,
}

impl IntervalTicker {
    pub fn new() -> (Self, watch::Receiver<TimerCommand>) {
        let (tx, rx) = watch::channel(TimerCommand::Stop);
        let ticker = Self {
            tx,
            next_id: 0,
            active: None,
        };
        (ticker, rx)
    }

    pub fn active(&self) -> Option<TimerHandle> {
        self.active
    }
}

impl TickSource for IntervalTicker {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.active = Some(handle);
        debug!(handle = handle.0, ?interval, "Timer scheduled");
        self.tx.send_replace(TimerCommand::Start { handle, interval });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        // Stale handles must not stop a newer timer
        if self.active == Some(handle) {
            self.active = None;
            debug!(handle = handle.0, "Timer cancelled");
            self.tx.send_replace(TimerCommand::Stop);
        }
    }
}

/// The interval the loop should run for `command`, first tick one period from now.
pub fn interval_for(command: TimerCommand) -> Option<Interval> {
    match command {
        TimerCommand::Start { interval, .. } => {
            let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(timer)
        }
        TimerCommand::Stop => None,
    }
}

/// Completes on the next tick, or never when no interval is armed.
pub async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
