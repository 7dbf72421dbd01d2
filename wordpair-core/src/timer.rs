use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// The round timer fires once per second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// External repeating timer. The host calls `Game::tick` each time it fires.
///
/// The game keeps at most one handle alive and cancels it before scheduling
/// another, and on round end, game end and reset.
pub trait TickSource: Send {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Default)]
struct TickerLog {
    next_id: u64,
    active: Vec<TimerHandle>,
    scheduled: usize,
    cancelled: usize,
}

/// A tick source that only records schedule/cancel calls. Ticks are driven
/// by calling `Game::tick` directly. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    log: Arc<Mutex<TickerLog>>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, TickerLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn active_handles(&self) -> Vec<TimerHandle> {
        self.log().active.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.log().active.is_empty()
    }

    pub fn scheduled_count(&self) -> usize {
        self.log().scheduled
    }

    pub fn cancelled_count(&self) -> usize {
        self.log().cancelled
    }
}

impl TickSource for ManualTicker {
    fn schedule_repeating(&mut self, _interval: Duration) -> TimerHandle {
        let mut log = self.log();
        log.next_id += 1;
        let handle = TimerHandle(log.next_id);
        log.active.push(handle);
        log.scheduled += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut log = self.log();
        let before = log.active.len();
        log.active.retain(|h| *h != handle);
        if log.active.len() < before {
            log.cancelled += 1;
        }
    }
}
