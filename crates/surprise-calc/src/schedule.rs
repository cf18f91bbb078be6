//! Virtual-time task queue
//!
//! Every delayed continuation in the widget (popup enter transitions, the
//! delayed game close, the easter-egg message chain) is a [`ScheduledTask`]
//! queued at `now + delay` on a millisecond counter that only moves when the
//! host advances it. Tasks are never cancelled.

use crate::popup::Overlay;

/// A deferred action, dispatched by [`CalculatorApp`](crate::app::CalculatorApp)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Give a shown overlay its enter-active state
    EnterActive(Overlay),
    /// Hide the game overlay and release the input gate
    FinishGameClose,
    /// Overwrite the primary display
    ShowMessage(&'static str),
    /// Clear the calculator
    ResetCalculator,
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    seq: u64,
    task: ScheduledTask,
}

/// Millisecond clock plus the queue of tasks waiting on it
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Current virtual time
    now_ms: u64,
    /// Insertion counter, orders tasks with equal due times
    next_seq: u64,
    queue: Vec<Pending>,
}

impl Scheduler {
    /// Create an empty scheduler at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue a task `delay_ms` from now; returns its due time
    pub fn schedule(&mut self, delay_ms: u64, task: ScheduledTask) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending { due_ms, seq, task });
        due_ms
    }

    /// Number of queued tasks
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest queued task
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.earliest().map(|i| self.queue[i].due_ms)
    }

    /// Remove the earliest task due at or before `until_ms`, moving the clock
    /// to its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let index = self.earliest()?;
        if self.queue[index].due_ms > until_ms {
            return None;
        }
        Some(self.take(index))
    }

    /// Remove the earliest task regardless of its due time, moving the clock
    /// forward to it
    pub fn pop_next(&mut self) -> Option<ScheduledTask> {
        let index = self.earliest()?;
        Some(self.take(index))
    }

    /// Move the clock forward to `ms`; never moves it backwards
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    fn earliest(&self) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)
    }

    fn take(&mut self, index: usize) -> ScheduledTask {
        let pending = self.queue.swap_remove(index);
        self.advance_to(pending.due_ms);
        pending.task
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_new() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.now_ms(), 0);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_schedule_returns_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(100);
        assert_eq!(scheduler.schedule(10, ScheduledTask::ResetCalculator), 110);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.next_due(), Some(110));
    }

    #[test]
    fn test_pop_due_respects_window() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, ScheduledTask::FinishGameClose);
        assert_eq!(scheduler.pop_due(299), None);
        assert_eq!(scheduler.now_ms(), 0);
        assert_eq!(scheduler.pop_due(300), Some(ScheduledTask::FinishGameClose));
        assert_eq!(scheduler.now_ms(), 300);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_pop_order_by_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(2000, ScheduledTask::ShowMessage("late"));
        scheduler.schedule(10, ScheduledTask::EnterActive(Overlay::Game));
        assert_eq!(
            scheduler.pop_next(),
            Some(ScheduledTask::EnterActive(Overlay::Game))
        );
        assert_eq!(scheduler.pop_next(), Some(ScheduledTask::ShowMessage("late")));
        assert_eq!(scheduler.now_ms(), 2000);
    }

    #[test]
    fn test_equal_due_times_are_fifo() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(5, ScheduledTask::ShowMessage("a"));
        scheduler.schedule(5, ScheduledTask::ShowMessage("b"));
        scheduler.schedule(5, ScheduledTask::ShowMessage("c"));
        let order: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(5)).collect();
        assert_eq!(
            order,
            vec![
                ScheduledTask::ShowMessage("a"),
                ScheduledTask::ShowMessage("b"),
                ScheduledTask::ShowMessage("c"),
            ]
        );
    }

    #[test]
    fn test_advance_to_never_rewinds() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(50);
        scheduler.advance_to(20);
        assert_eq!(scheduler.now_ms(), 50);
    }

    #[test]
    fn test_pop_next_on_empty() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.pop_next(), None);
    }
}
