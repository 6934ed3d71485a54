//! Cancelable scheduled tasks
//!
//! Replaces ad-hoc timeout/interval callbacks with explicit handles owned by
//! the session. Time is in milliseconds on whatever clock the driver uses
//! (the requestAnimationFrame timestamp in the browser).

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TaskHandle,
    due_ms: f64,
    /// Repeat period for interval tasks
    period_ms: Option<f64>,
    task: T,
}

/// Set of pending tasks, fired in due order
#[derive(Debug, Clone)]
pub struct Timers<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T: Clone> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    /// Fire `task` once at `due_ms`
    pub fn schedule_once(&mut self, due_ms: f64, task: T) -> TaskHandle {
        let handle = self.allocate();
        self.pending.push(Scheduled {
            handle,
            due_ms,
            period_ms: None,
            task,
        });
        handle
    }

    /// Fire `task` at `first_ms` and every `period_ms` after that.
    ///
    /// Non-positive periods are treated as one-shot.
    pub fn schedule_every(&mut self, first_ms: f64, period_ms: f64, task: T) -> TaskHandle {
        let handle = self.allocate();
        self.pending.push(Scheduled {
            handle,
            due_ms: first_ms,
            period_ms: (period_ms > 0.0).then_some(period_ms),
            task,
        });
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Cancel the task in `slot` (if any) and leave the slot empty
    pub fn cancel_slot(&mut self, slot: &mut Option<TaskHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    /// Replace whatever task `slot` holds with a new one-shot task
    pub fn replace_once(&mut self, slot: &mut Option<TaskHandle>, due_ms: f64, task: T) {
        self.cancel_slot(slot);
        *slot = Some(self.schedule_once(due_ms, task));
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Pop the earliest task due at or before `now_ms`.
    ///
    /// Ties fire in scheduling order. Interval tasks are re-armed; an
    /// interval that fell behind fires once and skips the missed periods.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TaskHandle, f64, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        let due_ms = self.pending[index].due_ms;
        let handle = self.pending[index].handle;

        match self.pending[index].period_ms {
            Some(period) => {
                let mut next = due_ms + period;
                if next <= now_ms {
                    let missed = ((now_ms - next) / period).floor() + 1.0;
                    next += missed * period;
                }
                let entry = &mut self.pending[index];
                entry.due_ms = next;
                Some((handle, due_ms, entry.task.clone()))
            }
            None => {
                let entry = self.pending.remove(index);
                Some((handle, due_ms, entry.task))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        A,
        B,
        C,
    }

    fn drain(timers: &mut Timers<Task>, now: f64) -> Vec<(f64, Task)> {
        let mut fired = Vec::new();
        while let Some((_, due, task)) = timers.pop_due(now) {
            fired.push((due, task));
        }
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule_once(300.0, Task::C);
        timers.schedule_once(100.0, Task::A);
        timers.schedule_once(200.0, Task::B);

        assert!(drain(&mut timers, 50.0).is_empty());
        assert_eq!(
            drain(&mut timers, 250.0),
            vec![(100.0, Task::A), (200.0, Task::B)]
        );
        assert_eq!(drain(&mut timers, 300.0), vec![(300.0, Task::C)]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule_once(100.0, Task::B);
        timers.schedule_once(100.0, Task::A);
        assert_eq!(
            drain(&mut timers, 100.0),
            vec![(100.0, Task::B), (100.0, Task::A)]
        );
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let h = timers.schedule_once(100.0, Task::A);
        assert!(timers.is_pending(h));
        assert!(timers.cancel(h));
        assert!(!timers.cancel(h));
        assert!(drain(&mut timers, 1000.0).is_empty());
    }

    #[test]
    fn test_replace_once_keeps_single_slot() {
        let mut timers = Timers::new();
        let mut slot = None;
        timers.replace_once(&mut slot, 1500.0, Task::A);
        let first = slot.unwrap();
        timers.replace_once(&mut slot, 2500.0, Task::A);

        assert!(!timers.is_pending(first));
        assert_eq!(timers.len(), 1);
        assert!(drain(&mut timers, 2000.0).is_empty());
        assert_eq!(drain(&mut timers, 2500.0), vec![(2500.0, Task::A)]);
    }

    #[test]
    fn test_interval_repeats() {
        let mut timers = Timers::new();
        let h = timers.schedule_every(1000.0, 1000.0, Task::A);

        assert_eq!(drain(&mut timers, 1000.0), vec![(1000.0, Task::A)]);
        assert!(timers.is_pending(h));
        assert_eq!(drain(&mut timers, 2000.0), vec![(2000.0, Task::A)]);
        assert!(timers.cancel(h));
        assert!(drain(&mut timers, 5000.0).is_empty());
    }

    #[test]
    fn test_interval_skips_missed_periods() {
        let mut timers = Timers::new();
        timers.schedule_every(1000.0, 1000.0, Task::A);
        assert_eq!(drain(&mut timers, 4500.0), vec![(1000.0, Task::A)]);
        assert!(drain(&mut timers, 4999.0).is_empty());
        assert_eq!(drain(&mut timers, 5000.0), vec![(5000.0, Task::A)]);
    }

    #[test]
    fn test_zero_period_is_one_shot() {
        let mut timers = Timers::new();
        timers.schedule_every(10.0, 0.0, Task::A);
        assert_eq!(drain(&mut timers, 100.0), vec![(10.0, Task::A)]);
        assert!(timers.is_empty());
    }
}
