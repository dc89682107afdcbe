use super::*;

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask<T> {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub label: &'static str,
}

/// Payloads carry a short label for traces and `pending_timers`.
pub(crate) trait TimerLabel {
    fn label(&self) -> &'static str;
}

/// Virtual clock plus one-shot timer queue.
///
/// Nothing runs on its own: the owner pops due tasks and executes them.
#[derive(Debug)]
pub(crate) struct Scheduler<T> {
    task_queue: Vec<ScheduledTask<T>>,
    now_ms: i64,
    next_timer_id: i64,
    next_task_order: i64,
    step_limit: usize,
}

impl<T: TimerLabel> Scheduler<T> {
    pub(crate) fn new(step_limit: usize) -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            next_timer_id: 1,
            next_task_order: 0,
            step_limit: step_limit.max(1),
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub(crate) fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub(crate) fn set_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Timer(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.step_limit = max_steps;
        Ok(())
    }

    pub(crate) fn set_timeout(&mut self, delay_ms: i64, payload: T) -> i64 {
        let delay_ms = delay_ms.max(0);
        let due_at = self.now_ms.saturating_add(delay_ms);
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        tracing::debug!(id, due_at, delay_ms, label = payload.label(), "timer scheduled");
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            payload,
        });
        id
    }

    /// Returns whether a queued timer was removed. Unknown ids are ignored.
    pub(crate) fn clear_timeout(&mut self, id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        before != self.task_queue.len()
    }

    pub(crate) fn clear_all(&mut self) -> usize {
        let cleared = self.task_queue.len();
        self.task_queue.clear();
        cleared
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                label: task.payload.label(),
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.task_queue.is_empty()
    }

    pub(crate) fn has_task(&self, due_limit: Option<i64>) -> bool {
        self.next_task_index(due_limit).is_some()
    }

    /// Moves the clock forward without running anything.
    pub(crate) fn set_now(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(Error::Timer(format!(
                "cannot move the clock backwards (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        self.now_ms = target_ms;
        Ok(())
    }

    /// Removes the earliest task due at or before `due_limit` (any task when
    /// `None`). With `advance_clock` the clock jumps to the task's due time.
    pub(crate) fn pop_next(
        &mut self,
        due_limit: Option<i64>,
        advance_clock: bool,
    ) -> Option<ScheduledTask<T>> {
        let next_idx = self.next_task_index(due_limit)?;
        let task = self.task_queue.remove(next_idx);
        if advance_clock && task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        Some(task)
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());

        let next_task_desc = self
            .next_task_index(due_limit)
            .and_then(|idx| self.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},label={}",
                    task.id,
                    task.due_at,
                    task.order,
                    task.payload.label()
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Timer(format!(
            "timer queue exceeded max task steps: limit={}, steps={steps}, now_ms={}, due_limit={}, pending_tasks={}, next_task={}",
            self.step_limit,
            self.now_ms,
            due_limit_desc,
            self.task_queue.len(),
            next_task_desc
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tick(&'static str);

    impl TimerLabel for Tick {
        fn label(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn pop_next_orders_by_due_time_then_registration() {
        let mut scheduler = Scheduler::new(100);
        scheduler.set_timeout(200, Tick("late"));
        scheduler.set_timeout(100, Tick("first"));
        scheduler.set_timeout(100, Tick("second"));

        let labels = std::iter::from_fn(|| scheduler.pop_next(None, true))
            .map(|task| task.payload.0)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["first", "second", "late"]);
        assert_eq!(scheduler.now_ms(), 200);
    }

    #[test]
    fn pop_next_respects_due_limit() {
        let mut scheduler = Scheduler::new(100);
        scheduler.set_timeout(50, Tick("due"));
        scheduler.set_timeout(150, Tick("later"));
        assert_eq!(
            scheduler.pop_next(Some(100), false).map(|t| t.payload),
            Some(Tick("due"))
        );
        assert!(scheduler.pop_next(Some(100), false).is_none());
        assert_eq!(scheduler.now_ms(), 0);
    }

    #[test]
    fn clear_timeout_reports_removal_and_ignores_unknown_ids() {
        let mut scheduler = Scheduler::new(100);
        let id = scheduler.set_timeout(10, Tick("x"));
        assert!(scheduler.clear_timeout(id));
        assert!(!scheduler.clear_timeout(id));
        assert!(!scheduler.clear_timeout(999));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn negative_delay_is_clamped_to_now() {
        let mut scheduler = Scheduler::new(100);
        scheduler.set_timeout(-40, Tick("x"));
        assert_eq!(scheduler.pending()[0].due_at, 0);
    }

    #[test]
    fn set_now_rejects_going_backwards() {
        let mut scheduler: Scheduler<Tick> = Scheduler::new(100);
        scheduler.set_now(10).expect("forward");
        let Err(Error::Timer(message)) = scheduler.set_now(5) else {
            panic!("expected a timer error");
        };
        assert_eq!(message, "cannot move the clock backwards (target=5, now_ms=10)");
    }

    #[test]
    fn zero_step_limit_is_rejected() {
        let mut scheduler: Scheduler<Tick> = Scheduler::new(100);
        assert!(scheduler.set_step_limit(0).is_err());
        assert_eq!(scheduler.step_limit(), 100);
    }

    #[test]
    fn scheduling_near_i64_max_does_not_overflow() {
        let mut scheduler = Scheduler::new(100);
        scheduler.set_now(i64::MAX - 1).expect("forward");
        scheduler.set_timeout(10, Tick("x"));
        assert_eq!(scheduler.pending()[0].due_at, i64::MAX);
    }
}
