use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    time::{Duration, Instant},
};

use self::job::Job;
pub use self::time_provider::{DefaultTimeProvider, TimeProvider};
use crate::id::{self, Id};

mod job;
pub(crate) mod time_provider;

/// Timer queue for a single threaded event loop. Nothing runs on its own,
/// the owner asks for due jobs with [`Scheduler::take_due`] and uses
/// [`Scheduler::next_deadline`] to decide how long it may sleep. Jobs are
/// plain payloads which the owner dispatches.
#[derive(Debug)]
pub struct Scheduler<J, P = DefaultTimeProvider>
where
    P: TimeProvider,
{
    jobs: BinaryHeap<Reverse<Job<J>>>,
    time_provider: P,
    seq: u64,
}

impl<J> Scheduler<J, DefaultTimeProvider> {
    pub fn new() -> Self {
        Scheduler::new_with_provider(DefaultTimeProvider)
    }
}

impl<J> Default for Scheduler<J, DefaultTimeProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, P> Scheduler<J, P>
where
    P: TimeProvider,
{
    pub fn new_with_provider(time_provider: P) -> Self {
        Self { jobs: BinaryHeap::new(), time_provider, seq: 0 }
    }

    pub fn now(&self) -> Instant {
        self.time_provider.now()
    }

    /// Schedules a job to run after the specified duration.
    pub fn schedule(&mut self, timeout: Duration, payload: J) -> Id {
        let id = id::new();
        self.schedule_replace(id, timeout, payload);
        id
    }

    /// Schedules a job to run after the specified duration. If a job with
    /// the given ID is already pending it is dropped in favour of the new one.
    pub fn schedule_replace(&mut self, id: Id, timeout: Duration, payload: J) {
        self.cancel(id);
        self.seq += 1;
        let job = Job::new(id, timeout, self.time_provider.now(), self.seq, payload);
        log::trace!(id:% = id, run_at:? = job.run_at; "Scheduling job");
        self.jobs.push(Reverse(job));
    }

    /// Returns true if a pending job was removed.
    pub fn cancel(&mut self, id: Id) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|Reverse(job)| job.id != id);
        before != self.jobs.len()
    }

    pub fn is_scheduled(&self, id: Id) -> bool {
        self.jobs.iter().any(|Reverse(job)| job.id == id)
    }

    /// Drops every pending job.
    pub fn clear(&mut self) {
        if !self.jobs.is_empty() {
            log::debug!(count = self.jobs.len(); "Discarding pending jobs");
        }
        self.jobs.clear();
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.jobs.peek().map(|Reverse(job)| job.run_at)
    }

    /// Time left until the nearest job is due, zero if it is overdue.
    pub fn until_next(&self) -> Option<Duration> {
        let now = self.time_provider.now();
        self.next_deadline().map(|run_at| run_at.saturating_duration_since(now))
    }

    /// Removes and returns the earliest job if it is due.
    pub fn pop_due(&mut self) -> Option<J> {
        let now = self.time_provider.now();
        if self.jobs.peek().is_some_and(|Reverse(job)| job.run_at <= now) {
            self.jobs.pop().map(|Reverse(job)| job.payload)
        } else {
            None
        }
    }

    /// Removes and returns payloads of all jobs that are due, earliest first.
    pub fn take_due(&mut self) -> Vec<J> {
        std::iter::from_fn(|| self.pop_due()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Scheduler;
    use crate::{id, scheduler::time_provider::fake::FakeTimeProvider};

    #[test]
    fn returns_due_jobs_in_deadline_order() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());

        scheduler.schedule(Duration::from_millis(40), 4);
        scheduler.schedule(Duration::from_millis(10), 1);
        scheduler.schedule(Duration::from_millis(30), 3);
        scheduler.schedule(Duration::from_millis(20), 2);

        clock.advance(Duration::from_millis(25));
        assert_eq!(scheduler.take_due(), vec![1, 2]);

        clock.advance(Duration::from_millis(100));
        assert_eq!(scheduler.take_due(), vec![3, 4]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn nothing_is_due_before_deadline() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());
        scheduler.schedule(Duration::from_millis(500), "late");

        clock.advance(Duration::from_millis(499));

        assert!(scheduler.take_due().is_empty());
        assert_eq!(scheduler.until_next(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn jobs_with_equal_deadline_keep_insertion_order() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());
        for i in 0..5 {
            scheduler.schedule(Duration::from_millis(10), i);
        }

        clock.advance(Duration::from_millis(10));

        assert_eq!(scheduler.take_due(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn replace_restarts_the_timer() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());
        let id = id::new();

        scheduler.schedule_replace(id, Duration::from_millis(500), "first");
        clock.advance(Duration::from_millis(400));
        scheduler.schedule_replace(id, Duration::from_millis(500), "second");
        clock.advance(Duration::from_millis(400));

        assert!(scheduler.take_due().is_empty());
        assert_eq!(scheduler.len(), 1);

        clock.advance(Duration::from_millis(100));
        assert_eq!(scheduler.take_due(), vec!["second"]);
    }

    #[test]
    fn cancel_and_clear_drop_jobs() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());
        let cancelled = scheduler.schedule(Duration::from_millis(1), 'a');
        scheduler.schedule(Duration::from_millis(1), 'b');

        assert!(scheduler.cancel(cancelled));
        assert!(!scheduler.cancel(cancelled));
        assert!(!scheduler.is_scheduled(cancelled));

        clock.advance(Duration::from_millis(5));
        assert_eq!(scheduler.take_due(), vec!['b']);

        scheduler.schedule(Duration::from_millis(1), 'c');
        scheduler.clear();
        clock.advance(Duration::from_millis(5));
        assert!(scheduler.take_due().is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn pop_due_observes_changes_between_jobs() {
        let clock = FakeTimeProvider::new();
        let mut scheduler = Scheduler::new_with_provider(clock.clone());
        let later = id::new();
        scheduler.schedule(Duration::from_millis(10), "first");
        scheduler.schedule_replace(later, Duration::from_millis(20), "stale");

        clock.advance(Duration::from_millis(30));
        assert_eq!(scheduler.pop_due(), Some("first"));

        scheduler.schedule_replace(later, Duration::from_millis(20), "fresh");
        assert_eq!(scheduler.pop_due(), None);

        clock.advance(Duration::from_millis(20));
        assert_eq!(scheduler.pop_due(), Some("fresh"));
    }
}
