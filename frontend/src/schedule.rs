use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run a callback later. Dropping the returned handle
/// cancels the callback if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    type Handle = Timeout;

    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

/// Trailing-edge debounce: every `trigger` cancels the pending call and
/// schedules a fresh one `wait_ms` later.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    action: Rc<dyn Fn()>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new<F>(scheduler: S, wait_ms: u32, action: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            scheduler,
            wait_ms,
            action: Rc::new(action),
            pending: RefCell::new(None),
        }
    }

    pub fn trigger(&self) {
        let action = Rc::clone(&self.action);
        let handle = self.scheduler.after(self.wait_ms, Box::new(move || action()));
        // Replacing the old handle drops it, which cancels the stale call.
        let stale = self.pending.borrow_mut().replace(handle);
        drop(stale);
    }

    /// Drops any pending call without running it.
    pub fn cancel(&self) {
        let stale = self.pending.borrow_mut().take();
        drop(stale);
    }
}

/// The "ticking" flag of a frame-coalesced updater. At most one frame
/// request may be outstanding at a time; its request id is kept so an
/// owner going away can cancel it.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: Cell<bool>,
    requested: Cell<Option<i32>>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should request a frame. Further calls
    /// return false until [`FrameThrottle::finish`] runs.
    pub fn try_begin(&self) -> bool {
        !self.ticking.replace(true)
    }

    /// Remembers the id of the frame request made after `try_begin`.
    pub fn record(&self, request_id: i32) {
        self.requested.set(Some(request_id));
    }

    pub fn finish(&self) {
        self.ticking.set(false);
        self.requested.set(None);
    }

    /// Hands back the outstanding request id, if any, and clears the flag.
    pub fn take_pending(&self) -> Option<i32> {
        self.ticking.set(false);
        self.requested.take()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking.get()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;

    fn counting_debouncer(
        scheduler: &ManualScheduler,
        wait_ms: u32,
    ) -> (Debouncer<ManualScheduler>, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let debouncer =
            Debouncer::new(scheduler.clone(), wait_ms, move || counter.set(counter.get() + 1));
        (debouncer, fired)
    }

    #[test]
    fn burst_collapses_into_one_trailing_call() {
        let scheduler = ManualScheduler::default();
        let (debouncer, fired) = counting_debouncer(&scheduler, 250);

        for _ in 0..10 {
            debouncer.trigger();
            scheduler.advance(5);
        }
        let last_event = scheduler.now() - 5;
        assert_eq!(fired.get(), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(244);
        assert_eq!(fired.get(), 0);
        scheduler.advance(1);
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.now(), last_event + 250);

        scheduler.advance(1_000);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn each_trigger_restarts_the_window() {
        let scheduler = ManualScheduler::default();
        let (debouncer, fired) = counting_debouncer(&scheduler, 250);

        debouncer.trigger();
        scheduler.advance(200);
        debouncer.trigger();
        scheduler.advance(200);
        assert_eq!(fired.get(), 0);
        scheduler.advance(50);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn separated_bursts_fire_separately() {
        let scheduler = ManualScheduler::default();
        let (debouncer, fired) = counting_debouncer(&scheduler, 250);

        debouncer.trigger();
        scheduler.advance(300);
        debouncer.trigger();
        scheduler.advance(300);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn cancel_drops_the_pending_call() {
        let scheduler = ManualScheduler::default();
        let (debouncer, fired) = counting_debouncer(&scheduler, 250);

        debouncer.trigger();
        debouncer.cancel();
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(500);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn throttle_allows_one_request_per_frame() {
        let throttle = FrameThrottle::new();
        assert!(throttle.try_begin());
        assert!(!throttle.try_begin());
        assert!(!throttle.try_begin());
        assert!(throttle.is_ticking());

        throttle.finish();
        assert!(!throttle.is_ticking());
        assert!(throttle.try_begin());
    }

    #[test]
    fn pending_frame_can_be_reclaimed_for_cancel() {
        let throttle = FrameThrottle::new();
        assert!(throttle.try_begin());
        throttle.record(7);

        assert_eq!(throttle.take_pending(), Some(7));
        assert!(!throttle.is_ticking());
        assert_eq!(throttle.take_pending(), None);
    }

    #[test]
    fn finished_frame_leaves_nothing_to_cancel() {
        let throttle = FrameThrottle::new();
        assert!(throttle.try_begin());
        throttle.record(3);
        throttle.finish();

        assert_eq!(throttle.take_pending(), None);
    }
}
