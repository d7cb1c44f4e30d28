use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::behaviors::parallax::{enabled_for_width, ParallaxControl};
use crate::config::PageConfig;
use crate::dom::{Listener, Page};
use crate::error::InteractionError;
use crate::schedule::{Debouncer, Scheduler, TimerScheduler};

/// Applies the breakpoint once the viewport has settled on `width`.
pub fn settle<P: ParallaxControl + ?Sized>(width: f64, min_width: f64, parallax: &mut P) {
    if enabled_for_width(width, min_width) {
        parallax.enable();
    } else {
        parallax.disable();
    }
}

/// Builds the debounced resize action. `width` is sampled when the quiet
/// period ends, not when the event fired.
pub fn debounced_settle<S, P, W>(
    scheduler: S,
    wait_ms: u32,
    min_width: f64,
    parallax: Rc<RefCell<P>>,
    width: W,
) -> Debouncer<S>
where
    S: Scheduler,
    P: ParallaxControl + 'static,
    W: Fn() -> f64 + 'static,
{
    Debouncer::new(scheduler, wait_ms, move || {
        let current = width();
        settle(current, min_width, &mut *parallax.borrow_mut());
        debug!("Resize settled at {}px", current);
    })
}

/// Window resize listener that toggles parallax once resizing stops.
pub struct ResizeWatcher {
    debouncer: Rc<Debouncer<TimerScheduler>>,
    _listener: Listener,
}

impl ResizeWatcher {
    pub fn attach<P>(
        page: &Page,
        config: &PageConfig,
        parallax: Rc<RefCell<P>>,
    ) -> Result<Self, InteractionError>
    where
        P: ParallaxControl + 'static,
    {
        let width_page = page.clone();
        let debouncer = Rc::new(debounced_settle(
            TimerScheduler,
            config.resize_debounce_ms,
            config.parallax_min_width,
            parallax,
            move || width_page.viewport_width(),
        ));

        let trigger = Rc::clone(&debouncer);
        let listener = Listener::new(&page.window, "resize", move |_| trigger.trigger())?;
        Ok(Self {
            debouncer,
            _listener: listener,
        })
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::testing::ManualScheduler;
    use std::cell::Cell;

    /// Records every switch so tests can check both the outcome and that a
    /// stable handle was used (one registration at a time).
    #[derive(Default)]
    struct FakeParallax {
        registered: usize,
        enables: usize,
        disables: usize,
    }

    impl ParallaxControl for FakeParallax {
        fn enable(&mut self) {
            self.enables += 1;
            if self.registered == 0 {
                self.registered = 1;
            }
        }

        fn disable(&mut self) {
            self.disables += 1;
            self.registered = 0;
        }

        fn is_enabled(&self) -> bool {
            self.registered > 0
        }
    }

    type Harness = (
        ManualScheduler,
        Debouncer<ManualScheduler>,
        Rc<RefCell<FakeParallax>>,
        Rc<Cell<f64>>,
    );

    fn harness(initial_width: f64, enabled: bool) -> Harness {
        let scheduler = ManualScheduler::default();
        let parallax = Rc::new(RefCell::new(FakeParallax {
            registered: usize::from(enabled),
            ..FakeParallax::default()
        }));
        let width = Rc::new(Cell::new(initial_width));
        let sample = Rc::clone(&width);
        let debouncer = debounced_settle(
            scheduler.clone(),
            250,
            768.0,
            Rc::clone(&parallax),
            move || sample.get(),
        );
        (scheduler, debouncer, parallax, width)
    }

    #[test]
    fn settle_respects_breakpoint() {
        let mut parallax = FakeParallax::default();
        settle(1024.0, 768.0, &mut parallax);
        assert!(parallax.is_enabled());
        settle(768.0, 768.0, &mut parallax);
        assert!(!parallax.is_enabled());
    }

    #[test]
    fn burst_of_resizes_runs_once() {
        let (scheduler, debouncer, parallax, _) = harness(1280.0, true);

        for _ in 0..10 {
            debouncer.trigger();
            scheduler.advance(5);
        }
        assert_eq!(parallax.borrow().enables + parallax.borrow().disables, 0);

        scheduler.advance(250);
        let calls = parallax.borrow().enables + parallax.borrow().disables;
        assert_eq!(calls, 1);
    }

    #[test]
    fn narrowing_detaches_parallax() {
        let (scheduler, debouncer, parallax, width) = harness(1280.0, true);

        width.set(600.0);
        debouncer.trigger();
        scheduler.advance(250);

        assert!(!parallax.borrow().is_enabled());
        assert_eq!(parallax.borrow().disables, 1);
    }

    #[test]
    fn widening_reattaches_parallax() {
        let (scheduler, debouncer, parallax, width) = harness(600.0, false);

        width.set(1024.0);
        debouncer.trigger();
        scheduler.advance(250);

        assert!(parallax.borrow().is_enabled());
        assert_eq!(parallax.borrow().enables, 1);
    }

    #[test]
    fn width_is_read_when_the_window_closes() {
        let (scheduler, debouncer, parallax, width) = harness(1280.0, true);

        debouncer.trigger();
        scheduler.advance(100);
        width.set(500.0);
        scheduler.advance(150);

        assert!(!parallax.borrow().is_enabled());
    }

    #[test]
    fn repeated_cycles_toggle_cleanly() {
        let (scheduler, debouncer, parallax, width) = harness(1280.0, true);

        let cycles = [
            (600.0, false),
            (1200.0, true),
            (700.0, false),
            (900.0, true),
            (1000.0, true),
        ];
        for (w, expect) in cycles {
            width.set(w);
            debouncer.trigger();
            scheduler.advance(250);
            assert_eq!(parallax.borrow().is_enabled(), expect, "width {}", w);
            assert!(parallax.borrow().registered <= 1);
        }
    }
}
