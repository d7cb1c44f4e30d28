use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use web_sys::HtmlElement;

use crate::config::PageConfig;
use crate::dom::{apply_style, Listener, Page};
use crate::error::InteractionError;
use crate::schedule::{Scheduler, TimerScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Hidden,
    Visible,
}

/// A fade state together with the transition it runs under.
#[derive(Debug, Clone, Copy)]
pub struct FadeStyle<'a> {
    pub state: FadeState,
    pub transition: &'a str,
}

/// Hidden now, visible `delay_ms` later, at most once. `apply` renders a
/// state onto whatever is being faded.
pub struct FadeSequence<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    apply: Rc<dyn Fn(FadeState)>,
    started: Cell<bool>,
    shown: Rc<Cell<bool>>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> FadeSequence<S> {
    pub fn new<F>(scheduler: S, delay_ms: u32, apply: F) -> Self
    where
        F: Fn(FadeState) + 'static,
    {
        Self {
            scheduler,
            delay_ms,
            apply: Rc::new(apply),
            started: Cell::new(false),
            shown: Rc::new(Cell::new(false)),
            pending: RefCell::new(None),
        }
    }

    pub fn begin(&self) {
        if self.started.replace(true) {
            return;
        }
        (self.apply)(FadeState::Hidden);

        let apply = Rc::clone(&self.apply);
        let shown = Rc::clone(&self.shown);
        let handle = self.scheduler.after(
            self.delay_ms,
            Box::new(move || {
                shown.set(true);
                apply(FadeState::Visible);
            }),
        );
        self.pending.borrow_mut().replace(handle);
    }

    /// Cancels the pending reveal. A page hidden by `begin` is made visible
    /// first so it never stays at opacity 0.
    pub fn settle(&self) {
        let Some(handle) = self.pending.borrow_mut().take() else {
            return;
        };
        if !self.shown.replace(true) {
            (self.apply)(FadeState::Visible);
        }
        drop(handle);
    }
}

impl<S: Scheduler> Drop for FadeSequence<S> {
    fn drop(&mut self) {
        self.settle();
    }
}

/// One-shot body fade-in on the window `load` event.
pub struct FadeIn {
    sequence: Rc<FadeSequence<TimerScheduler>>,
    _listener: Option<Listener>,
}

impl FadeIn {
    /// Waits for `load`. When the document has already finished loading the
    /// fade starts right away instead.
    pub fn attach(
        page: &Page,
        config: &PageConfig,
        already_loaded: bool,
    ) -> Result<Self, InteractionError> {
        let body = page.body.clone();
        let transition = config.fade_transition.clone();
        let sequence = Rc::new(FadeSequence::new(
            TimerScheduler,
            config.fade_delay_ms,
            move |state| render(&body, &transition, state),
        ));

        if already_loaded {
            sequence.begin();
            return Ok(Self { sequence, _listener: None });
        }

        let on_load = Rc::clone(&sequence);
        let listener = Listener::new(&page.window, "load", move |_| on_load.begin())?;
        Ok(Self {
            sequence,
            _listener: Some(listener),
        })
    }
}

impl Drop for FadeIn {
    fn drop(&mut self) {
        self.sequence.settle();
    }
}

fn render(body: &HtmlElement, transition: &str, state: FadeState) {
    if let Err(e) = apply_style(body, &FadeStyle { state, transition }) {
        debug!("Fade-in step skipped: {}", e);
    }
}
