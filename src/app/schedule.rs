//! Load and timer signals, handed to views as cancellable subscriptions
//!
//! Background tasks only flip an atomic and request a repaint. Views poll
//! their subscriptions each frame, so everything observable happens on the
//! UI thread. Dropping a subscription cancels it, which is how a view's
//! teardown deregisters whatever it was waiting on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// One-shot signal. Fires at most once; never fires after cancellation.
pub struct Subscription {
    fired: Arc<AtomicBool>,
    token: CancellationToken,
}

impl Subscription {
    pub(crate) fn new(fired: Arc<AtomicBool>) -> Self {
        Self {
            fired,
            token: CancellationToken::new(),
        }
    }

    pub fn has_fired(&self) -> bool {
        !self.token.is_cancelled() && self.fired.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Source of the two asynchronous events views wait on
pub trait Scheduler {
    /// True once every startup asset has settled
    fn is_loaded(&self) -> bool;
    /// Fires when the startup assets settle
    fn on_load(&self) -> Subscription;
    /// Fires once after `delay`
    fn timeout(&self, delay: Duration) -> Subscription;
}

/// Process-wide "document loaded" flag, set once by the image prefetch
#[derive(Clone, Default)]
pub struct LoadLatch(Arc<AtomicBool>);

impl LoadLatch {
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn flag(&self) -> Arc<AtomicBool> {
        self.0.clone()
    }
}

/// Scheduler backed by the app's tokio runtime
pub struct RuntimeScheduler {
    handle: tokio::runtime::Handle,
    ctx: egui::Context,
    latch: LoadLatch,
}

impl RuntimeScheduler {
    pub fn new(handle: tokio::runtime::Handle, ctx: egui::Context, latch: LoadLatch) -> Self {
        Self { handle, ctx, latch }
    }
}

impl Scheduler for RuntimeScheduler {
    fn is_loaded(&self) -> bool {
        self.latch.is_set()
    }

    fn on_load(&self) -> Subscription {
        Subscription::new(self.latch.flag())
    }

    fn timeout(&self, delay: Duration) -> Subscription {
        let fired = Arc::new(AtomicBool::new(false));
        let subscription = Subscription::new(fired.clone());
        let token = subscription.token();
        let ctx = self.ctx.clone();

        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!(?delay, "Timer cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    fired.store(true, Ordering::Release);
                    ctx.request_repaint();
                }
            }
        });

        subscription
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::{LoadLatch, Scheduler, Subscription};
    use std::cell::{Cell, RefCell};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    struct Timer {
        deadline: Duration,
        fired: Arc<AtomicBool>,
        token: CancellationToken,
    }

    /// Test scheduler: load and time only move when the test says so
    #[derive(Default)]
    pub struct ManualScheduler {
        latch: LoadLatch,
        now: Cell<Duration>,
        timers: RefCell<Vec<Timer>>,
        tokens: RefCell<Vec<CancellationToken>>,
    }

    impl ManualScheduler {
        pub fn loaded() -> Self {
            let scheduler = Self::default();
            scheduler.fire_load();
            scheduler
        }

        pub fn fire_load(&self) {
            self.latch.set();
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
            for timer in self.timers.borrow().iter() {
                if timer.deadline <= self.now.get() && !timer.token.is_cancelled() {
                    timer.fired.store(true, Ordering::Release);
                }
            }
        }

        /// Subscriptions handed out and not yet cancelled
        pub fn live_subscriptions(&self) -> usize {
            self.tokens
                .borrow()
                .iter()
                .filter(|t| !t.is_cancelled())
                .count()
        }

        pub fn timers_started(&self) -> usize {
            self.timers.borrow().len()
        }
    }

    impl Scheduler for ManualScheduler {
        fn is_loaded(&self) -> bool {
            self.latch.is_set()
        }

        fn on_load(&self) -> Subscription {
            let subscription = Subscription::new(self.latch.flag());
            self.tokens.borrow_mut().push(subscription.token());
            subscription
        }

        fn timeout(&self, delay: Duration) -> Subscription {
            let fired = Arc::new(AtomicBool::new(false));
            let subscription = Subscription::new(fired.clone());
            self.tokens.borrow_mut().push(subscription.token());
            self.timers.borrow_mut().push(Timer {
                deadline: self.now.get() + delay,
                fired,
                token: subscription.token(),
            });
            subscription
        }
    }
}
