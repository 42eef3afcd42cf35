//! Load gate: hides a view's content until the startup assets settle

use super::schedule::{Scheduler, Subscription};

pub struct LoadGate {
    loading: bool,
    pending: Option<Subscription>,
}

impl LoadGate {
    /// Clears synchronously when already loaded, otherwise waits for the
    /// first load signal.
    pub fn mount(scheduler: &dyn Scheduler) -> Self {
        if scheduler.is_loaded() {
            Self {
                loading: false,
                pending: None,
            }
        } else {
            Self {
                loading: true,
                pending: Some(scheduler.on_load()),
            }
        }
    }

    /// Check the load signal. Returns whether the view is still loading.
    pub fn poll(&mut self) -> bool {
        if self.pending.as_ref().is_some_and(Subscription::has_fired) {
            self.loading = false;
            self.pending = None;
        }
        self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::schedule::manual::ManualScheduler;

    #[test]
    fn already_loaded_clears_at_mount() {
        let scheduler = ManualScheduler::loaded();
        let mut gate = LoadGate::mount(&scheduler);
        assert!(!gate.is_loading());
        assert!(!gate.poll());
        assert_eq!(scheduler.live_subscriptions(), 0);
    }

    #[test]
    fn transitions_exactly_once() {
        let scheduler = ManualScheduler::default();
        let mut gate = LoadGate::mount(&scheduler);

        let mut transitions = 0;
        let mut was_loading = gate.is_loading();
        for frame in 0..10 {
            if frame == 4 {
                scheduler.fire_load();
            }
            let loading = gate.poll();
            if was_loading && !loading {
                transitions += 1;
            }
            assert!(!(loading && !was_loading), "gate reopened");
            was_loading = loading;
        }
        assert_eq!(transitions, 1);
        assert!(!gate.is_loading());
    }

    #[test]
    fn listener_released_once_loaded() {
        let scheduler = ManualScheduler::default();
        let mut gate = LoadGate::mount(&scheduler);
        assert_eq!(scheduler.live_subscriptions(), 1);
        scheduler.fire_load();
        gate.poll();
        assert_eq!(scheduler.live_subscriptions(), 0);
    }

    #[test]
    fn teardown_while_loading_deregisters() {
        let scheduler = ManualScheduler::default();
        let gate = LoadGate::mount(&scheduler);
        drop(gate);
        assert_eq!(scheduler.live_subscriptions(), 0);
    }
}
