//! Surface observation
//!
//! Two independent host signals funnel into the player's `resize()`: the
//! window resize event and the container attribute observer (layout changes
//! such as a splitter pane). Subscriptions live as long as the player, not
//! as long as a session.

use crate::host::{PlayerHost, SubscriptionId, SurfaceSignal};

/// Observed signals, in installation order
const OBSERVED: [SurfaceSignal; 2] = [SurfaceSignal::WindowResize, SurfaceSignal::ContainerAttributes];

/// Owns the player's two surface subscriptions
#[derive(Debug, Default)]
pub struct SurfaceObserver {
    subscriptions: Vec<(SurfaceSignal, SubscriptionId)>,
}

impl SurfaceObserver {
    /// Create an observer with nothing installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to both signals; returns `false` when already installed
    pub fn install(&mut self, host: &mut impl PlayerHost) -> bool {
        if self.is_installed() {
            return false;
        }
        self.subscriptions = OBSERVED
            .into_iter()
            .map(|signal| (signal, host.subscribe(signal)))
            .collect();
        log::debug!("Surface observer installed ({} subscriptions)", self.subscriptions.len());
        true
    }

    /// Release both subscriptions
    pub fn uninstall(&mut self, host: &mut impl PlayerHost) {
        for (_, id) in self.subscriptions.drain(..) {
            host.unsubscribe(id);
        }
    }

    /// Whether the subscriptions are active
    pub fn is_installed(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Whether `signal` should trigger a resize
    pub fn observes(&self, signal: SurfaceSignal) -> bool {
        self.subscriptions.iter().any(|(s, _)| *s == signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;

    #[test]
    fn test_install_is_idempotent() {
        let mut host = HeadlessHost::default();
        let mut observer = SurfaceObserver::new();
        assert!(observer.install(&mut host));
        assert!(!observer.install(&mut host));
        assert_eq!(host.subscription_count(), 2);
        assert!(observer.observes(SurfaceSignal::WindowResize));
        assert!(observer.observes(SurfaceSignal::ContainerAttributes));
    }

    #[test]
    fn test_uninstall_releases_subscriptions() {
        let mut host = HeadlessHost::default();
        let mut observer = SurfaceObserver::new();
        observer.install(&mut host);
        observer.uninstall(&mut host);
        assert_eq!(host.subscription_count(), 0);
        assert!(!observer.observes(SurfaceSignal::WindowResize));
    }
}
