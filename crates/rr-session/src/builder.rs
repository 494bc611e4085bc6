//! Fluent builder for constructing a [`Session`].

use rr_classify::{EventClassifier, NotificationPolicy, SilentFirstPickup};
use rr_core::{SessionConfig, Timestamp};
use rr_registry::RideRegistry;
use rr_stats::StatsAggregator;

use crate::{ConnectionState, RenderScheduler, Session, SessionResult};

/// Fluent builder for [`Session<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                            |
/// |-----------------|------------------------------------|
/// | `.policy(p)`    | [`SilentFirstPickup`]              |
/// | `.created_at(t)`| `Utc::now()` at build time         |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config)
///     .policy(SilentFirstPickup)
///     .build()?;
/// session.connect(Utc::now(), &mut presenter)?;
/// ```
pub struct SessionBuilder<P: NotificationPolicy = SilentFirstPickup> {
    config:     SessionConfig,
    policy:     P,
    created_at: Option<Timestamp>,
}

impl SessionBuilder<SilentFirstPickup> {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            policy:     SilentFirstPickup,
            created_at: None,
        }
    }
}

impl<P: NotificationPolicy> SessionBuilder<P> {
    /// Replace the notification policy.
    pub fn policy<Q: NotificationPolicy>(self, policy: Q) -> SessionBuilder<Q> {
        SessionBuilder {
            config:     self.config,
            policy,
            created_at: self.created_at,
        }
    }

    /// Timestamp the aggregates are initialised with.  The reset on
    /// `connect` overrides it, so this only matters for a session that is
    /// inspected before it ever connects.
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Validate the configuration and return a disconnected [`Session`].
    pub fn build(self) -> SessionResult<Session<P>> {
        self.config.validate()?;

        let created_at = self.created_at.unwrap_or_else(chrono::Utc::now);
        let scheduler = RenderScheduler::new(self.config.tick_interval_ms, self.config.max_displayed);

        Ok(Session {
            config:     self.config,
            state:      ConnectionState::Disconnected,
            registry:   RideRegistry::new(),
            stats:      StatsAggregator::new(created_at),
            classifier: EventClassifier::with_policy(self.policy),
            scheduler,
        })
    }
}
