//! Session configuration.
//!
//! Loaded from a JSON file by the application crate (with the `serde`
//! feature) and/or filled from command-line flags, then handed to each
//! session.  Nothing in the core hard-codes these values.

use crate::{RrError, RrResult};

/// Per-session tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Period of the card-refresh tick, in milliseconds.  Default: 500.
    pub tick_interval_ms: u64,

    /// Maximum number of rides shown as cards at once.  Default: 10.
    pub max_displayed: usize,

    /// On a user-initiated disconnect, also clear the cards and push zeroed
    /// stat labels.
    ///
    /// `false` (default) leaves the last cards and labels on screen while
    /// the underlying state is cleared.
    pub clear_display_on_user_disconnect: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:                 500,
            max_displayed:                    10,
            clear_display_on_user_disconnect: false,
        }
    }
}

impl SessionConfig {
    /// Reject values that would make the scheduler meaningless.
    pub fn validate(&self) -> RrResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(RrError::Config("tick_interval_ms must be greater than 0".into()));
        }
        if self.max_displayed == 0 {
            return Err(RrError::Config("max_displayed must be greater than 0".into()));
        }
        Ok(())
    }
}
