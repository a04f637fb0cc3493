//! Single-instance lifecycle for the inspector.
//!
//! The host owns one `InspectorHost`; the inspector exists only between
//! `start` and `stop`, and a second `start` while it runs is refused.

use super::state::InspectorState;
use crate::config::Config;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Inspector is already active")]
    AlreadyActive,
}

#[derive(Default)]
pub struct InspectorHost {
    session: Option<InspectorState>,
}

impl InspectorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh inspector session.
    pub fn start(&mut self, config: &Config) -> Result<&mut InspectorState, SessionError> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        tracing::info!("inspector session started");
        Ok(self.session.insert(InspectorState::new(config)))
    }

    /// Ends the running session, handing back its final state.
    pub fn stop(&mut self) -> Option<InspectorState> {
        let stopped = self.session.take();
        if stopped.is_some() {
            tracing::info!("inspector session stopped");
        }
        stopped
    }

    /// Starts the inspector if it is stopped and stops it otherwise.
    ///
    /// Returns true if a session is running afterwards.
    pub fn toggle(&mut self, config: &Config) -> bool {
        if self.stop().is_some() {
            false
        } else {
            self.start(config).is_ok()
        }
    }

    /// Stops the session if its panel asked to be closed.
    pub fn stop_if_closed(&mut self) -> bool {
        if self.session.as_ref().is_some_and(InspectorState::close_requested) {
            self.stop();
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<&InspectorState> {
        self.session.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut InspectorState> {
        self.session.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_start_is_refused() {
        let config = Config::default();
        let mut host = InspectorHost::new();
        assert!(host.start(&config).is_ok());
        assert_eq!(host.start(&config).err(), Some(SessionError::AlreadyActive));
    }

    #[test]
    fn test_restart_after_stop() {
        let config = Config::default();
        let mut host = InspectorHost::new();
        host.start(&config).unwrap().set_path_text("//p");
        let stopped = host.stop().unwrap();
        assert_eq!(stopped.path_text(), "//p");
        assert!(host.stop().is_none());

        let fresh = host.start(&config).unwrap();
        assert!(fresh.path_text().is_empty());
    }

    #[test]
    fn test_toggle() {
        let config = Config::default();
        let mut host = InspectorHost::new();
        assert!(host.toggle(&config));
        assert!(host.is_active());
        assert!(!host.toggle(&config));
        assert!(host.active().is_none());
    }
}
