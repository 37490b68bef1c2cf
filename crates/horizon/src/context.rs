//! Scoped ownership of platform service sessions.
//!
//! A [`ServiceContext`] starts every session in order when it is created and
//! stops them in reverse order when it is dropped. If a session fails to
//! start, the ones already started are stopped before the error is returned.

use tracing::{debug, warn};

use crate::error::ServiceError;

/// A platform service session with an explicit start/stop lifecycle.
pub trait ServiceLifecycle {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn start(&mut self) -> Result<(), ServiceError>;

    /// Releases the session. Only called after a successful `start`.
    fn stop(&mut self);
}

/// Owns the platform handle together with its started sessions.
pub struct ServiceContext<P> {
    platform: P,
    sessions: Vec<Box<dyn ServiceLifecycle>>,
}

impl<P> ServiceContext<P> {
    /// Starts `sessions` in order and wraps `platform`.
    pub fn start(
        platform: P,
        sessions: Vec<Box<dyn ServiceLifecycle>>,
    ) -> Result<Self, ServiceError> {
        let mut ctx = Self {
            platform,
            sessions: Vec::with_capacity(sessions.len()),
        };

        for mut session in sessions {
            if let Err(e) = session.start() {
                warn!(service = session.name(), error = %e, "service session failed to start");
                // Dropping `ctx` stops everything started so far.
                return Err(e);
            }
            debug!(service = session.name(), "service session started");
            ctx.sessions.push(session);
        }

        Ok(ctx)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Names of the running sessions, in start order.
    pub fn session_names(&self) -> Vec<&'static str> {
        self.sessions.iter().map(|s| s.name()).collect()
    }
}

impl<P> Drop for ServiceContext<P> {
    fn drop(&mut self) {
        for session in self.sessions.iter_mut().rev() {
            session.stop();
            debug!(service = session.name(), "service session stopped");
        }
    }
}
