//! Connection lifecycle tracking.
//!
//! Observes transport lifecycle events and exposes the send-readiness gate
//! plus the bot's own mention token. Messages are only ever sent while the
//! connection is fully open; anything attempted earlier is dropped, never
//! queued.

/// Lifecycle state of the messaging connection.
///
/// Authentication yields the bot's own identity before the connection is
/// ready for traffic, so the two are tracked as separate states. A dropped
/// connection remembers the last identity: a resumed gateway session
/// re-opens without a fresh authentication event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected { last_id: Option<String> },
    Authenticated { self_id: String },
    Connected { self_id: String },
}

/// Tracks transport lifecycle events.
///
/// All transitions are idempotent no-ops when invoked out of order; in
/// particular, an open-connection event before any authentication never
/// arms the send gate.
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    state: ConnectionState,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected { last_id: None },
        }
    }

    fn take_state(&mut self) -> ConnectionState {
        std::mem::replace(
            &mut self.state,
            ConnectionState::Disconnected { last_id: None },
        )
    }

    /// Authentication completed; record our own identity.
    pub fn on_authenticated(&mut self, self_id: &str) {
        let self_id = self_id.to_lowercase();
        self.state = match self.take_state() {
            // Re-auth after a reconnect may hand us a fresh identity
            ConnectionState::Disconnected { .. } | ConnectionState::Authenticated { .. } => {
                ConnectionState::Authenticated { self_id }
            }
            connected @ ConnectionState::Connected { .. } => connected,
        };
    }

    /// The connection is open for traffic.
    ///
    /// Reached either by the normal authenticate-then-open sequence or by a
    /// session resume, which re-opens a dropped connection under the
    /// identity it last held. Without any identity this is a no-op.
    pub fn on_connection_opened(&mut self) {
        self.state = match self.take_state() {
            ConnectionState::Authenticated { self_id }
            | ConnectionState::Disconnected {
                last_id: Some(self_id),
            } => ConnectionState::Connected { self_id },
            other => other,
        };
    }

    /// The connection dropped; keep the identity for a possible resume.
    pub fn on_disconnected(&mut self) {
        self.state = match self.take_state() {
            ConnectionState::Authenticated { self_id }
            | ConnectionState::Connected { self_id } => ConnectionState::Disconnected {
                last_id: Some(self_id),
            },
            disconnected @ ConnectionState::Disconnected { .. } => disconnected,
        };
    }

    /// Whether outbound sends may occur right now.
    pub fn is_send_ready(&self) -> bool {
        matches!(self.state, ConnectionState::Connected { .. })
    }

    /// Mention token identifying that a message was directed at us.
    ///
    /// `None` until authentication completes or while disconnected; the
    /// interpreter treats that as "nothing is addressed to us".
    pub fn mention_token(&self) -> Option<String> {
        match &self.state {
            ConnectionState::Disconnected { .. } => None,
            ConnectionState::Authenticated { self_id } | ConnectionState::Connected { self_id } => {
                Some(format!("<@{}>", self_id))
            }
        }
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_until_authenticated_then_opened() {
        let mut tracker = ConnectionTracker::new();
        assert!(!tracker.is_send_ready());

        tracker.on_authenticated("U123");
        assert!(!tracker.is_send_ready());

        tracker.on_connection_opened();
        assert!(tracker.is_send_ready());
    }

    #[test]
    fn test_opened_before_authenticated_is_a_no_op() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_connection_opened();
        assert!(!tracker.is_send_ready());
        assert_eq!(tracker.mention_token(), None);

        // The proper order still works afterwards
        tracker.on_authenticated("U123");
        tracker.on_connection_opened();
        assert!(tracker.is_send_ready());
    }

    #[test]
    fn test_mention_token_lowercases_identity() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_authenticated("UABC9");
        assert_eq!(tracker.mention_token().as_deref(), Some("<@uabc9>"));
    }

    #[test]
    fn test_repeated_open_is_idempotent() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_authenticated("U123");
        tracker.on_connection_opened();
        tracker.on_connection_opened();
        assert!(tracker.is_send_ready());
        assert_eq!(tracker.mention_token().as_deref(), Some("<@u123>"));
    }

    #[test]
    fn test_disconnect_closes_the_gate() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_authenticated("U123");
        tracker.on_connection_opened();

        tracker.on_disconnected();
        assert!(!tracker.is_send_ready());
        assert_eq!(tracker.mention_token(), None);
    }

    #[test]
    fn test_resume_reopens_under_retained_identity() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_authenticated("U123");
        tracker.on_connection_opened();
        tracker.on_disconnected();

        // A resumed session re-opens without a fresh authentication event
        tracker.on_connection_opened();
        assert!(tracker.is_send_ready());
        assert_eq!(tracker.mention_token().as_deref(), Some("<@u123>"));
    }

    #[test]
    fn test_resume_before_any_authentication_stays_mute() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_disconnected();
        tracker.on_connection_opened();
        assert!(!tracker.is_send_ready());
        assert_eq!(tracker.mention_token(), None);
    }

    #[test]
    fn test_reauth_while_connected_keeps_gate_armed() {
        let mut tracker = ConnectionTracker::new();
        tracker.on_authenticated("U123");
        tracker.on_connection_opened();

        tracker.on_authenticated("U123");
        assert!(tracker.is_send_ready());
    }
}
