/// Zero-hertz session bookkeeping for frame-rate constraint telemetry.
///
/// A session starts whenever zero-hertz mode goes from disabled to enabled.
/// Telemetry may be reported at most once per session.
///
/// ```text
/// disabled ──enable──▶ enabled (not sent) ──report──▶ enabled (sent)
///    ▲                                                     │
///    └──────────────────────disable───────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CadenceSession {
    zero_hertz_enabled: bool,
    telemetry_sent: bool,
}

impl CadenceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_zero_hertz_enabled(&mut self, enabled: bool) {
        if enabled && !self.zero_hertz_enabled {
            self.telemetry_sent = false;
        }
        self.zero_hertz_enabled = enabled;
    }

    pub fn is_zero_hertz_enabled(&self) -> bool {
        self.zero_hertz_enabled
    }

    pub fn telemetry_sent(&self) -> bool {
        self.telemetry_sent
    }

    /// Claims the single telemetry report of the current session.
    ///
    /// Returns `true` at most once per session, and never while zero-hertz
    /// mode is disabled.
    pub fn try_claim_telemetry(&mut self) -> bool {
        if self.telemetry_sent || !self.zero_hertz_enabled {
            return false;
        }
        self.telemetry_sent = true;
        true
    }
}

/// Whether real playout is running or muted behind a null poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutMode {
    Enabled,
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_session_never_claims() {
        let mut session = CadenceSession::new();
        assert!(!session.try_claim_telemetry());
        assert!(!session.telemetry_sent());
    }

    #[test]
    fn claims_once_per_session() {
        let mut session = CadenceSession::new();
        session.set_zero_hertz_enabled(true);
        assert!(session.try_claim_telemetry());
        assert!(!session.try_claim_telemetry());

        // Re-enabling while already enabled does not start a new session.
        session.set_zero_hertz_enabled(true);
        assert!(!session.try_claim_telemetry());
    }

    #[test]
    fn toggling_starts_new_session() {
        let mut session = CadenceSession::new();
        session.set_zero_hertz_enabled(true);
        assert!(session.try_claim_telemetry());

        session.set_zero_hertz_enabled(false);
        assert!(session.telemetry_sent());
        assert!(!session.try_claim_telemetry());

        session.set_zero_hertz_enabled(true);
        assert!(!session.telemetry_sent());
        assert!(session.try_claim_telemetry());
    }
}
