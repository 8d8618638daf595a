//! Per-screen state logic.
//!
//! Each module owns one screen's local state (loading, error, edit mode) and
//! talks to exactly one backend resource through the shared classifier. The
//! fetch lifecycle common to all record screens lives here in
//! [`ResourceState`]: identity guard, loading flag, epoch-checked completion,
//! user-triggered retry.

pub mod allergies;
pub mod consent;
pub mod health_form;
pub mod home;
pub mod login;
pub mod prescriptions;
pub mod profile;
pub mod qr_code;
pub mod reports;
pub mod set_password;
pub mod signup;

use crate::net::{ApiError, NetworkResult};

// ═══════════════════════════════════════════════════════════
// Alerts
// ═══════════════════════════════════════════════════════════

/// A user-facing alert: title + message, ready for the platform dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message)
    }

    /// Default presentation of a classified failure.
    pub fn from_api_error(err: &ApiError) -> Self {
        Self::error(err.message.clone())
    }
}

// ═══════════════════════════════════════════════════════════
// Date display helpers
// ═══════════════════════════════════════════════════════════

/// `1990-05-15T00:00:00.000+00:00` (or bare `1990-05-15`) → `05/15/1990`.
/// An unparsable value passes through so the user still sees something.
pub(crate) fn date_to_display(wire: &str) -> String {
    let date_part = wire.split('T').next().unwrap_or(wire);
    match chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%Y").to_string(),
        Err(_) => wire.to_string(),
    }
}

/// `05/15/1990` → `1990-05-15`, the storage form every service expects.
/// An unparsable value passes through unchanged.
pub(crate) fn date_to_wire(display: &str) -> String {
    match chrono::NaiveDate::parse_from_str(display.trim(), "%m/%d/%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => display.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════
// ResourceState: shared fetch lifecycle
// ═══════════════════════════════════════════════════════════

/// Where a screen's resource currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// Nothing attempted yet.
    Idle,
    /// No `patient_id` in the session, so the fetch was skipped entirely.
    /// Distinct from a network error: nothing was requested.
    MissingIdentity,
    Loading,
    Ready(T),
    Failed(ApiError),
}

/// Token tying a fetch completion to the activation that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

/// Fetch lifecycle shared by every record screen.
///
/// Each `begin()` bumps an epoch; a completion whose ticket is stale is
/// discarded, so a response arriving after the user re-activated (or left)
/// the screen cannot clobber newer state.
#[derive(Debug)]
pub struct ResourceState<T> {
    phase: Phase<T>,
    epoch: u64,
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    /// Start a fetch for the current activation.
    pub fn begin(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.phase = Phase::Loading;
        FetchTicket { epoch: self.epoch }
    }

    /// Record that the identity guard skipped the fetch.
    pub fn missing_identity(&mut self) {
        self.epoch += 1;
        self.phase = Phase::MissingIdentity;
    }

    /// Apply a fetch outcome. Returns `false` (and changes nothing) when the
    /// ticket is stale.
    pub fn complete(&mut self, ticket: FetchTicket, result: NetworkResult<T>) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                ticket = ticket.epoch,
                current = self.epoch,
                "discarding stale fetch completion"
            );
            return false;
        }
        self.phase = match result {
            Ok(data) => Phase::Ready(data),
            Err(err) => Phase::Failed(err),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.phase {
            Phase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.phase {
            Phase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// A retry affordance is shown only after a failed fetch.
    pub fn can_retry(&self) -> bool {
        matches!(self.phase, Phase::Failed(_))
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::ErrorCategory;

    #[test]
    fn fresh_state_is_idle() {
        let state: ResourceState<Vec<u8>> = ResourceState::new();
        assert_eq!(*state.phase(), Phase::Idle);
        assert!(!state.is_loading());
        assert!(!state.can_retry());
        assert!(state.data().is_none());
    }

    #[test]
    fn begin_then_complete_reaches_ready() {
        let mut state = ResourceState::new();
        let ticket = state.begin();
        assert!(state.is_loading());

        assert!(state.complete(ticket, Ok(vec![1, 2, 3])));
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));
        assert!(!state.can_retry());
    }

    #[test]
    fn failure_enables_retry() {
        let mut state: ResourceState<()> = ResourceState::new();
        let ticket = state.begin();
        state.complete(
            ticket,
            Err(ApiError::new(ErrorCategory::ServerError, "Server error")),
        );
        assert!(state.can_retry());
        assert_eq!(state.error().unwrap().category, ErrorCategory::ServerError);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = ResourceState::new();
        let stale = state.begin();
        // User re-activated the screen: a second fetch starts.
        let fresh = state.begin();

        assert!(!state.complete(stale, Ok(vec!["old"])));
        assert!(state.is_loading());

        assert!(state.complete(fresh, Ok(vec!["new"])));
        assert_eq!(state.data(), Some(&vec!["new"]));
    }

    #[test]
    fn stale_completion_after_success_keeps_newer_data() {
        let mut state = ResourceState::new();
        let stale = state.begin();
        let fresh = state.begin();
        state.complete(fresh, Ok(vec![42]));

        assert!(!state.complete(stale, Err(ApiError::connectivity())));
        assert_eq!(state.data(), Some(&vec![42]));
    }

    #[test]
    fn missing_identity_is_distinct_from_failure() {
        let mut state: ResourceState<Vec<u8>> = ResourceState::new();
        state.missing_identity();
        assert_eq!(*state.phase(), Phase::MissingIdentity);
        assert!(!state.can_retry());
        assert!(state.error().is_none());
    }

    #[test]
    fn missing_identity_invalidates_earlier_ticket() {
        let mut state: ResourceState<Vec<u8>> = ResourceState::new();
        let ticket = state.begin();
        state.missing_identity();
        assert!(!state.complete(ticket, Ok(vec![1])));
        assert_eq!(*state.phase(), Phase::MissingIdentity);
    }

    #[test]
    fn wire_date_formats_for_display() {
        assert_eq!(date_to_display("1990-05-15T00:00:00.000+00:00"), "05/15/1990");
        assert_eq!(date_to_display("1990-05-15"), "05/15/1990");
        assert_eq!(date_to_display("soon"), "soon");
    }

    #[test]
    fn display_date_formats_for_wire() {
        assert_eq!(date_to_wire("05/15/1990"), "1990-05-15");
        assert_eq!(date_to_wire("5/3/1990"), "1990-05-03");
        assert_eq!(date_to_wire("unknown"), "unknown");
    }

    #[test]
    fn date_round_trips_through_display_form() {
        let display = date_to_display("1990-05-15T00:00:00.000+00:00");
        assert_eq!(date_to_wire(&display), "1990-05-15");
    }

    #[test]
    fn alert_constructors() {
        assert_eq!(
            Alert::error("boom"),
            Alert::new("Error", "boom")
        );
        assert_eq!(
            Alert::success("saved"),
            Alert::new("Success", "saved")
        );
        let alert = Alert::from_api_error(&ApiError::connectivity());
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Cannot connect to server");
    }
}
