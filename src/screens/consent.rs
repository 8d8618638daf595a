//! Consent screen. Purely local: the user either agrees (on to the home
//! hub) or cancels back to the password step.

use super::Alert;
use crate::session::{NavigationRequest, ScreenId};

#[derive(Debug, Default)]
pub struct ConsentScreen {
    pub accepted: bool,
    alert: Option<Alert>,
}

impl ConsentScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Agreement requires the checkbox to be ticked.
    pub fn agree(&mut self) -> Option<NavigationRequest> {
        if !self.accepted {
            self.alert = Some(Alert::error(
                "Please confirm you have read and understood the consent terms",
            ));
            return None;
        }
        self.alert = None;
        Some(NavigationRequest::to(ScreenId::Home))
    }

    pub fn cancel(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::SetPassword)
    }
}
