//! Set-password screen. Purely local: no backend call is made here, the
//! password itself travels inside the registration body.

use super::Alert;
use crate::session::{NavigationRequest, ScreenId};

#[derive(Debug, Default)]
pub struct SetPasswordScreen {
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    alert: Option<Alert>,
}

impl SetPasswordScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Validate the pair of fields and move on to consent when they hold.
    pub fn submit(&mut self) -> Option<NavigationRequest> {
        if self.password.is_empty() || self.confirm_password.is_empty() {
            self.alert = Some(Alert::error("Please enter both password fields"));
            return None;
        }
        if self.password != self.confirm_password {
            self.alert = Some(Alert::error("Passwords do not match"));
            return None;
        }
        if self.password.chars().count() < 6 {
            self.alert = Some(Alert::error(
                "Password should be at least 6 characters long",
            ));
            return None;
        }

        self.alert = Some(Alert::success("Password created successfully!"));
        Some(NavigationRequest::to(ScreenId::Consent))
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Welcome)
    }
}
