//! Profile screen: view and edit the patient's own record.
//!
//! One button drives the edit cycle: `Update Profile` unlocks the fields,
//! `Save Changes` validates and submits. The date of birth is shown as
//! `MM/DD/YYYY` and stored as `YYYY-MM-DD`.

use serde_json::json;

use super::{date_to_display, date_to_wire, Alert, ResourceState};
use crate::config::ServiceEndpoints;
use crate::models::Patient;
use crate::net::{ApiClient, NetworkResult};
use crate::session::{NavigationRequest, ScreenId};

/// Mutable local copy of the profile fields while the screen is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub contact_info: String,
    /// Display form, `MM/DD/YYYY`.
    pub dob: String,
    pub address: String,
    pub patient_nic: String,
}

impl ProfileForm {
    fn from_patient(patient: &Patient) -> Self {
        Self {
            full_name: if patient.full_name.is_empty() {
                "Patient".to_string()
            } else {
                patient.full_name.clone()
            },
            email: patient.email.clone(),
            contact_info: patient.contact_info.clone().unwrap_or_default(),
            dob: patient
                .dob
                .as_deref()
                .map(date_to_display)
                .unwrap_or_default(),
            address: patient.address.clone().unwrap_or_default(),
            patient_nic: patient.patient_nic.clone().unwrap_or_default(),
        }
    }

    /// Update body in the patient service's wire shape.
    fn update_body(&self) -> serde_json::Value {
        json!({
            "email": self.email.trim(),
            "contactInfo": self.contact_info.trim(),
            "dob": date_to_wire(&self.dob),
            "address": self.address.trim(),
            "patientNic": self.patient_nic.trim(),
        })
    }
}

/// What pressing the single update/save button should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fields are now editable; nothing to submit.
    EnteredEditMode,
    /// Validation passed; the caller should run [`ProfileScreen::save`].
    ReadyToSave,
    /// Validation failed; an alert was set and nothing may be submitted.
    Rejected,
}

pub struct ProfileScreen {
    profile: ResourceState<ProfileForm>,
    pub editing: bool,
    saving: bool,
    alert: Option<Alert>,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self {
            profile: ResourceState::new(),
            editing: false,
            saving: false,
            alert: None,
        }
    }

    pub fn state(&self) -> &ResourceState<ProfileForm> {
        &self.profile
    }

    pub fn form(&self) -> Option<&ProfileForm> {
        self.profile.data()
    }

    pub fn form_mut(&mut self) -> Option<&mut ProfileForm> {
        if self.editing {
            self.profile.data_mut()
        } else {
            None
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Load the profile on activation; skipped without a patient id.
    pub async fn activate(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            tracing::debug!("no patient id, skipping profile fetch");
            self.profile.missing_identity();
            return;
        };

        self.editing = false;
        let ticket = self.profile.begin();
        let result: NetworkResult<Patient> =
            client.get_json(&resource_url(endpoints, id)).await;
        self.profile
            .complete(ticket, result.map(|p| ProfileForm::from_patient(&p)));
    }

    /// The single update/save button.
    pub fn press_update(&mut self) -> UpdateAction {
        if !self.editing {
            self.editing = true;
            return UpdateAction::EnteredEditMode;
        }
        let email_empty = self
            .form()
            .map(|form| form.email.trim().is_empty())
            .unwrap_or(true);
        if email_empty {
            self.alert = Some(Alert::error("Email is a required field."));
            return UpdateAction::Rejected;
        }
        UpdateAction::ReadyToSave
    }

    /// Submit the edited fields. Only valid after `press_update` returned
    /// [`UpdateAction::ReadyToSave`].
    pub async fn save(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: &str,
    ) {
        let Some(body) = self.form().map(ProfileForm::update_body) else {
            return;
        };

        self.alert = None;
        self.saving = true;
        let result: NetworkResult<Patient> = client
            .put_json(&resource_url(endpoints, patient_id), &body)
            .await;
        self.saving = false;
        self.handle_save_result(result);
    }

    fn handle_save_result(&mut self, result: NetworkResult<Patient>) {
        match result {
            Ok(updated) => {
                if let Some(form) = self.profile.data_mut() {
                    *form = ProfileForm::from_patient(&updated);
                }
                self.editing = false;
                self.alert = Some(Alert::success("Profile updated successfully!"));
            }
            Err(err) => {
                self.alert = Some(Alert::from_api_error(&err));
            }
        }
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn resource_url(endpoints: &ServiceEndpoints, patient_id: &str) -> String {
    format!("{}/patients/{}", endpoints.patient, patient_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::Phase;

    fn backend_patient() -> Patient {
        Patient {
            patient_id: "101".into(),
            full_name: "John Doe".into(),
            email: "john@example.com".into(),
            contact_info: Some("+94 77 123 4567".into()),
            dob: Some("1990-05-15T00:00:00.000+00:00".into()),
            address: Some("12 Lake Rd".into()),
            patient_nic: Some("901361234V".into()),
            ..Patient::default()
        }
    }

    fn loaded_screen() -> ProfileScreen {
        let mut screen = ProfileScreen::new();
        let ticket = screen.profile.begin();
        screen
            .profile
            .complete(ticket, Ok(ProfileForm::from_patient(&backend_patient())));
        screen
    }

    #[tokio::test]
    async fn missing_identity_skips_the_fetch() {
        let mut screen = ProfileScreen::new();
        let client = ApiClient::new();
        let endpoints = ServiceEndpoints::default_local();
        screen.activate(&client, &endpoints, None).await;
        assert_eq!(*screen.state().phase(), Phase::MissingIdentity);
    }

    #[test]
    fn form_loads_with_display_date() {
        let screen = loaded_screen();
        let form = screen.form().unwrap();
        assert_eq!(form.full_name, "John Doe");
        assert_eq!(form.dob, "05/15/1990");
    }

    #[test]
    fn empty_name_falls_back_to_placeholder() {
        let form = ProfileForm::from_patient(&Patient::default());
        assert_eq!(form.full_name, "Patient");
    }

    #[test]
    fn fields_are_read_only_until_edit_mode() {
        let mut screen = loaded_screen();
        assert!(screen.form_mut().is_none());

        assert_eq!(screen.press_update(), UpdateAction::EnteredEditMode);
        assert!(screen.form_mut().is_some());
    }

    #[test]
    fn save_requires_a_non_empty_email() {
        let mut screen = loaded_screen();
        screen.press_update();
        screen.form_mut().unwrap().email.clear();

        assert_eq!(screen.press_update(), UpdateAction::Rejected);
        assert_eq!(screen.alert().unwrap().message, "Email is a required field.");
    }

    #[test]
    fn valid_edit_is_ready_to_save() {
        let mut screen = loaded_screen();
        screen.press_update();
        assert_eq!(screen.press_update(), UpdateAction::ReadyToSave);
    }

    #[test]
    fn update_body_reformats_the_date_for_storage() {
        let screen = loaded_screen();
        let body = screen.form().unwrap().update_body();
        assert_eq!(body["dob"], "1990-05-15");
        assert_eq!(body["email"], "john@example.com");
        assert_eq!(body["contactInfo"], "+94 77 123 4567");
        // The name is not part of the update payload.
        assert!(body.get("fullName").is_none());
    }

    #[test]
    fn successful_save_leaves_edit_mode_and_refreshes_fields() {
        let mut screen = loaded_screen();
        screen.press_update();
        screen.form_mut().unwrap().address = "99 Hill St".into();

        let mut updated = backend_patient();
        updated.address = Some("99 Hill St".into());
        screen.handle_save_result(Ok(updated));

        assert!(!screen.editing);
        assert_eq!(screen.form().unwrap().address, "99 Hill St");
        assert_eq!(screen.alert().unwrap().title, "Success");
    }

    #[test]
    fn failed_save_keeps_edit_mode() {
        let mut screen = loaded_screen();
        screen.press_update();
        screen.handle_save_result(Err(crate::net::ApiError::connectivity()));

        assert!(screen.editing);
        assert_eq!(screen.alert().unwrap().message, "Cannot connect to server");
    }

    #[test]
    fn resource_url_targets_patient_service() {
        let endpoints = ServiceEndpoints::default_local();
        assert_eq!(
            resource_url(&endpoints, "101"),
            "http://localhost:8080/patients/101"
        );
    }
}
