//! Signup screen: full patient registration against the patient service.

use regex::Regex;
use serde_json::json;

use super::{date_to_wire, Alert};
use crate::config::ServiceEndpoints;
use crate::models::Patient;
use crate::net::{ApiClient, NetworkResult};
use crate::session::{NavigationRequest, ScreenId};

/// Local state of the signup form. The date of birth is held in display
/// form (`MM/DD/YYYY`) and reformatted on submit.
#[derive(Debug, Default)]
pub struct SignupScreen {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub mobile_number: String,
    pub date_of_birth: String,
    pub gender: String,
    pub blood_type: String,
    pub address: String,
    pub patient_nic: String,
    pub show_password: bool,
    submitting: bool,
    alert: Option<Alert>,
}

impl SignupScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Submit the registration. On success the user is sent to the login
    /// screen to sign in with the new account.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
    ) -> Option<NavigationRequest> {
        if let Some(alert) = self.validate() {
            self.alert = Some(alert);
            return None;
        }

        self.alert = None;
        self.submitting = true;
        let url = format!("{}/patients", endpoints.patient);
        let result = client.post_json(&url, &self.registration_body()).await;
        self.submitting = false;
        self.handle_result(result)
    }

    /// Registration body in the patient service's wire shape.
    fn registration_body(&self) -> serde_json::Value {
        json!({
            "fullName": self.full_name.trim(),
            "gender": self.gender,
            "dob": date_to_wire(&self.date_of_birth),
            "contactInfo": self.mobile_number.trim(),
            "bloodType": self.blood_type,
            "address": self.address.trim(),
            "patientNic": self.patient_nic.trim(),
            "email": self.email.trim(),
            "password": self.password,
        })
    }

    fn validate(&self) -> Option<Alert> {
        let required = [
            &self.full_name,
            &self.email,
            &self.password,
            &self.mobile_number,
            &self.date_of_birth,
            &self.gender,
            &self.blood_type,
            &self.address,
            &self.patient_nic,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Some(Alert::error("Please fill in all fields"));
        }
        if !email_is_valid(self.email.trim()) {
            return Some(Alert::error("Please enter a valid email address"));
        }
        if self.password.chars().count() < 6 {
            return Some(Alert::error(
                "Password must be at least 6 characters long",
            ));
        }
        None
    }

    fn handle_result(&mut self, result: NetworkResult<Patient>) -> Option<NavigationRequest> {
        match result {
            Ok(patient) => {
                tracing::info!(patient_id = %patient.patient_id, "registration succeeded");
                self.alert = Some(Alert::success("Account created successfully!"));
                Some(NavigationRequest::to(ScreenId::Login))
            }
            Err(err) => {
                self.alert = Some(Alert::from_api_error(&err));
                None
            }
        }
    }
}

fn email_is_valid(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .unwrap()
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{classify_response, decode, RawResponse};

    fn filled_screen() -> SignupScreen {
        SignupScreen {
            full_name: "John Doe".into(),
            email: "john@example.com".into(),
            password: "secret1".into(),
            mobile_number: "+94 77 123 4567".into(),
            date_of_birth: "05/15/1990".into(),
            gender: "Male".into(),
            blood_type: "O+".into(),
            address: "12 Lake Rd".into(),
            patient_nic: "901361234V".into(),
            ..SignupScreen::default()
        }
    }

    #[test]
    fn any_missing_field_fails_validation() {
        let mut screen = filled_screen();
        screen.blood_type.clear();
        assert_eq!(
            screen.validate().unwrap().message,
            "Please fill in all fields"
        );
    }

    #[test]
    fn malformed_email_fails_validation() {
        let mut screen = filled_screen();
        screen.email = "not-an-email".into();
        assert_eq!(
            screen.validate().unwrap().message,
            "Please enter a valid email address"
        );

        screen.email = "a b@c.com".into();
        assert!(screen.validate().is_some());
    }

    #[test]
    fn short_password_fails_validation() {
        let mut screen = filled_screen();
        screen.password = "12345".into();
        assert_eq!(
            screen.validate().unwrap().message,
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn complete_form_passes_validation() {
        assert!(filled_screen().validate().is_none());
    }

    #[test]
    fn registration_body_uses_wire_field_names_and_storage_date() {
        let body = filled_screen().registration_body();
        assert_eq!(body["fullName"], "John Doe");
        assert_eq!(body["contactInfo"], "+94 77 123 4567");
        assert_eq!(body["dob"], "1990-05-15");
        assert_eq!(body["patientNic"], "901361234V");
        assert_eq!(body["password"], "secret1");
    }

    #[test]
    fn success_navigates_to_login() {
        let mut screen = filled_screen();
        let result = classify_response(&RawResponse::new(
            200,
            Some("application/json"),
            r#"{"patientId":"55","fullName":"John Doe","email":"john@example.com"}"#,
        ))
        .and_then(decode);
        let request = screen.handle_result(result).unwrap();
        assert_eq!(request.target, ScreenId::Login);
        assert_eq!(screen.alert().unwrap().title, "Success");
    }

    #[test]
    fn server_rejection_surfaces_message_and_stays() {
        let mut screen = filled_screen();
        let result = classify_response(&RawResponse::new(
            400,
            Some("application/json"),
            r#"{"message":"Email already registered"}"#,
        ))
        .and_then(decode);
        assert!(screen.handle_result(result).is_none());
        assert_eq!(screen.alert().unwrap().message, "Email already registered");
    }
}
