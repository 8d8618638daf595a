//! Medical ID QR screen.

use super::Alert;
use crate::qr::{self, QrError, QrPayload};
use crate::session::{NavigationRequest, ScreenId};

#[derive(Debug, Default)]
pub struct QrCodeScreen {
    payload: Option<String>,
    alert: Option<Alert>,
}

impl QrCodeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Prepare the payload on activation. A backend-supplied string (e.g. a
    /// prescription's `qrCode`) wins and is passed through unchanged;
    /// otherwise a fresh medical ID payload is built from the session
    /// identity. No identity at all means nothing to encode.
    pub fn activate(&mut self, patient_id: Option<&str>, supplied: Option<&str>) {
        self.alert = None;
        if let Some(supplied) = supplied {
            self.payload = Some(qr::passthrough(supplied).to_string());
            return;
        }
        match patient_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                self.payload = Some(QrPayload::medical_id(id).payload_string());
            }
            None => {
                self.payload = None;
                self.alert = Some(Alert::error("No patient ID available. Please log in."));
            }
        }
    }

    /// Render the prepared payload as an SVG.
    pub fn svg(&self) -> Result<String, QrError> {
        let payload = self.payload.as_deref().ok_or(QrError::MissingPayload)?;
        qr::render_svg(payload)
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }
}
