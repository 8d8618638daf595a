//! Medical ID QR payloads.
//!
//! The payload is a small JSON object serialized to a string and handed to
//! the QR codec. When a backend already supplies a payload string (e.g. a
//! prescription's `qrCode` field) it is passed through unchanged; the
//! client validates it as JSON when possible but never rebuilds it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload embedded in a medical ID QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub patient_id: String,
    pub access_key: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Milliseconds since the epoch, as a string (the backend's form).
    pub timestamp: String,
}

impl QrPayload {
    /// Fresh medical ID payload with a generated access key.
    pub fn medical_id(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            access_key: Uuid::new_v4().to_string(),
            kind: "medical_id".to_string(),
            timestamp: chrono::Utc::now().timestamp_millis().to_string(),
        }
    }

    /// The serialized form handed to the QR codec.
    pub fn payload_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Check a backend-supplied payload and hand it back unchanged.
pub fn passthrough(payload: &str) -> &str {
    if serde_json::from_str::<serde_json::Value>(payload).is_err() {
        tracing::warn!("backend QR payload is not valid JSON, passing through anyway");
    }
    payload
}

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR generation failed: {0}")]
    Generation(String),
    #[error("No QR payload available")]
    MissingPayload,
}

/// Render a payload string as an SVG QR code.
pub fn render_svg(payload: &str) -> Result<String, QrError> {
    use qrcode::render::svg;
    use qrcode::QrCode;

    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| QrError::Generation(e.to_string()))?;

    let svg_string = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .max_dimensions(300, 300)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build();

    Ok(svg_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medical_id_payload_round_trips() {
        let payload = QrPayload::medical_id("101");
        assert_eq!(payload.kind, "medical_id");
        assert!(!payload.access_key.is_empty());

        let serialized = payload.payload_string();
        let parsed: QrPayload = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let payload = QrPayload {
            patient_id: "101".into(),
            access_key: "k".into(),
            kind: "medical_id".into(),
            timestamp: "0".into(),
        };
        let json = payload.payload_string();
        assert!(json.contains("\"patientId\":\"101\""));
        assert!(json.contains("\"accessKey\":\"k\""));
        assert!(json.contains("\"type\":\"medical_id\""));
    }

    #[test]
    fn passthrough_never_rewrites_the_payload() {
        let valid = r#"{"patientId":"101","accessKey":"k","type":"medical_id","timestamp":"0"}"#;
        assert_eq!(passthrough(valid), valid);

        let invalid = "not json";
        assert_eq!(passthrough(invalid), invalid);
    }

    #[test]
    fn render_svg_produces_an_svg_document() {
        let svg = render_svg(r#"{"patientId":"101"}"#).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }
}
