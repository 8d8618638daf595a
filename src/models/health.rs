use serde::{Deserialize, Serialize};

/// ML intake record: the feature vector the prediction model consumes.
/// Unset fields stay off the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thalach: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldpeak: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trestbps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restecg: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cp: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Risk prediction returned by the medbot service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prediction {
    /// Binary outcome: 1 = high risk, 0 = low risk.
    pub risk: u8,
    /// Model confidence in `risk`, 0..1.
    pub probability: f64,
    pub explanation: Option<String>,
}

impl Prediction {
    pub fn is_high_risk(&self) -> bool {
        self.risk == 1
    }

    /// Confidence as a percentage with one decimal, e.g. `93.5`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", self.probability * 100.0)
    }

    pub fn explanation_text(&self) -> &str {
        self.explanation
            .as_deref()
            .unwrap_or("No explanation provided.")
    }
}
