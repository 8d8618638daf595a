use serde::{Deserialize, Serialize};

/// A patient record as the patient service returns it.
///
/// `password` never round-trips: the service omits it on reads and the
/// client only sends it inside the registration body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub patient_id: String,
    pub full_name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub address: Option<String>,
    pub patient_nic: Option<String>,
}
