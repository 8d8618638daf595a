//! Wire records exchanged with the backend services.
//!
//! Field names mirror the services' camelCase JSON. Structs default-fill
//! missing fields so partial payloads (login responses, registration echoes)
//! decode without bespoke DTOs.

pub mod allergy;
pub mod health;
pub mod lab;
pub mod patient;
pub mod prescription;

pub use allergy::Allergy;
pub use health::{HealthRecord, Prediction};
pub use lab::LabReport;
pub use patient::Patient;
pub use prescription::Prescription;
