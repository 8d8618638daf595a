//! Application constants and backend service endpoints.
//!
//! Each record type lives in its own microservice on a distinct port, so the
//! client carries one base URL per service instead of a single API root.

/// Application-level constants
pub const APP_NAME: &str = "Medicentric";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,medicentric=debug"
}

/// Base URLs for the platform's backend services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// Auth + profile (`/patients`, `/patients/login`).
    pub patient: String,
    /// Allergy records (`/patients/{id}/allergies`).
    pub allergy: String,
    /// Lab reports (`/patients/{id}/lab-reports`).
    pub lab: String,
    /// Prescriptions (`/patients/{id}/prescriptions`).
    pub prescription: String,
    /// Risk prediction (`/api/predict`).
    pub medbot: String,
    /// ML intake records (`/health/record`).
    pub mldata: String,
}

impl ServiceEndpoints {
    /// All services on one host, on their standard ports.
    pub fn new(host: &str) -> Self {
        Self {
            patient: format!("http://{host}:8080"),
            allergy: format!("http://{host}:8082"),
            lab: format!("http://{host}:8083"),
            prescription: format!("http://{host}:8084"),
            medbot: format!("http://{host}:8088"),
            mldata: format!("http://{host}:8089"),
        }
    }

    /// Default deployment on localhost.
    pub fn default_local() -> Self {
        Self::new("localhost")
    }

    /// Resolve endpoints from the environment.
    ///
    /// `MEDICENTRIC_HOST` moves every service to another host;
    /// `MEDICENTRIC_{PATIENT,ALLERGY,LAB,PRESCRIPTION,MEDBOT,MLDATA}_URL`
    /// override individual services outright.
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    fn resolve(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut endpoints = match get("MEDICENTRIC_HOST") {
            Some(host) => Self::new(&host),
            None => Self::default_local(),
        };
        let overrides = [
            ("MEDICENTRIC_PATIENT_URL", &mut endpoints.patient),
            ("MEDICENTRIC_ALLERGY_URL", &mut endpoints.allergy),
            ("MEDICENTRIC_LAB_URL", &mut endpoints.lab),
            ("MEDICENTRIC_PRESCRIPTION_URL", &mut endpoints.prescription),
            ("MEDICENTRIC_MEDBOT_URL", &mut endpoints.medbot),
            ("MEDICENTRIC_MLDATA_URL", &mut endpoints.mldata),
        ];
        for (name, slot) in overrides {
            if let Some(url) = get(name) {
                *slot = url.trim_end_matches('/').to_string();
            }
        }
        endpoints
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::default_local()
    }
}
