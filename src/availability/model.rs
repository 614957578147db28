use serde::Deserialize;

/// Response of the availability query endpoint for one location code
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityReport {
    pub centers: Vec<Center>,
}

/// A vaccination center with its upcoming sessions
#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub name: String,
    pub block_name: String,
    pub pincode: i64,
    pub sessions: Vec<Session>,
}

/// One bookable session at a center
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub date: String,
    pub min_age_limit: i64,
    pub slots: Vec<String>,
    pub vaccine: String,
    pub available_capacity: i64,
    pub available_capacity_dose1: i64,
    pub available_capacity_dose2: i64,
}
