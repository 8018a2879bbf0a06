use crate::flight::FlightStatus;

/// Body for the staff flight status patch endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FlightStatusReqArgs {
    pub status: FlightStatus,
}
