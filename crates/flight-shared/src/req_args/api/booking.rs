use crate::booking::BookingStatus;

/// Body for the booking status patch endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdateReqArgs {
    pub status: BookingStatus,
}
