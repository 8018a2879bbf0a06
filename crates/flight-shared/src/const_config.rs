//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Address the client talks to when none is supplied
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8000";

    /// Minimum length accepted for a new account's password
    pub const CLIENT_MIN_PASSWORD_LENGTH: usize = 8;

    /// Upper bound on seats in a single booking, one passenger form is shown
    /// per seat
    pub const CLIENT_MAX_SEATS_PER_BOOKING: u32 = 9;

    pub mod storage {
        /// Key the access token is persisted under
        pub const STORAGE_ACCESS_TOKEN_KEY: &str = "access_token";
        /// Key the refresh token is persisted under
        pub const STORAGE_REFRESH_TOKEN_KEY: &str = "refresh_token";
    }
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/login/");
    pub const PATH_REGISTER: PathSpec = PathSpec::post("/api/register/");
    pub const PATH_USER_PROFILE: PathSpec = PathSpec::get("/api/users/profile/");

    pub const PATH_FLIGHTS: PathSpec = PathSpec::get("/api/flights/");
    pub const PATH_FLIGHT_CREATE: PathSpec = PathSpec::post("/api/flights/");
    pub const PATH_FLIGHT: PathSpec = PathSpec::get("/api/flights/");
    pub const PATH_FLIGHT_UPDATE: PathSpec = PathSpec::put("/api/flights/");
    pub const PATH_FLIGHT_DELETE: PathSpec = PathSpec::delete("/api/flights/");

    pub const PATH_BOOKINGS: PathSpec = PathSpec::get("/api/bookings/");
    pub const PATH_BOOKING_CREATE: PathSpec = PathSpec::post("/api/bookings/");
    pub const PATH_BOOKING: PathSpec = PathSpec::get("/api/bookings/");
    pub const PATH_BOOKING_UPDATE: PathSpec = PathSpec::patch("/api/bookings/");
    pub const PATH_BOOKING_DELETE: PathSpec = PathSpec::delete("/api/bookings/");

    pub const PATH_PAYMENTS: PathSpec = PathSpec::get("/api/payments/");
    pub const PATH_PAYMENT_CREATE: PathSpec = PathSpec::post("/api/payments/");
    pub const PATH_PAYMENT_UPDATE: PathSpec = PathSpec::put("/api/payments/");
    pub const PATH_PAYMENT_DELETE: PathSpec = PathSpec::delete("/api/payments/");

    pub const PATH_AIRLINES: PathSpec = PathSpec::get("/api/airlines/");
    pub const PATH_AIRLINE_CREATE: PathSpec = PathSpec::post("/api/airlines/");
    pub const PATH_AIRLINE_UPDATE: PathSpec = PathSpec::put("/api/airlines/");
    pub const PATH_AIRLINE_DELETE: PathSpec = PathSpec::delete("/api/airlines/");

    pub const PATH_AIRPORTS: PathSpec = PathSpec::get("/api/airports/");
    pub const PATH_AIRPORT_CREATE: PathSpec = PathSpec::post("/api/airports/");
    pub const PATH_AIRPORT_UPDATE: PathSpec = PathSpec::put("/api/airports/");
    pub const PATH_AIRPORT_DELETE: PathSpec = PathSpec::delete("/api/airports/");

    pub const PATH_AIRCRAFTS: PathSpec = PathSpec::get("/api/aircrafts/");
    pub const PATH_AIRCRAFT_CREATE: PathSpec = PathSpec::post("/api/aircrafts/");
    pub const PATH_AIRCRAFT_UPDATE: PathSpec = PathSpec::put("/api/aircrafts/");
    pub const PATH_AIRCRAFT_DELETE: PathSpec = PathSpec::delete("/api/aircrafts/");

    pub const PATH_STAFF_FLIGHTS: PathSpec = PathSpec::get("/api/staff/flights/");
    pub const PATH_STAFF_FLIGHT_STATUS: PathSpec = PathSpec::patch("/api/staff/flights/");
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::client::{CLIENT_MAX_SEATS_PER_BOOKING, CLIENT_MIN_PASSWORD_LENGTH};

    // A booking always covers at least one seat and the passenger grid stays
    // usable on small screens
    const_assert!(CLIENT_MAX_SEATS_PER_BOOKING >= 1);
    const_assert!(CLIENT_MAX_SEATS_PER_BOOKING <= 20);
    const_assert!(CLIENT_MIN_PASSWORD_LENGTH >= 8);

    #[test]
    fn collection_paths_end_with_slash() {
        use super::path::*;
        for spec in [
            PATH_LOGIN,
            PATH_REGISTER,
            PATH_USER_PROFILE,
            PATH_FLIGHTS,
            PATH_BOOKINGS,
            PATH_PAYMENTS,
            PATH_AIRLINES,
            PATH_AIRPORTS,
            PATH_AIRCRAFTS,
            PATH_STAFF_FLIGHTS,
        ] {
            assert!(
                spec.path.ends_with('/'),
                "backend paths end with a trailing slash: {}",
                spec.path
            );
        }
    }

    #[test]
    fn instance_path_appends_id() {
        use super::path::PATH_FLIGHT;
        assert_eq!(PATH_FLIGHT.instance_path(7.into()), "/api/flights/7/");
    }
}
