//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! For example `/api/staff/flights/` maps to [`api::staff::FlightStatusReqArgs`].
//! Entity create/update endpoints take the draft types that live next to the
//! entity they create.

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::uac::{Role, Username};

pub mod api;

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct RegisterReqArgs {
    pub username: Username,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    /// Self registration always creates customers, staff and admin accounts
    /// are provisioned on the backend
    pub role: Role,
}

impl RegisterReqArgs {
    pub fn new_customer(
        username: Username,
        password: SecretString,
        first_name: String,
        last_name: String,
        phone_number: String,
    ) -> Self {
        Self {
            username,
            password,
            first_name,
            last_name,
            phone_number,
            role: Role::Customer,
        }
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish()
    }
}
