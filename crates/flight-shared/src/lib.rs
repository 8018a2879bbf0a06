//! Code shared between the clients of the flight booking backend

#![warn(unused_crate_dependencies)]

pub mod aircraft;
pub mod airline;
pub mod airport;
pub mod booking;
pub mod const_config;
pub mod errors;
pub mod flight;
pub mod id;
mod macros;
pub mod payment;
pub mod random;
pub mod req_args;
pub mod token;
pub mod uac;

pub use random::{random_string, random_string_def_len};

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
