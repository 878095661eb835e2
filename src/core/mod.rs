//! Core library components.
//!
//! Request decoding, secret resolution, sealed-box encryption and delivery to
//! GitHub, plus the lifecycle dispatch that ties them together.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod deliver;
pub mod domain;
pub mod github;
pub mod lifecycle;
pub mod prepare;
pub mod resolve;
pub mod response;
pub mod store;
pub mod types;
pub mod validation;
