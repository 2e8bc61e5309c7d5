//! nsprobe Application Layer
//!
//! Authoritative name server discovery on top of the ports implemented by
//! the infrastructure crate.
pub mod ports;
pub mod services;
pub mod use_cases;
