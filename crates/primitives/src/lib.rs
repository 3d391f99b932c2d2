//! Core value types shared across the bridge workspace.

pub mod batch;
pub mod params;
pub mod sig;
pub mod validator;

pub mod prelude;
