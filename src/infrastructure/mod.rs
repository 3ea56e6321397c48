//! Infrastructure layer - concrete implementations of application ports

pub mod openapi;

pub use openapi::*;
