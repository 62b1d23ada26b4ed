//! Reqkit Shared Library
//!
//! Error type and parameter sources used by the HTTP helpers.

pub mod error;
pub mod params;

pub use error::{Error, Result};
pub use params::{Attribute, Attributes, Bean, ParamBag, ParamSource};
