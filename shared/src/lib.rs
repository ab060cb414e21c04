//! Shared library for the membership management backend
//!
//! Holds the unified error system used by the HTTP service crate.

pub mod error;
