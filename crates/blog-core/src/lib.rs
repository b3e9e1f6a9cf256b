//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Posts, their validation and sanitization rules, and the ports that
//! infrastructure must implement. No I/O happens in this crate.

pub mod domain;
pub mod error;
pub mod ports;
pub mod sanitize;
pub mod validation;

pub use error::{DomainError, RepoError};
