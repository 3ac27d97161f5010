//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation, plus generation for operators
//!   and tests. Tokens are issued by the festival's identity provider, which
//!   shares the signing secret.

pub mod jwt;
