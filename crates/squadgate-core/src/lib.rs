//! # SquadGate Core
//!
//! Foundational types shared by the gateway, the authentication service and
//! the CLI:
//!
//! - [`errors`]: HTTP-facing application error with JSON response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use squadgate_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("hunter2")?;
//! if !verify_password("hunter2", &hash)? {
//!     return Err(AppError::unauthorized("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
