//! # SquadGate Auth
//!
//! Session token handling shared by the gateway, the authentication service
//! and any upstream service that re-verifies forwarded tokens.
//!
//! - [`claims`]: token payload and the [`Role`] enum
//! - [`identity`]: [`IdentityRecord`] (store side) and [`VerifiedIdentity`] (token side)
//! - [`jwt`]: [`TokenService`] issuing and verifying HS256 tokens
//! - [`extractor`]: bearer parsing, [`authenticate`] and the [`AuthUser`] extractor
//! - [`store`]: the [`IdentityStore`] interface to the store of record

pub mod claims;
pub mod extractor;
pub mod identity;
pub mod jwt;
pub mod store;

pub use claims::{Claims, Role};
pub use extractor::{AuthFailure, AuthUser, authenticate, bearer_token};
pub use identity::{IdentityRecord, VerifiedIdentity};
pub use jwt::{IssuedToken, TokenError, TokenService};
pub use store::{IdentityStore, StaticIdentityStore};
