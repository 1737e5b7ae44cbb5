//! Request authentication and role checks used by the dispatcher.
//!
//! # Modules
//!
//! - [`auth`]: turns the `Authorization` header into an [`auth::AuthenticatedUser`]
//! - [`role`]: exact role match between the caller and the route
//!
//! # Flow
//!
//! 1. The route table marks the path as protected with a required role
//! 2. [`auth::authenticate_request`] verifies the bearer token
//! 3. [`role::require_role`] compares the token's role with the route's
//! 4. The request is forwarded with the verified identity in its extensions

pub mod auth;
pub mod role;
