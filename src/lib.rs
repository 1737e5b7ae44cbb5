//! # SquadGate
//!
//! An authenticating API gateway for a team-management platform. A client
//! logs in once at the authentication service, receives a signed session
//! token, and presents it as `Authorization: Bearer <token>` on later calls.
//! The gateway verifies the token, checks the caller's role against the
//! route, and forwards the request to the owning backend service.
//!
//! ## Routes
//!
//! | Prefix    | Auth | Role   | Upstream                       |
//! |-----------|------|--------|--------------------------------|
//! | `/reg`    | no   | none   | Registration service           |
//! | `/auth`   | no   | none   | Authentication service         |
//! | `/coach`  | yes  | coach  | Coach service                  |
//! | `/player` | yes  | player | Player service                 |
//! | `/admin`  | yes  | admin  | Coach service                  |
//!
//! Anything else is a 404. The gateway also answers `GET /health` and, with
//! observability enabled, `GET /metrics`.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── squadgate-core/     # AppError, password hashing
//! ├── squadgate-config/   # environment configuration
//! ├── squadgate-auth/     # claims, TokenService, AuthUser extractor, IdentityStore
//! └── squadgate-cli/      # operator CLI
//! src/
//! ├── middleware/         # authenticate + role check used by the dispatcher
//! ├── modules/auth/       # POST /login for the authentication service
//! ├── proxy/              # dispatcher, header filtering, upstream forwarding
//! ├── routes.rs           # route table
//! ├── router.rs           # gateway and auth service routers
//! └── bin/auth.rs         # authentication service binary
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! JWT_TOKEN_EXPIRY=86400
//! REGISTRATION_SERVICE_URL=http://localhost:5001
//! AUTH_SERVICE_URL=http://localhost:5002
//! COACH_SERVICE_URL=http://localhost:5003
//! PLAYER_SERVICE_URL=http://localhost:5004
//! ```
//!
//! ## Security Considerations
//!
//! - The signing secret and presented tokens never appear in logs or responses
//! - Expired and forged tokens receive the same 403 answer
//! - Roles are not hierarchical; an admin token does not open `/coach`
//! - The `Authorization` header is forwarded so upstreams can re-verify

pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod proxy;
pub mod router;
pub mod routes;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use squadgate_auth;
pub use squadgate_config;
pub use squadgate_core;
