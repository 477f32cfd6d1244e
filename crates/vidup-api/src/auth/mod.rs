pub mod jwks;
pub mod middleware;
pub mod models;

pub use jwks::JwksIdentityProvider;
pub use middleware::{identity_middleware, IdentityProvider, IdentityState};
pub use models::{CallerIdentity, SessionClaims};
