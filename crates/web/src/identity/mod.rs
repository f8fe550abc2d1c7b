//! Identity provider client.
//!
//! The site never stores credentials itself; email/password authentication
//! is delegated to an external provider's REST API.

mod client;
mod error;

pub use client::{IdentityClient, IdentityUser};
pub use error::IdentityError;
