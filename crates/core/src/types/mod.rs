//! Core types for EliteTips.

pub mod email;
pub mod id;
pub mod tier;

pub use email::{Email, EmailError};
pub use id::PredictionId;
pub use tier::{SubscriptionTier, TierError};
