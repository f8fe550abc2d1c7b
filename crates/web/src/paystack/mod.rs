//! Paystack API client.
//!
//! The browser-side popup collects the card and reports a transaction
//! reference; nothing is trusted until this client has verified the charge
//! server-side.

mod client;
mod error;
mod types;

pub use client::PaystackClient;
pub use error::PaystackError;
pub use types::{ChargeCustomer, ChargeVerification};
