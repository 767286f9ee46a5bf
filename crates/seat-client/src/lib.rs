//! # seat-client
//!
//! HTTP clients for the services Seatplan talks to:
//! - the floor-plan detector (`POST {base_url}/analyze`)
//! - the public booking API (tenants, availability, holds, reservations,
//!   policies)
//!
//! Both clients share status handling: 429 becomes
//! [`ClientError::RateLimited`] and other non-success codes become
//! [`ClientError::Api`]. Nothing here retries; that is the caller's call.

pub mod booking;
pub mod detector;

mod error;
mod http;

pub use booking::BookingClient;
pub use detector::{DetectorClient, ImagePayload};
pub use error::ClientError;
pub use http::IDEMPOTENCY_KEY;
