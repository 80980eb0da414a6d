//! Shared remote-data access layer for the ClimateWise client.
//!
//! Every domain repository (air quality, gas, heat, health advisor,
//! articles) goes through the same pieces:
//!
//! - [`ApiTransport`]: single-shot HTTP calls with JSON headers and a
//!   canonical `{status, body}` normalization step.
//! - [`Envelope`]: the backend's uniform `{succeed, status, message,
//!   errors, meta, ...}` wrapper and its classification rule.
//! - [`QueryBuilder`]: query-string assembly with the fixed wire
//!   conventions (`'1'/'0'` booleans, `+H` forecast offsets, `W,S,E,N`
//!   bounding boxes, `weights[key]=value` maps).
//! - [`coerce`]: lenient numeric parsing so partially corrupt payloads
//!   still render instead of blanking a whole map layer.

pub mod coerce;
pub mod envelope;
pub mod error;
pub mod query;
pub mod transport;

pub use envelope::{Envelope, Meta, Paginated};
pub use error::ApiFailure;
pub use query::QueryBuilder;
pub use transport::{ApiTransport, TransportOptions};
