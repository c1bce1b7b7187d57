//! Air waybill record transformation.
//!
//! - **normalization**: raw field values to typed, canonical records
//! - **route**: carrier and flight number to route category

pub mod normalization;
pub mod route;

pub use normalization::{NormalizeStats, Normalizer, parse_flight_date, split_tokens};
pub use route::RouteTable;
