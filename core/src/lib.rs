//! Async client for the greenery plants REST resource.
//!
//! # Overview
//! Lists plants (optionally filtered by light requirement), fetches one by
//! id, and creates, updates and deletes plants.
//!
//! # Design
//! - `Network` is the transport: it builds `HttpRequest` values and hands
//!   them to an `HttpClient`, returning raw bytes and/or an error.
//! - `NetworkParser` decodes those bytes with a fixed millisecond timestamp
//!   profile and encodes the `{"plant": {name, light_required}}` payload.
//! - `NetworkService` composes the two and is what callers use.
//! - Every component holds only immutable configuration, so a service can be
//!   shared across tasks without locking.
//! - The crate emits `tracing` events at debug level but never installs a
//!   subscriber.

pub mod config;
pub mod error;
pub mod http;
pub mod network;
pub mod parser;
pub mod service;
pub mod timestamp;
pub mod types;

pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, ReqwestClient};
pub use network::{Network, NetworkResponse};
pub use parser::NetworkParser;
pub use service::{filter_params, NetworkService};
pub use timestamp::TimestampFormat;
pub use types::{LightLevel, Plant, PlantPayload, PlantPayloadElement, UnknownLightLevel};
