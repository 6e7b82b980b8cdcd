//! Synchronous API client core for the ANS operadoras analytics service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A [`Transport`] executes the
//! round-trip; [`OperadoraService`] ties the two together.
//!
//! # Design
//! - `OperadoraClient` is stateless; it holds only the base URL and the
//!   request-shaping options from [`ClientConfig`].
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - The listing query is assembled by [`ListingQuery`] in a fixed
//!   parameter order, percent-encoded unless `QueryEncoding::Verbatim` is
//!   configured.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod service;
pub mod transport;
pub mod types;

pub use client::OperadoraClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{ListingQuery, QueryEncoding, QueryString, DEFAULT_FILTER_TYPE, PAGE_SIZE};
pub use service::OperadoraService;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    Despesa, DespesaAgregada, DespesaPorUf, Estatisticas, HealthStatus, Operadora,
    OperadoraDespesas, OperadoraPage,
};
