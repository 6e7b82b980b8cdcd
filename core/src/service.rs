//! Client and transport bundled into one call per endpoint.
//!
//! The raw operations (`list_operadoras`, `get_despesas`, `get_estatisticas`,
//! `health`) hand back the response envelope exactly as the transport
//! produced it, whatever its status. The `fetch_*` variants run the matching
//! `parse_*` on top. Nothing is retried or cached.

use tracing::debug;

use crate::client::OperadoraClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::ListingQuery;
use crate::transport::Transport;
use crate::types::{Estatisticas, HealthStatus, OperadoraDespesas, OperadoraPage};

#[derive(Debug, Clone)]
pub struct OperadoraService<T> {
    client: OperadoraClient,
    transport: T,
}

impl<T: Transport> OperadoraService<T> {
    pub fn new(client: OperadoraClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &OperadoraClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_operadoras(&self, query: &ListingQuery) -> Result<HttpResponse, ApiError> {
        self.send(self.client.build_list_operadoras(query))
    }

    pub fn get_despesas(&self, cnpj: &str) -> Result<HttpResponse, ApiError> {
        self.send(self.client.build_get_despesas(cnpj))
    }

    pub fn get_estatisticas(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.client.build_get_estatisticas())
    }

    pub fn health(&self) -> Result<HttpResponse, ApiError> {
        self.send(self.client.build_health())
    }

    pub fn fetch_operadoras(&self, query: &ListingQuery) -> Result<OperadoraPage, ApiError> {
        let response = self.list_operadoras(query)?;
        self.client.parse_list_operadoras(response)
    }

    pub fn fetch_despesas(&self, cnpj: &str) -> Result<OperadoraDespesas, ApiError> {
        let response = self.get_despesas(cnpj)?;
        self.client.parse_despesas(response)
    }

    pub fn fetch_estatisticas(&self) -> Result<Estatisticas, ApiError> {
        let response = self.get_estatisticas()?;
        self.client.parse_estatisticas(response)
    }

    pub fn fetch_health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.health()?;
        self.client.parse_health(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, url = %request.path, "request finished");
        Ok(response)
    }
}

#[cfg(feature = "ureq")]
impl OperadoraService<crate::transport::UreqTransport> {
    /// Service with a `ureq` transport, both built from `config`.
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ApiError> {
        let client = OperadoraClient::with_config(config)?;
        Ok(Self::new(client, crate::transport::UreqTransport::new(config)))
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_config(&crate::config::ClientConfig::from_env()?)
    }
}
