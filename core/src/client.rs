//! Stateless HTTP request builder and response parser for the analytics API.
//!
//! # Design
//! `OperadoraClient` holds only the base URL and the request-shaping options
//! from `ClientConfig`, and carries no mutable state between calls. Each
//! endpoint is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. The caller, or
//! `OperadoraService`, executes the HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{ListingQuery, QueryEncoding, QueryString};
use crate::types::{Estatisticas, HealthStatus, OperadoraDespesas, OperadoraPage};

/// Synchronous, stateless client for the operadoras analytics API.
#[derive(Debug, Clone)]
pub struct OperadoraClient {
    base_url: String,
    query_encoding: QueryEncoding,
    user_agent: Option<String>,
}

impl OperadoraClient {
    /// Client with default options against `base_url`. The URL is not
    /// validated; use [`OperadoraClient::with_config`] for that.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            query_encoding: QueryEncoding::default(),
            user_agent: None,
        }
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query_encoding: config.query_encoding,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_operadoras(&self, query: &ListingQuery) -> HttpRequest {
        self.get("/operadoras", Some(&query.to_query_string()))
    }

    /// `cnpj` is used as an opaque path segment.
    pub fn build_get_despesas(&self, cnpj: &str) -> HttpRequest {
        let cnpj = self.query_encoding.encode_segment(cnpj);
        self.get(&format!("/operadoras/{cnpj}/despesas"), None)
    }

    pub fn build_get_estatisticas(&self) -> HttpRequest {
        self.get("/estatisticas", None)
    }

    pub fn build_health(&self) -> HttpRequest {
        self.get("/health", None)
    }

    pub fn parse_list_operadoras(&self, response: HttpResponse) -> Result<OperadoraPage, ApiError> {
        parse_json(response)
    }

    pub fn parse_despesas(&self, response: HttpResponse) -> Result<OperadoraDespesas, ApiError> {
        parse_json(response)
    }

    pub fn parse_estatisticas(&self, response: HttpResponse) -> Result<Estatisticas, ApiError> {
        parse_json(response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        parse_json(response)
    }

    fn get(&self, endpoint: &str, query: Option<&QueryString>) -> HttpRequest {
        let mut path = format!("{}{endpoint}", self.base_url);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            path.push('?');
            path.push_str(&query.encode(self.query_encoding));
        }

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(user_agent) = &self.user_agent {
            headers.push(("user-agent".to_string(), user_agent.clone()));
        }

        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8000/api";

    fn client() -> OperadoraClient {
        OperadoraClient::new(BASE)
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_with_defaults() {
        let req = client().build_list_operadoras(&ListingQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:8000/api/operadoras?page=1&limit=10&filter_type=todas"
        );
        assert_eq!(req.header("accept"), Some("application/json"));
    }

    #[test]
    fn build_list_with_every_parameter() {
        let query = ListingQuery::from_parts(2, "acme", "todas", Some("SP"));
        let req = client().build_list_operadoras(&query);
        assert_eq!(
            req.query(),
            Some("page=2&limit=10&search=acme&filter_type=todas&sort_uf=SP")
        );
    }

    #[test]
    fn build_list_with_empty_strings_sends_only_pagination() {
        let query = ListingQuery::from_parts(1, "", "", None);
        let req = client().build_list_operadoras(&query);
        assert_eq!(req.path, "http://localhost:8000/api/operadoras?page=1&limit=10");
    }

    #[test]
    fn build_get_despesas_has_no_query() {
        let req = client().build_get_despesas("12345678000199");
        assert_eq!(
            req.path,
            "http://localhost:8000/api/operadoras/12345678000199/despesas"
        );
        assert_eq!(req.query(), None);
    }

    #[test]
    fn build_get_despesas_escapes_the_identifier() {
        let req = client().build_get_despesas("12.345.678/0001-99");
        assert_eq!(
            req.path,
            "http://localhost:8000/api/operadoras/12.345.678%2F0001-99/despesas"
        );
    }

    #[test]
    fn verbatim_config_keeps_reserved_but_escapes_spaces() {
        let config = ClientConfig::new().with_query_encoding(QueryEncoding::Verbatim);
        let client = OperadoraClient::with_config(&config).unwrap();
        let req = client.build_list_operadoras(&ListingQuery::new().with_search("são paulo"));
        assert_eq!(
            req.query(),
            Some("page=1&limit=10&search=s%C3%A3o%20paulo&filter_type=todas")
        );
    }

    #[test]
    fn verbatim_config_escapes_spaces_in_identifier() {
        let config = ClientConfig::new().with_query_encoding(QueryEncoding::Verbatim);
        let client = OperadoraClient::with_config(&config).unwrap();
        let req = client.build_get_despesas("02812468000106 ");
        assert_eq!(
            req.path,
            "http://localhost:8000/api/operadoras/02812468000106%20/despesas"
        );
    }

    #[test]
    fn build_get_estatisticas_produces_correct_request() {
        let req = client().build_get_estatisticas();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/estatisticas");
        assert_eq!(req.query(), None);
    }

    #[test]
    fn build_health_produces_correct_request() {
        let req = client().build_health();
        assert_eq!(req.path, "http://localhost:8000/api/health");
    }

    #[test]
    fn user_agent_from_config_is_sent() {
        let config = ClientConfig::new().with_user_agent("painel-ans/1.0");
        let req = OperadoraClient::with_config(&config)
            .unwrap()
            .build_get_estatisticas();
        assert_eq!(req.header("user-agent"), Some("painel-ans/1.0"));
    }

    #[test]
    fn with_config_rejects_invalid_base_url() {
        let config = ClientConfig::new().with_base_url("localhost:8000");
        assert!(matches!(
            OperadoraClient::with_config(&config),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = OperadoraClient::new("http://localhost:8000/api/");
        let req = client.build_get_estatisticas();
        assert_eq!(req.path, "http://localhost:8000/api/estatisticas");
    }

    #[test]
    fn parse_list_operadoras_success() {
        let page = client()
            .parse_list_operadoras(ok(
                r#"{"data":[{"registro_ans":"326305","cnpj":"12345678000199","razao_social":"ACME SAUDE","modalidade":"Medicina de Grupo","uf":"SP"}],"total":1,"page":1,"limit":10}"#,
            ))
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].uf.as_deref(), Some("SP"));
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn parse_despesas_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"detail":"Operadora não encontrada"}"#.to_string(),
        };
        let err = client().parse_despesas(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_estatisticas_server_error_keeps_body() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_estatisticas(response).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_health_success() {
        let health = client()
            .parse_health(ok(
                r#"{"status":"healthy","service":"empresa-x-analytics","version":"1.0.0"}"#,
            ))
            .unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn parse_list_operadoras_bad_json() {
        let err = client().parse_list_operadoras(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
