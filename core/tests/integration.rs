//! Every client operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the service over
//! real HTTP with `UreqTransport`. Validates that request building, query
//! encoding and response parsing agree with what the server expects.
#![cfg(feature = "ureq")]

use std::time::Duration;

use operadoras_core::{
    ApiError, ClientConfig, ListingQuery, OperadoraService, QueryEncoding, UreqTransport,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

fn service(base_url: &str) -> OperadoraService<UreqTransport> {
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(10));
    OperadoraService::from_config(&config).unwrap()
}

#[test]
fn full_walkthrough() {
    let base_url = start_server();
    let svc = service(&base_url);

    // Step 1: health.
    let health = svc.fetch_health().unwrap();
    assert_eq!(health.status, "healthy");

    // Step 2: first page with defaults.
    let page = svc.fetch_operadoras(&ListingQuery::default()).unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.limit, 10);
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total_pages(), 2);

    // Step 3: second page.
    let page = svc
        .fetch_operadoras(&ListingQuery::default().with_page(2))
        .unwrap();
    assert_eq!(page.data.len(), 2);

    // Step 4: search and UF together.
    let query = ListingQuery::from_parts(1, "unimed", "todas", Some("SP"));
    let page = svc.fetch_operadoras(&query).unwrap();
    assert_eq!(page.total, 1);
    let cnpj = page.data[0].cnpj.clone();

    // Step 5: detail of the operadora found above.
    let detail = svc.fetch_despesas(&cnpj).unwrap();
    assert_eq!(detail.operadora.cnpj, cnpj);
    assert_eq!(detail.despesas.len(), 3);
    assert!(detail.agregado.is_some());

    // Step 6: unknown CNPJ.
    let err = svc.fetch_despesas("00000000000000").unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 7: raw envelope of a 404 is returned untouched.
    let raw = svc.get_despesas("00000000000000").unwrap();
    assert_eq!(raw.status, 404);
    assert!(raw.body.contains("Operadora não encontrada"));

    // Step 8: statistics.
    let stats = svc.fetch_estatisticas().unwrap();
    assert_eq!(stats.top_operadoras.len(), 5);
    assert_eq!(stats.despesas_por_uf.len(), 5);
}

#[test]
fn percent_encoded_search_round_trips() {
    let base_url = start_server();
    let svc = service(&base_url);

    let page = svc
        .fetch_operadoras(&ListingQuery::new().with_search("saúde & vida"))
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].razao_social, "SAÚDE & VIDA ASSISTÊNCIA LTDA");
}

#[test]
fn verbatim_search_with_ampersand_is_split_by_the_server() {
    let base_url = start_server();
    let config = ClientConfig::new()
        .with_base_url(&base_url)
        .with_query_encoding(QueryEncoding::Verbatim);
    let svc = OperadoraService::from_config(&config).unwrap();

    // The server reads `search=UNIMED` and a stray `SEGUROS` key.
    let page = svc
        .fetch_operadoras(&ListingQuery::new().with_search("UNIMED&SEGUROS"))
        .unwrap();
    assert_eq!(page.total, 3);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let svc = service(&format!("http://{addr}/api"));
    let err = svc.get_estatisticas().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn verbatim_search_with_spaces_reaches_the_server() {
    let base_url = start_server();
    let config = ClientConfig::new()
        .with_base_url(&base_url)
        .with_query_encoding(QueryEncoding::Verbatim);
    let svc = OperadoraService::from_config(&config).unwrap();

    let page = svc
        .fetch_operadoras(&ListingQuery::new().with_search("unimed belo"))
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].cnpj, "01685053000156");

    // A stray space in the identifier is escaped, not rejected by the transport.
    let err = svc.fetch_despesas("02812468000106 ").unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}
