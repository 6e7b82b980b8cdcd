//! In-memory stand-in for the ANS analytics backend.
//!
//! Serves the same routes under `/api` as the FastAPI service, from a
//! fixture [`Dataset`] that is read-only for the lifetime of the router.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub mod fixtures;

pub const SERVICE_NAME: &str = "empresa-x-analytics";
pub const SERVICE_VERSION: &str = "1.0.0";

/// How many operadoras `/estatisticas` ranks.
pub const TOP_OPERADORAS: usize = 5;

const FILTER_ALL: &str = "todas";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operadora {
    pub registro_ans: String,
    pub cnpj: String,
    pub razao_social: String,
    pub modalidade: Option<String>,
    pub uf: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Despesa {
    pub data_evento: String,
    pub ano: i32,
    pub trimestre: u8,
    pub cd_conta_contabil: String,
    pub descricao: Option<String>,
    pub valor_despesa: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DespesaAgregada {
    pub razao_social: String,
    pub uf: String,
    pub total_despesas: f64,
    pub media_trimestral: f64,
    pub desvio_padrao: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperadoraPage {
    pub data: Vec<Operadora>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperadoraDespesas {
    pub operadora: Operadora,
    pub despesas: Vec<Despesa>,
    pub agregado: Option<DespesaAgregada>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DespesaPorUf {
    pub uf: String,
    pub total_despesas: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estatisticas {
    pub total_despesas: f64,
    pub media_despesas: f64,
    pub top_operadoras: Vec<DespesaAgregada>,
    pub despesas_por_uf: Vec<DespesaPorUf>,
}

/// Query of `GET /api/operadoras`. `page` and `limit` are required.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub filter_type: Option<String>,
    pub sort_uf: Option<String>,
}

impl ListParams {
    fn matches(&self, op: &Operadora) -> bool {
        if let Some(search) = non_empty(&self.search) {
            let needle = search.to_lowercase();
            let hit = op.razao_social.to_lowercase().contains(&needle)
                || op.cnpj.starts_with(search)
                || op.registro_ans.starts_with(search);
            if !hit {
                return false;
            }
        }
        if let Some(filter) = non_empty(&self.filter_type) {
            if !filter.eq_ignore_ascii_case(FILTER_ALL) {
                let filter = filter.to_lowercase();
                let hit = op
                    .modalidade
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&filter));
                if !hit {
                    return false;
                }
            }
        }
        if let Some(uf) = non_empty(&self.sort_uf) {
            if !op.uf.as_deref().is_some_and(|u| u.eq_ignore_ascii_case(uf)) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Operadoras, their expense events keyed by CNPJ, and per-operadora
/// aggregates derived from those events.
#[derive(Debug, Default)]
pub struct Dataset {
    pub operadoras: Vec<Operadora>,
    pub despesas: HashMap<String, Vec<Despesa>>,
    /// Sorted by `total_despesas`, largest first.
    pub agregados: Vec<DespesaAgregada>,
    agregados_por_cnpj: HashMap<String, DespesaAgregada>,
}

impl Dataset {
    pub fn new(operadoras: Vec<Operadora>, despesas: HashMap<String, Vec<Despesa>>) -> Self {
        let agregados_por_cnpj: HashMap<String, DespesaAgregada> = operadoras
            .iter()
            .filter_map(|op| {
                let valores: Vec<f64> = despesas
                    .get(&op.cnpj)?
                    .iter()
                    .map(|d| d.valor_despesa)
                    .collect();
                aggregate(op, &valores).map(|agregado| (op.cnpj.clone(), agregado))
            })
            .collect();
        let mut agregados: Vec<DespesaAgregada> = agregados_por_cnpj.values().cloned().collect();
        agregados.sort_by(|a, b| b.total_despesas.total_cmp(&a.total_despesas));
        Self {
            operadoras,
            despesas,
            agregados,
            agregados_por_cnpj,
        }
    }

    pub fn estatisticas(&self) -> Estatisticas {
        let total_despesas: f64 = self.agregados.iter().map(|a| a.total_despesas).sum();
        let media_despesas = if self.agregados.is_empty() {
            0.0
        } else {
            total_despesas / self.agregados.len() as f64
        };

        let mut por_uf: BTreeMap<&str, f64> = BTreeMap::new();
        for agregado in &self.agregados {
            *por_uf.entry(agregado.uf.as_str()).or_default() += agregado.total_despesas;
        }
        let mut despesas_por_uf: Vec<DespesaPorUf> = por_uf
            .into_iter()
            .map(|(uf, total_despesas)| DespesaPorUf {
                uf: uf.to_string(),
                total_despesas,
            })
            .collect();
        despesas_por_uf.sort_by(|a, b| b.total_despesas.total_cmp(&a.total_despesas));

        Estatisticas {
            total_despesas,
            media_despesas,
            top_operadoras: self.agregados.iter().take(TOP_OPERADORAS).cloned().collect(),
            despesas_por_uf,
        }
    }

    fn agregado_of(&self, cnpj: &str) -> Option<DespesaAgregada> {
        self.agregados_por_cnpj.get(cnpj).cloned()
    }
}

/// Sum, mean and sample standard deviation of one operadora's events.
/// A single event has a deviation of zero.
fn aggregate(op: &Operadora, valores: &[f64]) -> Option<DespesaAgregada> {
    if valores.is_empty() {
        return None;
    }
    let n = valores.len() as f64;
    let total: f64 = valores.iter().sum();
    let media = total / n;
    let desvio = if valores.len() < 2 {
        0.0
    } else {
        let var = valores.iter().map(|v| (v - media).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    };
    Some(DespesaAgregada {
        razao_social: op.razao_social.clone(),
        uf: op.uf.clone().unwrap_or_else(|| "N/I".to_string()),
        total_despesas: total,
        media_trimestral: media,
        desvio_padrao: desvio,
    })
}

pub type Db = Arc<Dataset>;

/// Router over the fixture dataset from [`fixtures::sample`].
pub fn app() -> Router {
    app_with(fixtures::sample())
}

pub fn app_with(dataset: Dataset) -> Router {
    let db: Db = Arc::new(dataset);
    let api = Router::new()
        .route("/health", get(health))
        .route("/operadoras", get(list_operadoras))
        .route("/operadoras/{cnpj}/despesas", get(get_despesas))
        .route("/estatisticas", get(estatisticas));
    Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Bem-vindo à API de Analytics da EMPRESA_X",
        "status": "online",
        "docs": "/docs",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
    }))
}

async fn list_operadoras(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<OperadoraPage> {
    debug!(?params, "list operadoras");
    let matching: Vec<&Operadora> = db.operadoras.iter().filter(|op| params.matches(op)).collect();
    let total = matching.len() as u64;
    let limit = params.limit as usize;
    let start = (params.page.saturating_sub(1) as usize).saturating_mul(limit);
    let data = matching
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();
    Json(OperadoraPage {
        data,
        total,
        page: params.page,
        limit: params.limit,
    })
}

async fn get_despesas(
    State(db): State<Db>,
    Path(cnpj): Path<String>,
) -> Result<Json<OperadoraDespesas>, (StatusCode, Json<Value>)> {
    debug!(%cnpj, "get despesas");
    let operadora = db
        .operadoras
        .iter()
        .find(|op| op.cnpj == cnpj)
        .cloned()
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Operadora não encontrada" })),
            )
        })?;
    let despesas = db.despesas.get(&cnpj).cloned().unwrap_or_default();
    let agregado = db.agregado_of(&cnpj);
    Ok(Json(OperadoraDespesas {
        operadora,
        despesas,
        agregado,
    }))
}

async fn estatisticas(State(db): State<Db>) -> Json<Estatisticas> {
    Json(db.estatisticas())
}
