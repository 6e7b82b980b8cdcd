//! Response DTOs of the analytics API.
//!
//! # Design
//! Field names follow the backend's PostgreSQL columns (`operadoras`,
//! `despesas`, `despesas_agregadas`), which FastAPI serializes unchanged.
//! The mock-server crate defines its own copies; integration tests catch
//! schema drift between the two.

use serde::{Deserialize, Serialize};

/// A health-insurance operator registered with ANS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operadora {
    pub registro_ans: String,
    pub cnpj: String,
    pub razao_social: String,
    #[serde(default)]
    pub modalidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
}

/// One page of the operadoras listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperadoraPage {
    pub data: Vec<Operadora>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl OperadoraPage {
    /// Number of pages needed to show `total` rows at `limit` per page.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

/// A quarterly expense event (accounting group 411).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Despesa {
    /// First day of the quarter, `YYYY-MM-DD`.
    pub data_evento: String,
    pub ano: i32,
    pub trimestre: u8,
    pub cd_conta_contabil: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub valor_despesa: f64,
}

/// Expense totals of one operadora in one UF.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DespesaAgregada {
    pub razao_social: String,
    pub uf: String,
    pub total_despesas: f64,
    pub media_trimestral: f64,
    pub desvio_padrao: f64,
}

/// Detail payload: the operadora plus its expense history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperadoraDespesas {
    pub operadora: Operadora,
    pub despesas: Vec<Despesa>,
    #[serde(default)]
    pub agregado: Option<DespesaAgregada>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DespesaPorUf {
    pub uf: String,
    pub total_despesas: f64,
}

/// Dashboard statistics: overall totals, top 5 operadoras and per-UF sums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Estatisticas {
    pub total_despesas: f64,
    pub media_despesas: f64,
    pub top_operadoras: Vec<DespesaAgregada>,
    pub despesas_por_uf: Vec<DespesaPorUf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}
