use std::collections::HashMap;

use crate::{Dataset, Despesa, Operadora};

const CONTA_EVENTOS: &str = "411";
const DESCRICAO_EVENTOS: &str = "EVENTOS/ SINISTROS CONHECIDOS OU AVISADOS";

fn operadora(registro_ans: &str, cnpj: &str, razao_social: &str, modalidade: &str, uf: &str) -> Operadora {
    Operadora {
        registro_ans: registro_ans.to_string(),
        cnpj: cnpj.to_string(),
        razao_social: razao_social.to_string(),
        modalidade: Some(modalidade.to_string()),
        uf: Some(uf.to_string()),
    }
}

/// Quarter outside 1..=4 is clamped to the nearest valid one.
pub(crate) fn despesa(ano: i32, trimestre: u8, valor_despesa: f64) -> Despesa {
    let mes = match trimestre {
        0 | 1 => 1,
        2 => 4,
        3 => 7,
        _ => 10,
    };
    Despesa {
        data_evento: format!("{ano:04}-{mes:02}-01"),
        ano,
        trimestre,
        cd_conta_contabil: CONTA_EVENTOS.to_string(),
        descricao: Some(DESCRICAO_EVENTOS.to_string()),
        valor_despesa,
    }
}

/// Twelve operadoras across five UFs, seven of them with reported expenses.
pub fn sample() -> Dataset {
    let operadoras = vec![
        operadora("326305", "02812468000106", "UNIMED SEGUROS SAÚDE S/A", "Seguradora Especializada em Saúde", "SP"),
        operadora("368253", "63554067000198", "HAPVIDA ASSISTÊNCIA MÉDICA S.A.", "Medicina de Grupo", "CE"),
        operadora("005711", "92693118000160", "BRADESCO SAÚDE S.A.", "Seguradora Especializada em Saúde", "RJ"),
        operadora("359017", "29309127000179", "AMIL ASSISTÊNCIA MÉDICA INTERNACIONAL S.A.", "Medicina de Grupo", "SP"),
        operadora("339679", "44649812000138", "SUL AMÉRICA COMPANHIA DE SEGURO SAÚDE", "Seguradora Especializada em Saúde", "RJ"),
        operadora("343889", "01685053000156", "UNIMED BELO HORIZONTE COOPERATIVA DE TRABALHO MÉDICO", "Cooperativa Médica", "MG"),
        operadora("352501", "02284175000100", "SAÚDE & VIDA ASSISTÊNCIA LTDA", "Medicina de Grupo", "MG"),
        operadora("302147", "91887155000123", "UNIMED PORTO ALEGRE", "Cooperativa Médica", "RS"),
        operadora("417173", "11510405000105", "ODONTOPREV S.A.", "Odontologia de Grupo", "SP"),
        operadora("418439", "07473735000154", "CENTRO CLÍNICO GAÚCHO LTDA", "Medicina de Grupo", "RS"),
        operadora("312924", "33719485000127", "CAIXA DE ASSISTÊNCIA DOS FUNCIONÁRIOS DO BANCO DO BRASIL", "Autogestão", "RJ"),
        operadora("346659", "27452545000195", "GEAP AUTOGESTÃO EM SAÚDE", "Autogestão", "DF"),
    ];

    let mut despesas = HashMap::new();
    despesas.insert(
        "02812468000106".to_string(),
        vec![despesa(2025, 1, 1_250_000.0), despesa(2025, 2, 1_410_000.0), despesa(2025, 3, 1_320_000.0)],
    );
    despesas.insert(
        "63554067000198".to_string(),
        vec![despesa(2025, 1, 2_980_000.0), despesa(2025, 2, 3_105_000.0)],
    );
    despesas.insert(
        "92693118000160".to_string(),
        vec![despesa(2025, 1, 4_200_000.0), despesa(2025, 2, 4_050_000.0), despesa(2025, 3, 4_390_000.0)],
    );
    despesas.insert(
        "29309127000179".to_string(),
        vec![despesa(2025, 1, 3_600_000.0), despesa(2025, 2, 3_720_000.0)],
    );
    despesas.insert("01685053000156".to_string(), vec![despesa(2025, 1, 980_000.0)]);
    despesas.insert(
        "02284175000100".to_string(),
        vec![despesa(2025, 1, 120_000.0), despesa(2025, 2, 135_500.0)],
    );
    despesas.insert(
        "27452545000195".to_string(),
        vec![despesa(2025, 1, 870_000.0), despesa(2025, 2, 910_000.0)],
    );

    Dataset::new(operadoras, despesas)
}
