//! Conversion to the nested shape used by older consumers of the
//! extraction API.

use crate::models::{
    EnhancedExtractedData, LegacyExtractedData, LegacyInformacoesFinanceiras,
    LegacyInformacoesGerais, LegacyParcela, LegacySegurado, LegacySeguradora, LegacyVeiculo,
    LegacyVigencia, NOME_NAO_IDENTIFICADO,
};

/// Repackage the flat record into the legacy nested shape.
///
/// `segurado` is present only when a name was identified or a CPF was found;
/// `veiculo` only when at least one vehicle field was extracted. Pure
/// conversion, no recomputation.
pub fn convert_to_legacy_format(data: &EnhancedExtractedData) -> LegacyExtractedData {
    let segurado = if data.nome_segurado != NOME_NAO_IDENTIFICADO || !data.cpf.is_empty() {
        Some(LegacySegurado {
            nome: data.nome_segurado.clone(),
            cpf: if data.cpf.is_empty() {
                None
            } else {
                Some(data.cpf.clone())
            },
        })
    } else {
        None
    };

    let veiculo = if data.veiculo.is_some() || data.placa.is_some() || data.fipe.is_some() {
        Some(LegacyVeiculo {
            descricao: data.veiculo.clone(),
            placa: data.placa.clone(),
            fipe: data.fipe.clone(),
        })
    } else {
        None
    };

    LegacyExtractedData {
        informacoes_gerais: LegacyInformacoesGerais {
            numero_apolice: data.apolice.clone(),
            tipo_cobertura: data.tipo_cobertura.clone(),
        },
        seguradora: LegacySeguradora {
            nome: data.seguradora.clone(),
        },
        informacoes_financeiras: LegacyInformacoesFinanceiras {
            premio_total: data.premio_total,
            valor_mensal: data.valor_mensal,
            parcelas_totais: data.parcelas_totais,
            parcelas: data
                .parcelas
                .iter()
                .map(|p| LegacyParcela {
                    numero: p.numero,
                    data: p.data,
                    valor: p.valor,
                })
                .collect(),
        },
        vigencia: LegacyVigencia {
            inicio: data.vigencia_inicio,
            fim: data.vigencia_fim,
        },
        segurado,
        veiculo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_from_text;

    #[test]
    fn defaulted_record_omits_optional_sections() {
        let data = extract_from_text("");
        let legacy = convert_to_legacy_format(&data);

        assert!(legacy.segurado.is_none());
        assert!(legacy.veiculo.is_none());
        assert_eq!(legacy.seguradora.nome, data.seguradora);
        assert_eq!(legacy.informacoes_financeiras.parcelas_totais, 12);
    }

    #[test]
    fn extracted_sections_carry_through() {
        let text = "PORTO SEGURO COMPANHIA DE SEGUROS\n\
                    Nome do Segurado: Maria Oliveira\n\
                    CPF: 123.456.789-09\n\
                    Veículo: FIAT ARGO 1.0\n\
                    Placa: ABC1D23\n";
        let data = extract_from_text(text);
        let legacy = convert_to_legacy_format(&data);

        let segurado = legacy.segurado.expect("segurado section");
        assert_eq!(segurado.nome, "Maria Oliveira");
        assert_eq!(segurado.cpf.as_deref(), Some("123.456.789-09"));

        let veiculo = legacy.veiculo.expect("veiculo section");
        assert_eq!(veiculo.descricao.as_deref(), Some("FIAT ARGO 1.0"));
        assert_eq!(veiculo.placa.as_deref(), Some("ABC1D23"));
        assert_eq!(legacy.seguradora.nome, "Porto Seguro");
    }
}
