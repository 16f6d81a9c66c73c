/// Unit tests for the extraction pipeline
/// Covers insurer detection, field precedence, installment reconciliation,
/// vigência correction, and the fallback-completeness contract.
use apolice_extractor::extractor::{extract_from_text, extract_from_text_at};
use apolice_extractor::models::{
    FieldSource, COBERTURA_PADRAO, NOME_NAO_IDENTIFICADO, SEGURADORA_NAO_IDENTIFICADA,
};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

const PORTO_POLICY: &str = "\
PORTO SEGURO COMPANHIA DE SEGUROS GERAIS
Apólice nº 531.84.000.123456
Nome do Segurado: João Carlos Pereira
CPF: 123.456.789-09
Início de Vigência: 15/03/2024
Fim de Vigência: 15/03/2025
Prêmio Total: R$ 2.400,00
Em 12 parcelas
Veículo: VW GOL 1.6 MSI
Placa: BRA2E19
Código FIPE: 005340-6
Tipo de Cobertura: COMPREENSIVA
";

#[cfg(test)]
mod full_document_tests {
    use super::*;

    #[test]
    fn test_complete_policy_extraction() {
        let data = extract_from_text(PORTO_POLICY);

        assert_eq!(data.seguradora, "Porto Seguro");
        assert_eq!(data.nome_segurado, "João Carlos Pereira");
        assert_eq!(data.cpf, "123.456.789-09");
        assert_eq!(data.apolice, "531.84.000.123456");
        assert_eq!(data.vigencia_inicio, d("2024-03-15"));
        assert_eq!(data.vigencia_fim, d("2025-03-15"));
        assert_eq!(data.premio_total, 2400.0);
        assert_eq!(data.parcelas_totais, 12);
        assert_eq!(data.valor_mensal, 200.0);
        assert_eq!(data.veiculo.as_deref(), Some("VW GOL 1.6 MSI"));
        assert_eq!(data.placa.as_deref(), Some("BRA2E19"));
        assert_eq!(data.fipe.as_deref(), Some("005340-6"));
        assert_eq!(data.tipo_cobertura, "COMPREENSIVA");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let today = d("2024-06-15");
        let first = extract_from_text_at(PORTO_POLICY, today);
        let second = extract_from_text_at(PORTO_POLICY, today);
        assert_eq!(first, second);

        let first = extract_from_text_at("texto aleatório sem estrutura", today);
        let second = extract_from_text_at("texto aleatório sem estrutura", today);
        assert_eq!(first, second);
    }

    #[test]
    fn test_provenance_marks_extracted_fields() {
        let data = extract_from_text(PORTO_POLICY);
        assert_eq!(data.provenance.seguradora, FieldSource::Extracted);
        assert_eq!(data.provenance.nome_segurado, FieldSource::Extracted);
        assert_eq!(data.provenance.apolice, FieldSource::Extracted);
        assert_eq!(data.provenance.premio_total, FieldSource::Extracted);
        // No installment rows in the text: the schedule was synthesized.
        assert_eq!(data.provenance.parcelas, FieldSource::Synthesized);
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_fully_defaulted_record() {
        let today = d("2024-06-15");
        let data = extract_from_text_at("", today);

        assert_eq!(data.seguradora, SEGURADORA_NAO_IDENTIFICADA);
        assert_eq!(data.nome_segurado, NOME_NAO_IDENTIFICADO);
        assert_eq!(data.cpf, "");
        assert!(data.apolice.starts_with("APL-"));
        assert_eq!(data.premio_total, 0.0);
        assert!(data.parcelas.is_empty());
        assert_eq!(data.parcelas_totais, 12);
        assert_eq!(data.valor_mensal, 0.0);
        assert_eq!(data.tipo_cobertura, COBERTURA_PADRAO);
        assert!(data.veiculo.is_none());
        assert!(data.placa.is_none());
        assert!(data.fipe.is_none());

        // Start within the last 6 months, end one year later.
        assert!(data.vigencia_inicio <= today);
        assert!(data.vigencia_inicio >= today - chrono::Duration::days(180));
        assert!(data.vigencia_fim > data.vigencia_inicio);

        assert_eq!(data.provenance.seguradora, FieldSource::Defaulted);
        assert_eq!(data.provenance.nome_segurado, FieldSource::Defaulted);
        assert_eq!(data.provenance.apolice, FieldSource::Defaulted);
        assert_eq!(data.provenance.vigencia_inicio, FieldSource::Defaulted);
        assert_eq!(data.provenance.parcelas, FieldSource::Defaulted);
    }

    #[test]
    fn test_garbage_input_never_errors() {
        for text in ["###", "\n\n\n", "R$ sem número", "12/34/56", "ápol"] {
            let data = extract_from_text(text);
            assert!(data.vigencia_fim > data.vigencia_inicio);
        }
    }
}

#[cfg(test)]
mod precedence_tests {
    use super::*;

    #[test]
    fn test_insurer_specific_premium_wins() {
        let text = "\
BRADESCO SEGUROS S.A.
Prêmio Líquido: R$ 900,00
Prêmio Total: R$ 1.000,00
";
        let data = extract_from_text(text);
        assert_eq!(data.seguradora, "Bradesco Seguros");
        // The Bradesco override targets the líquido line and is tried first.
        assert_eq!(data.premio_total, 900.0);
    }

    #[test]
    fn test_generic_premium_without_detected_insurer() {
        let text = "\
Documento de cobrança
Prêmio Líquido: R$ 900,00
Prêmio Total: R$ 1.000,00
";
        let data = extract_from_text(text);
        assert_eq!(data.seguradora, SEGURADORA_NAO_IDENTIFICADA);
        assert_eq!(data.premio_total, 1000.0);
    }

    #[test]
    fn test_labeled_apolice_beats_bare_digit_fallback() {
        let text = "Contrato 99887766\nApólice: 12345.67.890\n";
        let data = extract_from_text(text);
        assert_eq!(data.apolice, "12345.67.890");
    }
}

#[cfg(test)]
mod installment_tests {
    use super::*;

    #[test]
    fn test_insurer_installment_rows() {
        let text = "\
SULAMÉRICA SEGUROS
Prêmio Total: R$ 700,00
1ª Parcela - 10/04/2024 - R$ 350,00
2ª Parcela - 10/05/2024 - R$ 350,00
";
        let data = extract_from_text(text);
        assert_eq!(data.seguradora, "SulAmérica Seguros");
        assert_eq!(data.parcelas.len(), 2);
        assert_eq!(data.parcelas[0].data, d("2024-04-10"));
        assert_eq!(data.parcelas[0].valor, 350.0);
        assert_eq!(data.parcelas_totais, 2);
        assert_eq!(data.valor_mensal, 350.0);
    }

    #[test]
    fn test_synthesized_installments_from_premium() {
        let text = "\
Prêmio Total: R$ 1.200,00
Em 12 parcelas
Início de Vigência: 10/01/2024
Fim de Vigência: 10/01/2025
";
        let data = extract_from_text(text);
        assert_eq!(data.premio_total, 1200.0);
        assert_eq!(data.parcelas.len(), 12);
        assert!(data.parcelas.iter().all(|p| p.valor == 100.0));
        assert_eq!(data.parcelas[0].data, d("2024-01-10"));
        assert_eq!(data.parcelas[1].data, d("2024-02-10"));
        assert_eq!(data.parcelas[11].data, d("2024-12-10"));
        assert_eq!(data.provenance.parcelas, FieldSource::Synthesized);
    }

    #[test]
    fn test_installment_count_tracks_schedule() {
        let text = "\
SULAMÉRICA SEGUROS
Em 12 parcelas
Prêmio Total: R$ 1.050,00
1ª Parcela - 05/02/2024 - R$ 350,00
2ª Parcela - 05/03/2024 - R$ 350,00
3ª Parcela - 05/04/2024 - R$ 350,00
";
        let data = extract_from_text(text);
        // Declared 12, found 3: the schedule wins.
        assert_eq!(data.parcelas_totais, 3);
        assert_eq!(data.parcelas.len(), 3);
        assert_eq!(data.provenance.parcelas_totais, FieldSource::Corrected);
    }
}

#[cfg(test)]
mod vigencia_tests {
    use super::*;

    #[test]
    fn test_reversed_vigencia_corrected() {
        let text = "\
Início de Vigência: 15/03/2025
Fim de Vigência: 15/03/2024
";
        let data = extract_from_text(text);
        assert_eq!(data.vigencia_inicio, d("2025-03-15"));
        assert_eq!(data.vigencia_fim, d("2026-03-15"));
        assert_eq!(data.provenance.vigencia_fim, FieldSource::Corrected);
    }

    #[test]
    fn test_vigencia_range_line() {
        let text = "Vigência: 01/06/2024 a 01/06/2025\n";
        let data = extract_from_text(text);
        assert_eq!(data.vigencia_inicio, d("2024-06-01"));
        assert_eq!(data.vigencia_fim, d("2025-06-01"));
    }

    #[test]
    fn test_missing_end_date_defaults_to_one_year() {
        let text = "Início de Vigência: 20/08/2024\n";
        let data = extract_from_text(text);
        assert_eq!(data.vigencia_inicio, d("2024-08-20"));
        assert_eq!(data.vigencia_fim, d("2025-08-20"));
    }
}
