//! Post-extraction reconciliation.
//!
//! A single pass over the populated record that never errors: inconsistent
//! values are corrected in place and the correction recorded in provenance.
//! The extractor always hands callers a complete, internally consistent
//! record even when the source document was unparseable.

use chrono::{Months, NaiveDate};

use crate::models::{EnhancedExtractedData, ExtractedInstallment, FieldSource};
use crate::transforms::round2;

/// Tolerated relative drift between `valor_mensal` and the premium split.
const VALOR_MENSAL_TOLERANCIA: f64 = 0.15;

pub(crate) fn one_year_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(12)).unwrap_or(date)
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Reconcile the extracted record in place.
///
/// 1. A non-empty schedule overrides the declared installment count.
/// 2. With no schedule but a positive premium, installments are synthesized
///    as an equal split, one calendar month apart from `vigencia_inicio`
///    (the last installment is not adjusted for the rounding remainder; a
///    few cents of total drift are accepted).
/// 3. `valor_mensal` is re-asserted to the premium split when it drifts more
///    than 15% from it.
/// 4. `vigencia_fim` must be strictly after `vigencia_inicio`; otherwise it
///    becomes `vigencia_inicio + 1 year`.
pub fn reconcile(data: &mut EnhancedExtractedData) {
    if !data.parcelas.is_empty() {
        let len = data.parcelas.len() as u32;
        if data.parcelas_totais != len {
            tracing::debug!(
                declared = data.parcelas_totais,
                found = len,
                "installment count overridden by schedule length"
            );
            data.parcelas_totais = len;
            data.provenance.parcelas_totais = FieldSource::Corrected;
        }
    } else if data.premio_total > 0.0 {
        data.parcelas = synthesize_installments(
            data.premio_total,
            data.parcelas_totais,
            data.vigencia_inicio,
        );
        data.provenance.parcelas = FieldSource::Synthesized;
        tracing::debug!(count = data.parcelas.len(), "installments synthesized");
    }

    if data.parcelas_totais > 0 {
        let expected = round2(data.premio_total / data.parcelas_totais as f64);
        if (data.valor_mensal - expected).abs() > VALOR_MENSAL_TOLERANCIA * expected {
            tracing::debug!(
                valor_mensal = data.valor_mensal,
                expected,
                "monthly amount outside tolerance, recomputed"
            );
            data.valor_mensal = expected;
            data.provenance.valor_mensal = FieldSource::Corrected;
        }
    }

    if data.vigencia_fim <= data.vigencia_inicio {
        tracing::debug!(
            inicio = %data.vigencia_inicio,
            fim = %data.vigencia_fim,
            "coverage end not after start, recomputed"
        );
        data.vigencia_fim = one_year_after(data.vigencia_inicio);
        data.provenance.vigencia_fim = FieldSource::Corrected;
    }
}

/// Equal-split schedule: `total` installments of `premio / total`, dated one
/// calendar month apart starting at `inicio`.
fn synthesize_installments(premio: f64, total: u32, inicio: NaiveDate) -> Vec<ExtractedInstallment> {
    let valor = round2(premio / total as f64);
    (0..total)
        .map(|i| ExtractedInstallment {
            numero: i + 1,
            data: add_months(inicio, i),
            valor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnhancedExtractedData, ExtractionProvenance};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
    }

    fn base_record() -> EnhancedExtractedData {
        EnhancedExtractedData {
            nome_segurado: "Fulano de Tal".to_string(),
            cpf: String::new(),
            apolice: "123456789".to_string(),
            seguradora: "Porto Seguro".to_string(),
            vigencia_inicio: d("2024-01-15"),
            vigencia_fim: d("2025-01-15"),
            premio_total: 1200.0,
            parcelas: Vec::new(),
            parcelas_totais: 12,
            valor_mensal: 100.0,
            veiculo: None,
            placa: None,
            fipe: None,
            tipo_cobertura: "BÁSICA".to_string(),
            provenance: ExtractionProvenance::default(),
        }
    }

    #[test]
    fn synthesizes_equal_split_schedule() {
        let mut data = base_record();
        reconcile(&mut data);

        assert_eq!(data.parcelas.len(), 12);
        assert!(data.parcelas.iter().all(|p| p.valor == 100.0));
        assert_eq!(data.parcelas[0].data, d("2024-01-15"));
        assert_eq!(data.parcelas[1].data, d("2024-02-15"));
        assert_eq!(data.parcelas[11].data, d("2024-12-15"));
        assert_eq!(data.provenance.parcelas, FieldSource::Synthesized);
    }

    #[test]
    fn schedule_length_overrides_declared_count() {
        let mut data = base_record();
        data.parcelas = vec![
            ExtractedInstallment { numero: 1, data: d("2024-01-15"), valor: 300.0 },
            ExtractedInstallment { numero: 2, data: d("2024-02-15"), valor: 300.0 },
            ExtractedInstallment { numero: 3, data: d("2024-03-15"), valor: 300.0 },
            ExtractedInstallment { numero: 4, data: d("2024-04-15"), valor: 300.0 },
        ];
        data.valor_mensal = 300.0;
        reconcile(&mut data);

        assert_eq!(data.parcelas_totais, 4);
        assert_eq!(data.provenance.parcelas_totais, FieldSource::Corrected);
        // 1200 / 4 = 300: within tolerance, untouched.
        assert_eq!(data.valor_mensal, 300.0);
    }

    #[test]
    fn monthly_amount_reasserted_outside_tolerance() {
        let mut data = base_record();
        data.valor_mensal = 250.0; // expected 100, drift way over 15%
        reconcile(&mut data);

        assert_eq!(data.valor_mensal, 100.0);
        assert_eq!(data.provenance.valor_mensal, FieldSource::Corrected);
    }

    #[test]
    fn monthly_amount_within_tolerance_kept() {
        let mut data = base_record();
        data.valor_mensal = 110.0; // 10% above the 100 split
        reconcile(&mut data);
        assert_eq!(data.valor_mensal, 110.0);
    }

    #[test]
    fn reversed_vigencia_recomputed() {
        let mut data = base_record();
        data.vigencia_inicio = d("2024-06-01");
        data.vigencia_fim = d("2024-01-01");
        reconcile(&mut data);

        assert_eq!(data.vigencia_fim, d("2025-06-01"));
        assert_eq!(data.provenance.vigencia_fim, FieldSource::Corrected);
    }

    #[test]
    fn equal_vigencia_dates_also_corrected() {
        let mut data = base_record();
        data.vigencia_fim = data.vigencia_inicio;
        reconcile(&mut data);
        assert!(data.vigencia_fim > data.vigencia_inicio);
    }

    #[test]
    fn zero_premium_skips_synthesis() {
        let mut data = base_record();
        data.premio_total = 0.0;
        data.valor_mensal = 0.0;
        reconcile(&mut data);
        assert!(data.parcelas.is_empty());
        assert_eq!(data.parcelas_totais, 12);
    }

    #[test]
    fn month_end_synthesis_clamps_dates() {
        let mut data = base_record();
        data.vigencia_inicio = d("2024-01-31");
        data.vigencia_fim = d("2025-01-31");
        reconcile(&mut data);
        // chrono clamps 31 Jan + 1 month to 29 Feb 2024.
        assert_eq!(data.parcelas[1].data, d("2024-02-29"));
    }
}
