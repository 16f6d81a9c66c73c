//! Single-pass text-to-structured-data extraction pipeline.
//!
//! Raw text in, a flat [`EnhancedExtractedData`] record out. The pipeline is
//! synchronous and pure over its input: normalize, detect the insurer, run
//! each field's pattern list in priority order, extract installments, then
//! reconcile. It never fails; unmatched fields receive defaults and the
//! reconciliation pass silently corrects inconsistent values, with every
//! decision recorded in the record's provenance.

use chrono::{NaiveDate, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::insurer::detect_insurer;
use crate::installments::extract_installments;
use crate::models::{
    EnhancedExtractedData, ExtractionProvenance, FieldSource, COBERTURA_PADRAO,
    NOME_NAO_IDENTIFICADO, PARCELAS_PADRAO, SEGURADORA_NAO_IDENTIFICADA,
};
use crate::patterns;
use crate::transforms::{convert_date_br, normalize_text, parse_monetary, round2};
use crate::validate::{one_year_after, reconcile};

/// Generic field extraction: first pattern whose capture group 1 is
/// non-empty after trimming wins; the optional transform is applied to the
/// winning value. Determinism and pattern order are the only behaviors
/// callers rely on.
pub fn extract_field(
    text: &str,
    patterns: &[Regex],
    transform: Option<fn(&str) -> String>,
) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim();
                if !value.is_empty() {
                    return Some(match transform {
                        Some(f) => f(value),
                        None => value.to_string(),
                    });
                }
            }
        }
    }
    None
}

/// Extract a date field and parse it into a calendar date. Values whose
/// shape survives [`convert_date_br`] but are not valid calendar dates are
/// discarded.
fn extract_date(text: &str, patterns: &[Regex]) -> Option<NaiveDate> {
    extract_field(text, patterns, Some(|v: &str| convert_date_br(v)))
        .and_then(|iso| NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok())
}

/// Try the insurer-specific pattern for a field before the generic list.
fn extract_with_override(
    text: &str,
    override_pattern: Option<&Regex>,
    generic: &[Regex],
    transform: Option<fn(&str) -> String>,
) -> Option<String> {
    if let Some(re) = override_pattern {
        if let Some(value) = extract_field(text, std::slice::from_ref(re), transform) {
            return Some(value);
        }
    }
    extract_field(text, generic, transform)
}

/// Deterministic placeholder policy number for documents where no pattern
/// matched, derived from the input digest so repeated extraction of the
/// same text stays idempotent.
fn placeholder_apolice(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("APL-{}", &hex::encode(digest)[..10].to_uppercase())
}

/// Default coverage start when none was extracted: a date within the last 6
/// months, offset derived from the input digest.
fn default_vigencia_inicio(text: &str, today: NaiveDate) -> NaiveDate {
    let digest = Sha256::digest(text.as_bytes());
    let offset_days = i64::from(digest[0]) % 180;
    today - chrono::Duration::days(offset_days)
}

/// Extract a structured policy record from raw document text.
///
/// Never fails: empty or unparseable input yields a fully defaulted record.
pub fn extract_from_text(raw: &str) -> EnhancedExtractedData {
    extract_from_text_at(raw, Utc::now().date_naive())
}

/// Same pipeline with an injected reference date, so the fabricated
/// vigência defaults are reproducible in tests.
pub fn extract_from_text_at(raw: &str, today: NaiveDate) -> EnhancedExtractedData {
    let text = normalize_text(raw);
    let mut prov = ExtractionProvenance::default();

    let seguradora = detect_insurer(&text);
    if seguradora != SEGURADORA_NAO_IDENTIFICADA {
        prov.seguradora = FieldSource::Extracted;
    }
    tracing::debug!(seguradora = %seguradora, "insurer detection complete");
    let overrides = patterns::insurer_override(&seguradora);

    let nome_segurado = match extract_field(&text, &patterns::NOME_SEGURADO, None) {
        Some(v) => {
            prov.nome_segurado = FieldSource::Extracted;
            v
        }
        None => NOME_NAO_IDENTIFICADO.to_string(),
    };

    let cpf = match extract_field(&text, &patterns::CPF, None) {
        Some(v) => {
            prov.cpf = FieldSource::Extracted;
            v
        }
        None => String::new(),
    };

    let apolice = match extract_with_override(
        &text,
        overrides.and_then(|o| o.apolice.as_ref()),
        &patterns::APOLICE,
        None,
    ) {
        Some(v) => {
            prov.apolice = FieldSource::Extracted;
            v
        }
        None => placeholder_apolice(&text),
    };

    let vigencia_inicio = match extract_date(&text, &patterns::VIGENCIA_INICIO) {
        Some(d) => {
            prov.vigencia_inicio = FieldSource::Extracted;
            d
        }
        None => default_vigencia_inicio(&text, today),
    };

    let vigencia_fim = match extract_date(&text, &patterns::VIGENCIA_FIM) {
        Some(d) => {
            prov.vigencia_fim = FieldSource::Extracted;
            d
        }
        None => one_year_after(vigencia_inicio),
    };

    let premio_total = match extract_with_override(
        &text,
        overrides.and_then(|o| o.premio.as_ref()),
        &patterns::PREMIO_TOTAL,
        None,
    )
    .map(|v| parse_monetary(&v))
    {
        Some(v) => {
            prov.premio_total = FieldSource::Extracted;
            v
        }
        None => 0.0,
    };

    let parcelas_totais = match extract_field(&text, &patterns::PARCELAS_TOTAIS, None)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| *n >= 1)
    {
        Some(n) => {
            prov.parcelas_totais = FieldSource::Extracted;
            n
        }
        None => PARCELAS_PADRAO,
    };

    let parcelas = extract_installments(&text, &seguradora);
    if !parcelas.is_empty() {
        prov.parcelas = FieldSource::Extracted;
    }

    // First installment value when present, premium split otherwise; the
    // reconciliation pass re-asserts the 15% band afterwards.
    let valor_mensal = match parcelas.first() {
        Some(first) => {
            prov.valor_mensal = FieldSource::Extracted;
            first.valor
        }
        None => round2(premio_total / parcelas_totais as f64),
    };

    let tipo_cobertura =
        match extract_field(&text, &patterns::TIPO_COBERTURA, Some(|v: &str| v.to_uppercase())) {
            Some(v) => {
                prov.tipo_cobertura = FieldSource::Extracted;
                v
            }
            None => COBERTURA_PADRAO.to_string(),
        };

    let veiculo = extract_field(&text, &patterns::VEICULO, None);
    let placa = extract_field(&text, &patterns::PLACA, Some(|v: &str| v.to_uppercase()));
    let fipe = extract_field(&text, &patterns::FIPE, None);

    let mut data = EnhancedExtractedData {
        nome_segurado,
        cpf,
        apolice,
        seguradora,
        vigencia_inicio,
        vigencia_fim,
        premio_total,
        parcelas,
        parcelas_totais,
        valor_mensal,
        veiculo,
        placa,
        fipe,
        tipo_cobertura,
        provenance: prov,
    };

    reconcile(&mut data);

    tracing::debug!(
        apolice = %data.apolice,
        seguradora = %data.seguradora,
        parcelas = data.parcelas.len(),
        "extraction complete"
    );
    data
}
