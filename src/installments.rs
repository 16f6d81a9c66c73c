//! Installment schedule extraction.
//!
//! Two-tier strategy: an insurer-specific row pattern run globally against
//! the text, falling back to positional pairing of every generic installment
//! amount with every generic due date.

use chrono::NaiveDate;

use crate::models::ExtractedInstallment;
use crate::patterns::{self, PARCELA_DATA, PARCELA_VALOR};
use crate::transforms::{convert_date_br, parse_monetary};

/// Hard cap on installments paired in the generic fallback.
const MAX_PARCELAS: usize = 24;

fn parse_br_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&convert_date_br(raw), "%Y-%m-%d").ok()
}

/// Extract the installment schedule from normalized text.
///
/// Tier 1: when the detected insurer has an installment row pattern, each
/// global match yields one installment from its two capture groups (date,
/// amount), numbered by match order. Tier 2: when tier 1 yields nothing,
/// every generic amount match is paired positionally with every generic date
/// match up to `min(amounts, dates, 24)`; excess entries on either side are
/// dropped. The result is always sorted ascending by `numero`.
pub fn extract_installments(text: &str, insurer: &str) -> Vec<ExtractedInstallment> {
    if let Some(parcela_re) = patterns::insurer_override(insurer).and_then(|o| o.parcela.as_ref()) {
        let mut found: Vec<ExtractedInstallment> = Vec::new();
        for caps in parcela_re.captures_iter(text) {
            let data = caps.get(1).and_then(|m| parse_br_date(m.as_str()));
            let valor = caps.get(2).map(|m| parse_monetary(m.as_str()));
            if let (Some(data), Some(valor)) = (data, valor) {
                found.push(ExtractedInstallment {
                    numero: found.len() as u32 + 1,
                    data,
                    valor,
                });
            }
        }
        if !found.is_empty() {
            tracing::debug!(insurer, count = found.len(), "installments via insurer pattern");
            found.sort_by_key(|p| p.numero);
            return found;
        }
    }

    // Generic fallback: amounts and dates are collected independently across
    // all patterns and matched purely by index, not by source proximity.
    let mut valores: Vec<f64> = Vec::new();
    for re in PARCELA_VALOR.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                valores.push(parse_monetary(m.as_str()));
            }
        }
    }

    let mut datas: Vec<NaiveDate> = Vec::new();
    for re in PARCELA_DATA.iter() {
        for caps in re.captures_iter(text) {
            if let Some(d) = caps.get(1).and_then(|m| parse_br_date(m.as_str())) {
                datas.push(d);
            }
        }
    }

    let n = valores.len().min(datas.len()).min(MAX_PARCELAS);
    let mut parcelas: Vec<ExtractedInstallment> = (0..n)
        .map(|i| ExtractedInstallment {
            numero: i as u32 + 1,
            data: datas[i],
            valor: valores[i],
        })
        .collect();
    parcelas.sort_by_key(|p| p.numero);

    if !parcelas.is_empty() {
        tracing::debug!(count = parcelas.len(), "installments via generic pairing");
    }
    parcelas
}
