//! Insurer detection by substring and keyword scoring.

use crate::models::SEGURADORA_NAO_IDENTIFICADA;
use crate::patterns::{EMISSOR, KNOWN_INSURERS};

/// Portion of the normalized text treated as the header/letterhead region.
const HEADER_CHARS: usize = 500;

/// Minimum share of an insurer's keyword tokens that must appear in a
/// candidate span for a keyword-based match.
const KEYWORD_THRESHOLD: f64 = 0.7;

/// Detect the issuing insurer from normalized document text.
///
/// Candidate spans are the first [`HEADER_CHARS`] characters plus any span
/// following an "emitido por"/"dados do corretor" style phrase. For each
/// known insurer (list order is the tie-break): an exact case-insensitive
/// substring match in any candidate wins immediately; otherwise the insurer
/// matches when at least `ceil(70%)` of its name tokens longer than 3
/// characters appear in one candidate. No match yields the sentinel name.
pub fn detect_insurer(text: &str) -> String {
    let mut candidates: Vec<String> = Vec::new();
    candidates.push(text.chars().take(HEADER_CHARS).collect::<String>().to_lowercase());
    for re in EMISSOR.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                candidates.push(m.as_str().to_lowercase());
            }
        }
    }

    for insurer in KNOWN_INSURERS.iter().copied() {
        let needle = insurer.to_lowercase();
        let tokens: Vec<String> = insurer
            .split_whitespace()
            .filter(|w| w.chars().count() > 3)
            .map(|w| w.to_lowercase())
            .collect();
        let required = ((tokens.len() as f64) * KEYWORD_THRESHOLD).ceil() as usize;

        for candidate in &candidates {
            if candidate.contains(&needle) {
                tracing::debug!(insurer, "insurer matched by substring");
                return insurer.to_string();
            }
            if !tokens.is_empty() {
                let present = tokens.iter().filter(|t| candidate.contains(t.as_str())).count();
                if present >= required {
                    tracing::debug!(insurer, present, required, "insurer matched by keywords");
                    return insurer.to_string();
                }
            }
        }
    }

    tracing::debug!("no insurer matched, using sentinel");
    SEGURADORA_NAO_IDENTIFICADA.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_insurer_in_header() {
        let text = "PORTO SEGURO COMPANHIA DE SEGUROS GERAIS\nApólice de Seguro Auto";
        assert_eq!(detect_insurer(&text.to_string()), "Porto Seguro");
    }

    #[test]
    fn detects_insurer_after_emissor_phrase() {
        let filler = "x\n".repeat(400);
        let text = format!("{}Emitido por: Bradesco Seguros S.A.", filler);
        assert_eq!(detect_insurer(&text), "Bradesco Seguros");
    }

    #[test]
    fn keyword_match_tolerates_reordered_names() {
        // "Tokio Marine Seguradora" has 3 tokens > 3 chars; 70% requires 3.
        let text = "SEGURADORA TOKIO MARINE BRASIL\nProposta de seguro";
        assert_eq!(detect_insurer(text), "Tokio Marine Seguradora");
    }

    #[test]
    fn unknown_text_yields_sentinel() {
        assert_eq!(detect_insurer(""), SEGURADORA_NAO_IDENTIFICADA);
        assert_eq!(
            detect_insurer("Documento genérico sem seguradora"),
            SEGURADORA_NAO_IDENTIFICADA
        );
    }

    #[test]
    fn list_order_breaks_ties() {
        // Both insurers appear; "Porto Seguro" precedes "Azul Seguros" in the
        // static list, so it wins.
        let text = "Azul Seguros em parceria com Porto Seguro";
        assert_eq!(detect_insurer(text), "Porto Seguro");
    }
}
