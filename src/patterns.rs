//! Declarative pattern library for policy-document extraction.
//!
//! Each semantic field maps to an ordered list of regexes with one capture
//! group for the value. Ordering encodes precedence: earlier entries are
//! labeled/specific matches, later ones are looser fallbacks. The tables are
//! compiled once at first use and are read-only across all calls.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid extraction pattern"))
        .collect()
}

/// Insured party's name.
pub static NOME_SEGURADO: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)nome\s+do\s+segurado\s*[:\-]?\s*([A-ZÀ-Ü][A-Za-zÀ-ü'. ]{2,60})",
        r"(?i)segurado\s*[:\-]\s*([A-ZÀ-Ü][A-Za-zÀ-ü'. ]{2,60})",
        r"(?i)proponente\s*[:\-]?\s*([A-ZÀ-Ü][A-Za-zÀ-ü'. ]{2,60})",
    ])
});

/// CPF document number.
pub static CPF: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)CPF\s*[:\-]?\s*(\d{3}\.?\d{3}\.?\d{3}-?\d{2})",
        r"(\d{3}\.\d{3}\.\d{3}-\d{2})",
    ])
});

/// Policy number. The last entry is a deliberately loose bare-digit fallback.
pub static APOLICE: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)n[úu]mero\s+da\s+ap[óo]lice\s*[:\-]?\s*(\d[\d./-]{4,24})",
        r"(?i)ap[óo]lice\s*(?:n[º°o]?\.?)?\s*[:\-]?\s*(\d[\d./-]{4,24})",
        r"\b(\d{8,20})\b",
    ])
});

/// Coverage period start (`DD/MM/YYYY` in the source).
pub static VIGENCIA_INICIO: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)in[íi]cio\s+d[ea]\s+vig[êe]ncia\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})",
        r"(?i)vig[êe]ncia\s*[:\-]?\s*(?:de\s+)?(\d{2}/\d{2}/\d{4})",
        r"(?i)a\s+partir\s+de\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})",
    ])
});

/// Coverage period end.
pub static VIGENCIA_FIM: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)(?:fim|t[ée]rmino|final)\s+d[ea]\s+vig[êe]ncia\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})",
        r"(?i)vig[êe]ncia[^\n]*?\d{2}/\d{2}/\d{4}\s*(?:a|at[ée]|-|–)\s*(\d{2}/\d{2}/\d{4})",
        r"(?i)at[ée]\s+(\d{2}/\d{2}/\d{4})",
    ])
});

/// Total premium.
pub static PREMIO_TOTAL: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)pr[êe]mio\s+total\D{0,12}([\d.]+,\d{2})",
        r"(?i)valor\s+total\s+do\s+seguro\D{0,12}([\d.]+,\d{2})",
        r"(?i)total\s+a\s+pagar\D{0,12}([\d.]+,\d{2})",
        r"(?i)pr[êe]mio\D{0,12}([\d.]+,\d{2})",
    ])
});

/// Declared installment count.
pub static PARCELAS_TOTAIS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)em\s+(\d{1,2})\s*(?:x\b|vezes|parcelas)",
        r"(?i)(\d{1,2})\s+parcelas",
        r"(?i)n[úu]mero\s+de\s+parcelas\s*[:\-]?\s*(\d{1,2})",
    ])
});

/// Generic per-installment amounts (tier-2 installment extraction).
pub static PARCELA_VALOR: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)parcela\s+\d{1,2}\s*[^\d\n]{0,12}([\d.]+,\d{2})",
        r"(?i)\d{1,2}[ªa]\s+parcela\s*[^\d\n]{0,12}([\d.]+,\d{2})",
        r"(?i)presta[çc][ãa]o\s*[^\d\n]{0,12}([\d.]+,\d{2})",
    ])
});

/// Generic per-installment due dates (tier-2 installment extraction).
pub static PARCELA_DATA: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)vencimento\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})",
        r"(?i)\bvenc\.\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})",
    ])
});

/// Coverage category.
pub static TIPO_COBERTURA: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)tipo\s+de\s+cobertura\s*[:\-]?\s*([A-Za-zÀ-ü ]{3,30})",
        r"(?i)cobertura\s*[:\-]?\s*(compreensiva|b[áa]sica|intermedi[áa]ria|total|roubo\s+e\s+furto)",
    ])
});

/// Vehicle make+model free text.
pub static VEICULO: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)ve[íi]culo\s*[:\-]\s*([^\n]{3,60})",
        r"(?i)marca\s*/?\s*modelo\s*[:\-]?\s*([^\n]{3,60})",
    ])
});

/// License plate, old (`ABC-1234`) and Mercosul (`ABC1D23`) formats.
pub static PLACA: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)placa\s*[:\-]?\s*([A-Z]{3}-?\d(?:[A-Z]\d{2}|\d{3}))",
        r"\b([A-Z]{3}-\d{4})\b",
    ])
});

/// FIPE table reference code.
pub static FIPE: Lazy<Vec<Regex>> =
    Lazy::new(|| compile(&[r"(?i)(?:c[óo]digo\s+)?fipe\s*[:\-]?\s*(\d{6}-?\d)"]));

/// Phrases that introduce the issuing insurer or broker block; capture group
/// is the span scanned for insurer names alongside the document header.
pub static EMISSOR: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)emitid[oa]\s+por\s*[:\-]?\s*([^\n]{1,80})",
        r"(?i)dados\s+d[oa]\s+corretora?\s*[:\-]?\s*([^\n]{1,80})",
        r"(?i)companhia\s+seguradora\s*[:\-]?\s*([^\n]{1,80})",
    ])
});

/// Known insurer display names. Order matters: detection iterates this list
/// and the first satisfying insurer wins, so earlier entries break ties.
pub static KNOWN_INSURERS: &[&str] = &[
    "Porto Seguro",
    "Bradesco Seguros",
    "SulAmérica Seguros",
    "Itaú Seguros",
    "Allianz Seguros",
    "Mapfre Seguros",
    "Liberty Seguros",
    "Tokio Marine Seguradora",
    "HDI Seguros",
    "Zurich Seguros",
    "Azul Seguros",
    "Sompo Seguros",
    "Suhai Seguradora",
    "Youse Seguros",
];

/// Insurer-specific pattern overrides, tried before the generic lists for
/// the field they cover.
pub struct InsurerOverride {
    /// Policy number pattern; one capture group.
    pub apolice: Option<Regex>,
    /// Total premium pattern; one capture group.
    pub premio: Option<Regex>,
    /// Installment row pattern; two capture groups (date, amount), run
    /// globally against the text.
    pub parcela: Option<Regex>,
}

static INSURER_OVERRIDES: Lazy<HashMap<&'static str, InsurerOverride>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "Porto Seguro",
        InsurerOverride {
            apolice: Some(
                Regex::new(r"(?i)ap[óo]lice\s+n[º°o]?\.?\s*([\d]{3}\.[\d]{2}\.[\d]{3}\.[\d]{6})")
                    .expect("invalid Porto Seguro apólice pattern"),
            ),
            premio: None,
            parcela: Some(
                Regex::new(r"(?i)parcela\s+\d{1,2}\s+(\d{2}/\d{2}/\d{4})\s+R?\$?\s*([\d.]+,\d{2})")
                    .expect("invalid Porto Seguro parcela pattern"),
            ),
        },
    );
    map.insert(
        "Bradesco Seguros",
        InsurerOverride {
            apolice: None,
            premio: Some(
                Regex::new(r"(?i)pr[êe]mio\s+l[íi]quido\D{0,12}([\d.]+,\d{2})")
                    .expect("invalid Bradesco prêmio pattern"),
            ),
            parcela: None,
        },
    );
    map.insert(
        "SulAmérica Seguros",
        InsurerOverride {
            apolice: Some(
                Regex::new(r"(?i)ap[óo]lice\s*[:\-]?\s*(\d{10,15})")
                    .expect("invalid SulAmérica apólice pattern"),
            ),
            premio: None,
            parcela: Some(
                Regex::new(
                    r"(?i)\d{1,2}[ªa]?\s+parcela\s*[-–:]?\s*(\d{2}/\d{2}/\d{4})\s*[-–:]?\s*R?\$?\s*([\d.]+,\d{2})",
                )
                .expect("invalid SulAmérica parcela pattern"),
            ),
        },
    );
    map
});

/// Look up the override table entry for a detected insurer, if any.
pub fn insurer_override(insurer: &str) -> Option<&'static InsurerOverride> {
    INSURER_OVERRIDES.get(insurer)
}
