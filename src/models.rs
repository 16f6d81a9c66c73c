use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============ Sentinel defaults ============

/// Sentinel value when the insured party's name could not be extracted.
pub const NOME_NAO_IDENTIFICADO: &str = "Nome não identificado";
/// Sentinel value when no known insurer matched the document.
pub const SEGURADORA_NAO_IDENTIFICADA: &str = "Seguradora não identificada";
/// Default coverage category when none was extracted.
pub const COBERTURA_PADRAO: &str = "BÁSICA";
/// Default declared installment count when none was extracted.
pub const PARCELAS_PADRAO: u32 = 12;

// ============ Extraction Models ============

/// A single premium installment extracted (or synthesized) from a policy
/// document.
///
/// Within one extraction result, `numero` values are contiguous starting at 1
/// and the sequence is ordered ascending by `numero`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInstallment {
    /// 1-based sequence position.
    pub numero: u32,
    /// Due date.
    pub data: NaiveDate,
    /// Monetary amount, 2-decimal precision, non-negative.
    pub valor: f64,
}

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Matched by a pattern in the source text.
    Extracted,
    /// No pattern matched; a static or generated default was used.
    Defaulted,
    /// An extracted value failed a consistency check and was recomputed.
    Corrected,
    /// Generated from other extracted values (installment synthesis).
    Synthesized,
}

/// Per-field provenance so callers can tell parsed values from fabricated
/// ones. The pipeline still always returns a complete record; this is audit
/// metadata layered on top, not an error channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionProvenance {
    pub nome_segurado: FieldSource,
    pub cpf: FieldSource,
    pub apolice: FieldSource,
    pub seguradora: FieldSource,
    pub vigencia_inicio: FieldSource,
    pub vigencia_fim: FieldSource,
    pub premio_total: FieldSource,
    pub parcelas: FieldSource,
    pub parcelas_totais: FieldSource,
    pub valor_mensal: FieldSource,
    pub tipo_cobertura: FieldSource,
}

impl Default for ExtractionProvenance {
    /// Every field starts as `Defaulted`; the pipeline upgrades fields as it
    /// extracts, corrects, or synthesizes them.
    fn default() -> Self {
        Self {
            nome_segurado: FieldSource::Defaulted,
            cpf: FieldSource::Defaulted,
            apolice: FieldSource::Defaulted,
            seguradora: FieldSource::Defaulted,
            vigencia_inicio: FieldSource::Defaulted,
            vigencia_fim: FieldSource::Defaulted,
            premio_total: FieldSource::Defaulted,
            parcelas: FieldSource::Defaulted,
            parcelas_totais: FieldSource::Defaulted,
            valor_mensal: FieldSource::Defaulted,
            tipo_cobertura: FieldSource::Defaulted,
        }
    }
}

/// Flat structured record produced for each policy document.
///
/// The record is always complete: unmatched fields carry sentinel or
/// generated defaults and the reconciliation pass silently corrects
/// inconsistent values. Check `provenance` to distinguish extracted from
/// fabricated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedExtractedData {
    /// Insured party's name. Defaults to [`NOME_NAO_IDENTIFICADO`].
    pub nome_segurado: String,
    /// CPF document number as it appeared in the text; may be empty.
    pub cpf: String,
    /// Policy number. Falls back to a generated placeholder derived from the
    /// input text digest.
    pub apolice: String,
    /// Insurer display name. Defaults to [`SEGURADORA_NAO_IDENTIFICADA`].
    pub seguradora: String,
    /// Coverage period start.
    pub vigencia_inicio: NaiveDate,
    /// Coverage period end; always strictly after `vigencia_inicio`.
    pub vigencia_fim: NaiveDate,
    /// Total premium, non-negative.
    pub premio_total: f64,
    /// Installment schedule, ordered ascending by `numero`; possibly empty.
    pub parcelas: Vec<ExtractedInstallment>,
    /// Declared installment count. Equals `parcelas.len()` whenever
    /// `parcelas` is non-empty.
    pub parcelas_totais: u32,
    /// Derived monthly amount, kept within 15% of
    /// `premio_total / parcelas_totais`.
    pub valor_mensal: f64,
    /// Free-text make+model (auto policies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veiculo: Option<String>,
    /// License plate (auto policies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placa: Option<String>,
    /// FIPE table code (auto policies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fipe: Option<String>,
    /// Coverage category. Defaults to [`COBERTURA_PADRAO`].
    pub tipo_cobertura: String,
    /// Per-field provenance metadata.
    pub provenance: ExtractionProvenance,
}

// ============ HTTP Models ============

/// Request body for the extraction endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    /// Raw document text, already OCR'd/extracted upstream.
    pub text: String,
}

// ============ Legacy Format ============

/// Nested shape consumed by older clients of the extraction API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyExtractedData {
    pub informacoes_gerais: LegacyInformacoesGerais,
    pub seguradora: LegacySeguradora,
    pub informacoes_financeiras: LegacyInformacoesFinanceiras,
    pub vigencia: LegacyVigencia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segurado: Option<LegacySegurado>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veiculo: Option<LegacyVeiculo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyInformacoesGerais {
    pub numero_apolice: String,
    pub tipo_cobertura: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySeguradora {
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyInformacoesFinanceiras {
    pub premio_total: f64,
    pub valor_mensal: f64,
    pub parcelas_totais: u32,
    pub parcelas: Vec<LegacyParcela>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyParcela {
    pub numero: u32,
    pub data: NaiveDate,
    pub valor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyVigencia {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySegurado {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyVeiculo {
    pub descricao: Option<String>,
    pub placa: Option<String>,
    pub fipe: Option<String>,
}
