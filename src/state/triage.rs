//! Triage service payloads

use serde::{Deserialize, Serialize};

/// Patient data sent for classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientData {
    pub pressao_sistolica: f64,
    pub pressao_diastolica: f64,
    pub frequencia_cardiaca: f64,
    pub saturacao_oxigenio: f64,
    pub temperatura: f64,
    pub idade: u32,
    pub sexo: String,
    pub dor_peito: bool,
    pub dificuldade_respiratoria: bool,
    pub febre: bool,
    pub tontura: bool,
    pub vomito: bool,
    pub dor_abdominal: bool,
    /// Free text, left out of the payload when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub queixa_principal: String,
}

/// Manchester risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskColor {
    Red,
    Yellow,
    Green,
}

impl RiskColor {
    /// Map the service's colour code. Unknown codes are treated as yellow,
    /// which is what the service itself answers when classification fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "VERMELHO" => Self::Red,
            "VERDE" => Self::Green,
            _ => Self::Yellow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "RED - Emergency",
            Self::Yellow => "YELLOW - Urgent",
            Self::Green => "GREEN - Non-urgent",
        }
    }

    /// Target time to be seen, in minutes
    pub fn max_wait_minutes(&self) -> u32 {
        match self {
            Self::Red => 0,
            Self::Yellow => 60,
            Self::Green => 240,
        }
    }

    pub fn wait_description(&self) -> String {
        match self.max_wait_minutes() {
            0 => "Immediate care".to_string(),
            m if m % 60 == 0 => format!("Within {} hour(s)", m / 60),
            m => format!("Within {m} minutes"),
        }
    }
}

/// Classification returned by the triage service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub classification: String,
    pub risk_color: String,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl TriageResult {
    pub fn risk(&self) -> RiskColor {
        RiskColor::from_code(&self.risk_color)
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// What gets written when a result is exported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord<'a> {
    pub classification: &'a str,
    pub confidence: f64,
    pub reasoning: &'a str,
    pub recommendations: &'a [String],
    pub timestamp: &'a str,
}

impl<'a> From<&'a TriageResult> for ExportRecord<'a> {
    fn from(result: &'a TriageResult) -> Self {
        Self {
            classification: &result.classification,
            confidence: result.confidence,
            reasoning: &result.reasoning,
            recommendations: &result.recommendations,
            timestamp: &result.timestamp,
        }
    }
}
