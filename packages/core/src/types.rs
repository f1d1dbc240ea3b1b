// ABOUTME: Request payload types for every analysis kind
// ABOUTME: Deserialized from the JSON bodies sent by the dashboard, validated before prompting

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    MAX_TENDERS, MIN_COMPANY_CONTEXT_CHARS, MIN_DOCUMENT_CHARS, MIN_ROLE_CHARS,
};
use crate::validation::{
    require_min_chars, require_non_empty, require_object, ValidationError, ValidationResult,
};

/// Kind of profile a document belongs to; drives the extraction schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Privato,
    Freelance,
    Azienda,
}

impl ProfileType {
    /// Unknown or missing labels fall back to the company schema
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("privato") => ProfileType::Privato,
            Some("freelance") => ProfileType::Freelance,
            _ => ProfileType::Azienda,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Privato => "privato",
            ProfileType::Freelance => "freelance",
            ProfileType::Azienda => "azienda",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentExtractionRequest {
    #[serde(default)]
    pub profile_type: Option<String>,
    #[serde(default)]
    pub document_text: String,
}

impl DocumentExtractionRequest {
    pub fn profile(&self) -> ProfileType {
        ProfileType::from_label(self.profile_type.as_deref())
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require_min_chars("document_text", &self.document_text, MIN_DOCUMENT_CHARS)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenderAnalysisRequest {
    #[serde(rename = "companyProfile", default)]
    pub company_profile: Value,
    #[serde(default)]
    pub tenders: Vec<Value>,
}

impl TenderAnalysisRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_object("companyProfile", &self.company_profile)?;
        if self.tenders.is_empty() {
            return Err(ValidationError::EmptyList("tenders"));
        }
        if self.tenders.iter().any(|t| !t.is_object()) {
            return Err(ValidationError::Invalid(
                "Ogni bando in 'tenders' deve essere un oggetto JSON".to_string(),
            ));
        }
        Ok(())
    }

    /// Tenders that will actually be sent to the model
    pub fn bounded_tenders(&self) -> &[Value] {
        &self.tenders[..self.tenders.len().min(MAX_TENDERS)]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "companyProfile", default)]
    pub company_profile: Value,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PredictionRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_object("companyProfile", &self.company_profile)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HrConsultantRequest {
    #[serde(default)]
    pub role: String,
    #[serde(rename = "contractType", default)]
    pub contract_type: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(rename = "companyContext", default)]
    pub company_context: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl HrConsultantRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_min_chars("role", &self.role, MIN_ROLE_CHARS)?;
        require_non_empty("contractType", &self.contract_type)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealityCheckRequest {
    #[serde(default)]
    pub sector: String,
    #[serde(rename = "companyContext", default)]
    pub company_context: String,
    #[serde(rename = "companyProfile", default)]
    pub company_profile: Option<Value>,
}

impl RealityCheckRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("sector", &self.sector)?;
        require_min_chars(
            "companyContext",
            &self.company_context,
            MIN_COMPANY_CONTEXT_CHARS,
        )
    }
}

/// Company figures sent by the original scoring widget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySnapshot {
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub partners: Option<f64>,
    #[serde(default)]
    pub revenue_history: Vec<Value>,
    #[serde(default)]
    pub employees_history: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyPredictRequest {
    #[serde(default)]
    pub company: CompanySnapshot,
}

impl LegacyPredictRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("company.industry", &self.company.industry)
    }
}
