use serde::{Deserialize, Serialize};

/// Personal attributes extracted from the onboarding conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub employment: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
}

/// Investment preferences stated by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub risk_tolerance: Option<String>,
    #[serde(default)]
    pub investment_goals: Option<Vec<String>>,
    #[serde(default)]
    pub time_horizon: Option<String>,
}

/// Structured profile handed to the scorer. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedData {
    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
}

impl ParsedData {
    pub(crate) fn income(&self) -> Option<f64> {
        self.personal_info.as_ref().and_then(|info| info.income)
    }

    pub(crate) fn employment(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .and_then(|info| info.employment.as_deref())
    }

    pub(crate) fn age(&self) -> Option<u32> {
        self.personal_info.as_ref().and_then(|info| info.age)
    }

    pub(crate) fn risk_tolerance(&self) -> Option<&str> {
        self.preferences
            .as_ref()
            .and_then(|prefs| prefs.risk_tolerance.as_deref())
    }

    pub(crate) fn flag_count(&self) -> usize {
        self.flags.as_ref().map_or(0, Vec::len)
    }
}

/// Inbound scoring request as sent by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub user_id: String,
    pub parsed_data: ParsedData,
}

/// Reasons a syntactically valid request is still rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("parsedData.personalInfo.income must be a finite, non-negative number")]
    InvalidIncome,
}

impl ScoreRequest {
    /// Checks the constraints the JSON shape alone cannot express.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        match self.parsed_data.income() {
            Some(income) if !income.is_finite() || income < 0.0 => {
                Err(RequestValidationError::InvalidIncome)
            }
            _ => Ok(()),
        }
    }
}

/// Public response body for a computed score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub explanation: String,
}
