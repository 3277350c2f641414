//! Wire types for the validation API
//!
//! The backend has shipped two response generations for `/api/validate`:
//! the current "agentic" shape (verdict, risk signals, per-critic map) and
//! the legacy flat shape (summary/strengths/concerns/next_steps). Both are
//! modelled as one tagged union resolved once at parse time, so rendering
//! never has to sniff fields ad hoc. Unknown or missing optional fields are
//! tolerated, never rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fully parsed validation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub thread_id: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The two response generations. Serde tries the agentic shape first;
/// `verdict` is required there, so a legacy body falls through cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Agentic {
        #[serde(default, rename = "neutralIdea", alias = "neutral_idea")]
        neutral_idea: String,
        verdict: String,
        #[serde(default)]
        assumptions: String,
        #[serde(default, rename = "riskSignals", alias = "risk_signals")]
        risk_signals: Option<RiskSignals>,
        #[serde(default)]
        critics: Option<BTreeMap<String, String>>,
    },
    Legacy {
        summary: String,
        #[serde(default)]
        strengths: Vec<String>,
        #[serde(default)]
        concerns: Vec<String>,
        #[serde(default)]
        next_steps: Vec<String>,
        #[serde(default)]
        analysis: Option<String>,
    },
}

/// Structured risk indicators extracted from the critic texts.
/// Every sub-field defaults to empty when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskSignals {
    #[serde(default, rename = "topThemes", alias = "top_themes")]
    pub top_themes: Vec<ThemeSignal>,
    #[serde(
        default,
        rename = "highConfidenceRisks",
        alias = "high_confidence_risks"
    )]
    pub high_confidence_risks: Vec<RiskEntry>,
    #[serde(default, rename = "confidenceNote", alias = "confidence_note")]
    pub confidence_note: Option<String>,
    #[serde(default)]
    pub threshold: Option<u32>,
}

/// A theme several critics converged on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSignal {
    pub label: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub personas: Vec<String>,
}

/// A single high-confidence risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub label: String,
    #[serde(default)]
    pub count: u32,
}

/// One answered follow-up question on an existing thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpExchange {
    pub thread_id: String,
    #[serde(default)]
    pub question: String,
    pub answer: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub backboard_connected: bool,
}

/// `GET /api/history/{thread_id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadHistory {
    pub thread_id: String,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

impl Outcome {
    pub fn is_agentic(&self) -> bool {
        matches!(self, Outcome::Agentic { .. })
    }
}
