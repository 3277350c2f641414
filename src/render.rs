//! Result Renderer
//!
//! Pure mapping from a parsed `ValidationResult` to the `DisplayModel`
//! the screens draw from. Tolerates every optional field being absent;
//! the markdown-to-styled-text pass happens later, at draw time, and is
//! allowed to fall back to raw text.

use crate::model::{Outcome, ValidationResult};

const SUMMARY_PLACEHOLDER: &str = "Analysis complete. See the detailed breakdown below.";
const STRENGTHS_PLACEHOLDER: &str = "No recurring themes identified.";
const NO_RISKS_PLACEHOLDER: &str = "No high-confidence risks detected.";
const NEXT_STEPS_PLACEHOLDER: &str = "See the detailed analysis for recommendations.";

/// Display-ready projection of a validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub summary: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub next_steps: Vec<String>,
    /// `(heading, markdown body)` pairs for the detailed analysis block.
    pub detail_sections: Vec<(String, String)>,
}

/// Map a result to its display model. Pure; no I/O.
pub fn render(result: &ValidationResult) -> DisplayModel {
    match &result.outcome {
        Outcome::Agentic {
            neutral_idea,
            verdict,
            assumptions,
            risk_signals,
            critics,
        } => {
            let strengths = match risk_signals {
                Some(signals) if !signals.top_themes.is_empty() => signals
                    .top_themes
                    .iter()
                    .map(|t| format!("{}: Mentioned by {} critics", t.label, t.count))
                    .collect(),
                _ => vec![STRENGTHS_PLACEHOLDER.to_string()],
            };

            let concerns = match risk_signals {
                Some(signals) => {
                    if signals.high_confidence_risks.is_empty() {
                        vec![NO_RISKS_PLACEHOLDER.to_string()]
                    } else {
                        signals
                            .high_confidence_risks
                            .iter()
                            .map(|r| format!("{} (High Confidence)", r.label))
                            .collect()
                    }
                }
                None => vec![NO_RISKS_PLACEHOLDER.to_string()],
            };

            let next_steps = match critics {
                Some(map) if !map.is_empty() => map
                    .iter()
                    .map(|(role, text)| format!("{}: {}", role_title(role), first_line(text)))
                    .collect(),
                _ => vec![NEXT_STEPS_PLACEHOLDER.to_string()],
            };

            let mut detail_sections = Vec::new();
            if !neutral_idea.is_empty() {
                detail_sections.push(("Neutral Restatement".to_string(), neutral_idea.clone()));
            }
            if !assumptions.is_empty() {
                detail_sections.push(("Hidden Assumptions".to_string(), assumptions.clone()));
            }
            if let Some(map) = critics {
                for (role, text) in map {
                    detail_sections.push((role_title(role), text.clone()));
                }
            }

            DisplayModel {
                summary: if verdict.is_empty() {
                    SUMMARY_PLACEHOLDER.to_string()
                } else {
                    verdict.clone()
                },
                strengths,
                concerns,
                next_steps,
                detail_sections,
            }
        }
        Outcome::Legacy {
            summary,
            strengths,
            concerns,
            next_steps,
            analysis,
        } => {
            let mut detail_sections = Vec::new();
            if let Some(analysis) = analysis {
                if !analysis.is_empty() {
                    detail_sections.push(("Full Analysis".to_string(), analysis.clone()));
                }
            }
            DisplayModel {
                summary: if summary.is_empty() {
                    SUMMARY_PLACEHOLDER.to_string()
                } else {
                    summary.clone()
                },
                strengths: list_or_placeholder(strengths, STRENGTHS_PLACEHOLDER),
                concerns: list_or_placeholder(concerns, NO_RISKS_PLACEHOLDER),
                next_steps: list_or_placeholder(next_steps, NEXT_STEPS_PLACEHOLDER),
                detail_sections,
            }
        }
    }
}

fn list_or_placeholder(items: &[String], placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items.to_vec()
    }
}

/// First line of a critic's text, leading bullet stripped.
fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.strip_prefix("- ").unwrap_or(l))
        .unwrap_or("")
        .to_string()
}

/// "vc" → "VC", anything else gets its first letter upper-cased.
fn role_title(role: &str) -> String {
    if role.eq_ignore_ascii_case("vc") {
        return "VC".to_string();
    }
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
