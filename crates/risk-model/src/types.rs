//! Result types returned by the risk service.
//!
//! - [`RiskAssessment`]: Outcome of [`RiskService::assess()`](crate::RiskService::assess)
//! - [`RiskAction`]: Business action attached to the decision
//! - [`FinancialImpact`]: Cost/benefit of intervening

use serde::{Deserialize, Serialize};

use crate::features::RiskFeatures;

/// Expected cost of a crisis episode, in dollars.
pub const CRISIS_COST: u32 = 2_673;

/// Cost of one wellness check, in dollars.
pub const INTERVENTION_COST: u32 = 200;

/// Business action for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    /// Recommend a wellness check and alert the parents.
    TriggerWellnessCheck,
    NoActionNeeded,
}

impl RiskAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TriggerWellnessCheck => "Trigger Wellness Check",
            Self::NoActionNeeded => "No Action Needed",
        }
    }
}

/// Dollar impact of a decision.
///
/// Zero across the board when no intervention is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialImpact {
    pub crisis_cost: u32,
    pub intervention_cost: u32,
    pub net_savings: u32,
}

impl FinancialImpact {
    pub fn for_decision(is_high_risk: bool) -> Self {
        if is_high_risk {
            Self {
                crisis_cost: CRISIS_COST,
                intervention_cost: INTERVENTION_COST,
                net_savings: CRISIS_COST - INTERVENTION_COST,
            }
        } else {
            Self {
                crisis_cost: 0,
                intervention_cost: 0,
                net_savings: 0,
            }
        }
    }
}

/// Outcome of scoring one feature set against the decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Predicted probability of the high-risk class, in `[0, 1]`.
    pub probability: f64,
    pub threshold: f64,
    /// `probability >= threshold`
    pub is_high_risk: bool,
    pub usage_to_sleep_ratio: f64,
    pub checks_per_app: f64,
    pub action: RiskAction,
    pub financial_impact: FinancialImpact,
    /// Plain-language summary of the inputs behind the prediction.
    pub explanation: String,
}

impl RiskAssessment {
    pub fn new(probability: f64, threshold: f64, features: &RiskFeatures) -> Self {
        let is_high_risk = probability >= threshold;
        let action = if is_high_risk {
            RiskAction::TriggerWellnessCheck
        } else {
            RiskAction::NoActionNeeded
        };

        Self {
            probability,
            threshold,
            is_high_risk,
            usage_to_sleep_ratio: features.usage_to_sleep_ratio(),
            checks_per_app: features.checks_per_app(),
            action,
            financial_impact: FinancialImpact::for_decision(is_high_risk),
            explanation: format!(
                "This teen uses their phone {} hours/day and checks it {} times. \
                 Their Usage-to-Sleep ratio is {:.2}.",
                features.daily_usage_hours,
                features.phone_checks_per_day,
                features.usage_to_sleep_ratio()
            ),
        }
    }
}

/// Format a dollar amount with thousands separators, e.g. `$2,673`.
pub fn format_dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}
