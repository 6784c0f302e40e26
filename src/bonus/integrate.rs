//! Tier 10: integration and cross-validation
//!
//! Sums the tier 7–9 sub-bonuses, derives an availability-weighted
//! confidence, measures sign agreement across the non-zero signals, and
//! composes the templated recommendation. Sub-bonus caps are enforced by
//! the individual calculators before aggregation ever sees them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bonus::{tier7, tier8, tier9};
use crate::error::Result;
use crate::models::{EventType, SajuProfile};
use crate::western::WesternTimingData;

/// One sub-calculator's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubScore {
    pub bonus: f64,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub penalties: Vec<String>,
}

/// Tier 7 outputs. Hourly is present only when a target hour was given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier7Result {
    pub daily: SubScore,
    pub hourly: Option<SubScore>,
}

/// Tier 8 outputs; absent entirely without Western data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tier8Result {
    pub solar_return: Option<SubScore>,
    pub lunar_return: Option<SubScore>,
    pub eclipse: Option<SubScore>,
}

/// Tier 9 outputs. Yongsin depth sits behind its own error boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier9Result {
    pub geokguk: SubScore,
    pub yongsin: Option<SubScore>,
}

/// Agreement metric across the non-zero sub-bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossValidation {
    /// Fraction of non-zero sub-bonuses sharing the majority sign.
    pub agreement: f64,
    /// Tier pairs whose signs disagree.
    pub conflicts: Vec<(String, String)>,
}

/// Complete integrated result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedScoreResult {
    pub tier7: Tier7Result,
    pub tier8: Tier8Result,
    pub tier9: Tier9Result,
    pub total_bonus: f64,
    pub confidence: f64,
    pub cross_validation: CrossValidation,
    pub recommendation: String,
}

/// Presentation-ready summary: reasons truncated to 5, penalties to 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusSummary {
    pub total: f64,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub penalties: Vec<String>,
    pub recommendation: String,
}

/// Inputs for a bonus calculation.
#[derive(Debug, Clone, Copy)]
pub struct BonusInput<'a> {
    pub profile: &'a SajuProfile,
    pub western: Option<&'a WesternTimingData>,
    /// Target hour 0-23, enabling the hourly tier.
    pub target_hour: Option<u32>,
}

fn favorability_label(total: f64) -> &'static str {
    if total >= 15.0 {
        "very favorable"
    } else if total >= 5.0 {
        "favorable"
    } else if total > -5.0 {
        "neutral"
    } else if total > -15.0 {
        "calls for caution"
    } else {
        "unfavorable"
    }
}

/// Run every tier and integrate.
pub fn integrate_tiers(
    input: &BonusInput<'_>,
    event: EventType,
    year: i32,
    month: u32,
    day: Option<u32>,
) -> Result<IntegratedScoreResult> {
    // Tier 7. The daily calculator is structural: a bad target date is
    // caller error and fails fast. Missing day falls back to mid-month.
    let daily = tier7::daily_bonus(input.profile, event, year, month, day.unwrap_or(15))?;
    let hourly = match input.target_hour {
        Some(hour) => match tier7::hourly_bonus(input.profile, event, hour) {
            Ok(score) => Some(score),
            Err(err) => {
                warn!(%err, "hourly tier skipped");
                None
            }
        },
        None => None,
    };

    // Tier 8 is entirely optional Western context.
    let tier8 = match input.western {
        Some(western) => Tier8Result {
            solar_return: tier8::solar_return_bonus(western.solar_return.as_ref(), event),
            lunar_return: tier8::lunar_return_bonus(western.lunar_return.as_ref(), event),
            eclipse: tier8::eclipse_bonus(western.eclipse.as_ref(), event),
        },
        None => Tier8Result::default(),
    };

    // Tier 9. Yongsin depth touches the solar-term tables, so it runs
    // behind its own boundary; the pattern affinity cannot fail.
    let geokguk = tier9::geokguk_bonus(input.profile, event);
    let yongsin = match tier9::yongsin_depth_bonus(input.profile, year, month) {
        Ok(score) => Some(score),
        Err(err) => {
            warn!(%err, "yongsin depth skipped");
            None
        }
    };

    let tier7 = Tier7Result { daily, hourly };
    let tier9 = Tier9Result { geokguk, yongsin };

    let subs: Vec<(&str, Option<&SubScore>)> = vec![
        ("tier7.daily", Some(&tier7.daily)),
        ("tier7.hourly", tier7.hourly.as_ref()),
        ("tier8.solar_return", tier8.solar_return.as_ref()),
        ("tier8.lunar_return", tier8.lunar_return.as_ref()),
        ("tier8.eclipse", tier8.eclipse.as_ref()),
        ("tier9.geokguk", Some(&tier9.geokguk)),
        ("tier9.yongsin", tier9.yongsin.as_ref()),
    ];

    let available: Vec<(&str, &SubScore)> = subs
        .into_iter()
        .filter_map(|(name, score)| score.map(|s| (name, s)))
        .collect();

    let total_bonus: f64 = available.iter().map(|(_, s)| s.bonus).sum();
    let confidence = if available.is_empty() {
        0.0
    } else {
        available.iter().map(|(_, s)| s.confidence).sum::<f64>() / available.len() as f64
    };

    let signed: Vec<(&str, f64)> = available
        .iter()
        .filter(|(_, s)| s.bonus != 0.0)
        .map(|&(name, s)| (name, s.bonus))
        .collect();

    let agreement = if signed.len() <= 1 {
        1.0
    } else {
        let positive = signed.iter().filter(|(_, b)| *b > 0.0).count();
        let majority = positive.max(signed.len() - positive);
        majority as f64 / signed.len() as f64
    };

    let mut conflicts = Vec::new();
    for i in 0..signed.len() {
        for j in (i + 1)..signed.len() {
            if signed[i].1.signum() != signed[j].1.signum() {
                conflicts.push((signed[i].0.to_string(), signed[j].0.to_string()));
            }
        }
    }

    let recommendation = format!(
        "The {year}-{month:02} window for a {} is {} (bonus {:+.1}, agreement {:.0}%).",
        event.label(),
        favorability_label(total_bonus),
        total_bonus,
        agreement * 100.0
    );

    debug!(
        total_bonus,
        confidence,
        agreement,
        conflicts = conflicts.len(),
        "tiers integrated"
    );

    Ok(IntegratedScoreResult {
        tier7,
        tier8,
        tier9,
        total_bonus,
        confidence,
        cross_validation: CrossValidation {
            agreement,
            conflicts,
        },
        recommendation,
    })
}

/// External entry point: integrate and shape for presentation. Reasons are
/// truncated to 5 entries and penalties to 3.
pub fn calculate_tier7_to10_bonus(
    input: &BonusInput<'_>,
    event: EventType,
    year: i32,
    month: u32,
    day: Option<u32>,
) -> Result<BonusSummary> {
    let result = integrate_tiers(input, event, year, month, day)?;

    let mut reasons = Vec::new();
    let mut penalties = Vec::new();
    let mut collect = |score: &SubScore| {
        reasons.extend(score.reasons.iter().cloned());
        penalties.extend(score.penalties.iter().cloned());
    };

    collect(&result.tier7.daily);
    if let Some(s) = &result.tier7.hourly {
        collect(s);
    }
    for s in [
        result.tier8.solar_return.as_ref(),
        result.tier8.lunar_return.as_ref(),
        result.tier8.eclipse.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        collect(s);
    }
    collect(&result.tier9.geokguk);
    if let Some(s) = &result.tier9.yongsin {
        collect(s);
    }

    reasons.truncate(5);
    penalties.truncate(3);

    Ok(BonusSummary {
        total: result.total_bonus,
        confidence: result.confidence,
        reasons,
        penalties,
        recommendation: result.recommendation,
    })
}
