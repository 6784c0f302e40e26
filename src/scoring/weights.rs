//! Dynamic layer-weight calculator
//!
//! Computes the 10-dimension layer-weight vector used by the fortune
//! snapshot scoring. Starting from per-layer defaults, multiplicative
//! modifiers apply in a fixed order: chart pattern, favorable element,
//! query domain, active transits. All modifiers compound and the final
//! vector is clamped per-layer to [0.3, 1.5]. Every step is recorded so
//! callers can explain the resulting emphasis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Element, Geokguk};

pub const MIN_WEIGHT: f64 = 0.3;
pub const MAX_WEIGHT: f64 = 1.5;

/// The ten analysis layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightLayer {
    ElementCore,
    Stem,
    Branch,
    HiddenStem,
    TenGod,
    Shinsal,
    Daeun,
    Annual,
    Monthly,
    Daily,
}

impl WeightLayer {
    pub const ALL: [WeightLayer; 10] = [
        WeightLayer::ElementCore,
        WeightLayer::Stem,
        WeightLayer::Branch,
        WeightLayer::HiddenStem,
        WeightLayer::TenGod,
        WeightLayer::Shinsal,
        WeightLayer::Daeun,
        WeightLayer::Annual,
        WeightLayer::Monthly,
        WeightLayer::Daily,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeightLayer::ElementCore => "element_core",
            WeightLayer::Stem => "stem",
            WeightLayer::Branch => "branch",
            WeightLayer::HiddenStem => "hidden_stem",
            WeightLayer::TenGod => "ten_god",
            WeightLayer::Shinsal => "shinsal",
            WeightLayer::Daeun => "daeun",
            WeightLayer::Annual => "annual",
            WeightLayer::Monthly => "monthly",
            WeightLayer::Daily => "daily",
        }
    }
}

/// Query domain: what the caller is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDomain {
    Career,
    Wealth,
    Love,
    Health,
    Study,
    Move,
    Overall,
}

impl QueryDomain {
    pub const ALL: [QueryDomain; 7] = [
        QueryDomain::Career,
        QueryDomain::Wealth,
        QueryDomain::Love,
        QueryDomain::Health,
        QueryDomain::Study,
        QueryDomain::Move,
        QueryDomain::Overall,
    ];
}

/// Active Western transits feeding the timing layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transit {
    SolarReturn,
    LunarReturn,
    SaturnReturn,
    JupiterReturn,
    Eclipse,
    MercuryRetrograde,
}

/// Domains a transit amplifies, used by callers routing domain boosts.
pub fn boosted_domains(transit: Transit) -> &'static [QueryDomain] {
    match transit {
        Transit::SolarReturn => &[QueryDomain::Overall, QueryDomain::Career],
        Transit::LunarReturn => &[QueryDomain::Love, QueryDomain::Health],
        Transit::SaturnReturn => &[QueryDomain::Career, QueryDomain::Overall],
        Transit::JupiterReturn => &[QueryDomain::Wealth, QueryDomain::Study],
        Transit::Eclipse => &[QueryDomain::Move, QueryDomain::Love],
        Transit::MercuryRetrograde => &[QueryDomain::Study, QueryDomain::Move],
    }
}

/// The 10 layer weights. Serialized as a named map, not a bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerWeights {
    pub element_core: f64,
    pub stem: f64,
    pub branch: f64,
    pub hidden_stem: f64,
    pub ten_god: f64,
    pub shinsal: f64,
    pub daeun: f64,
    pub annual: f64,
    pub monthly: f64,
    pub daily: f64,
}

impl Default for LayerWeights {
    fn default() -> Self {
        Self {
            element_core: 1.0,
            stem: 1.0,
            branch: 1.0,
            hidden_stem: 0.8,
            ten_god: 1.0,
            shinsal: 0.7,
            daeun: 1.0,
            annual: 1.0,
            monthly: 0.9,
            daily: 0.8,
        }
    }
}

impl LayerWeights {
    pub fn get(&self, layer: WeightLayer) -> f64 {
        match layer {
            WeightLayer::ElementCore => self.element_core,
            WeightLayer::Stem => self.stem,
            WeightLayer::Branch => self.branch,
            WeightLayer::HiddenStem => self.hidden_stem,
            WeightLayer::TenGod => self.ten_god,
            WeightLayer::Shinsal => self.shinsal,
            WeightLayer::Daeun => self.daeun,
            WeightLayer::Annual => self.annual,
            WeightLayer::Monthly => self.monthly,
            WeightLayer::Daily => self.daily,
        }
    }

    fn get_mut(&mut self, layer: WeightLayer) -> &mut f64 {
        match layer {
            WeightLayer::ElementCore => &mut self.element_core,
            WeightLayer::Stem => &mut self.stem,
            WeightLayer::Branch => &mut self.branch,
            WeightLayer::HiddenStem => &mut self.hidden_stem,
            WeightLayer::TenGod => &mut self.ten_god,
            WeightLayer::Shinsal => &mut self.shinsal,
            WeightLayer::Daeun => &mut self.daeun,
            WeightLayer::Annual => &mut self.annual,
            WeightLayer::Monthly => &mut self.monthly,
            WeightLayer::Daily => &mut self.daily,
        }
    }

    pub fn total(&self) -> f64 {
        WeightLayer::ALL.iter().map(|&l| self.get(l)).sum()
    }
}

/// One recorded calculation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightStep {
    pub step: String,
    pub reason: String,
}

/// Final weights plus the step log that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightResult {
    pub weights: LayerWeights,
    pub steps: Vec<WeightStep>,
}

/// Top/bottom layers and total weight for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSummary {
    pub top: Vec<(String, f64)>,
    pub bottom: Vec<(String, f64)>,
    pub total: f64,
}

/// Layers a chart pattern emphasizes, with its boost factor.
fn geokguk_boosts(geokguk: Geokguk) -> &'static [(WeightLayer, f64)] {
    match geokguk {
        Geokguk::BiGyeon | Geokguk::GeopJae => &[(WeightLayer::Stem, 1.08)],
        Geokguk::SikSin => &[(WeightLayer::HiddenStem, 1.1), (WeightLayer::TenGod, 1.05)],
        Geokguk::SangGwan => &[(WeightLayer::TenGod, 1.1)],
        Geokguk::PyeonJae | Geokguk::JeongJae => {
            &[(WeightLayer::Annual, 1.08), (WeightLayer::TenGod, 1.05)]
        }
        Geokguk::PyeonGwan | Geokguk::JeongGwan => {
            &[(WeightLayer::TenGod, 1.1), (WeightLayer::Daeun, 1.05)]
        }
        Geokguk::PyeonIn | Geokguk::JeongIn => {
            &[(WeightLayer::ElementCore, 1.08), (WeightLayer::HiddenStem, 1.05)]
        }
        Geokguk::GeonRok => &[(WeightLayer::Branch, 1.1), (WeightLayer::Stem, 1.05)],
        Geokguk::YangIn => &[(WeightLayer::Branch, 1.1), (WeightLayer::Shinsal, 1.05)],
    }
}

/// Layers a query domain emphasizes.
fn domain_boosts(domain: QueryDomain) -> &'static [(WeightLayer, f64)] {
    match domain {
        QueryDomain::Career => &[(WeightLayer::TenGod, 1.15), (WeightLayer::Daeun, 1.1)],
        QueryDomain::Wealth => &[(WeightLayer::ElementCore, 1.15), (WeightLayer::Annual, 1.1)],
        QueryDomain::Love => &[(WeightLayer::Branch, 1.15), (WeightLayer::Shinsal, 1.1)],
        QueryDomain::Health => &[(WeightLayer::ElementCore, 1.15), (WeightLayer::HiddenStem, 1.1)],
        QueryDomain::Study => &[(WeightLayer::TenGod, 1.1), (WeightLayer::Monthly, 1.1)],
        QueryDomain::Move => &[(WeightLayer::Shinsal, 1.1), (WeightLayer::Daily, 1.15)],
        QueryDomain::Overall => &[(WeightLayer::Stem, 1.05)],
    }
}

/// Timing layers a transit boosts.
fn transit_boosts(transit: Transit) -> &'static [(WeightLayer, f64)] {
    match transit {
        Transit::SolarReturn => &[(WeightLayer::Annual, 1.1)],
        Transit::LunarReturn => &[(WeightLayer::Monthly, 1.1)],
        Transit::SaturnReturn => &[(WeightLayer::Daeun, 1.1)],
        Transit::JupiterReturn => &[(WeightLayer::Annual, 1.08)],
        Transit::Eclipse => &[(WeightLayer::Daily, 1.1), (WeightLayer::Monthly, 1.05)],
        Transit::MercuryRetrograde => &[(WeightLayer::Daily, 1.05)],
    }
}

fn apply(
    weights: &mut LayerWeights,
    steps: &mut Vec<WeightStep>,
    boosts: &[(WeightLayer, f64)],
    step: &str,
    reason: String,
) {
    for &(layer, factor) in boosts {
        *weights.get_mut(layer) *= factor;
    }
    steps.push(WeightStep {
        step: step.to_string(),
        reason,
    });
}

/// Compute the layer-weight vector for a query.
pub fn calculate_weights(
    geokguk: Geokguk,
    yongsin: &[Element],
    domain: QueryDomain,
    transits: &[Transit],
) -> WeightResult {
    let mut weights = LayerWeights::default();
    let mut steps = vec![WeightStep {
        step: "init".to_string(),
        reason: "default layer weights".to_string(),
    }];

    apply(
        &mut weights,
        &mut steps,
        geokguk_boosts(geokguk),
        "geokguk",
        format!("{} pattern emphasis", geokguk.korean()),
    );

    if let Some(&element) = yongsin.first() {
        apply(
            &mut weights,
            &mut steps,
            &[(WeightLayer::ElementCore, 1.1)],
            "yongsin",
            format!("favorable element {} strengthens the element core", element),
        );
    }

    apply(
        &mut weights,
        &mut steps,
        domain_boosts(domain),
        "domain",
        format!("{:?} query emphasis", domain),
    );

    for &transit in transits {
        apply(
            &mut weights,
            &mut steps,
            transit_boosts(transit),
            "transit",
            format!(
                "{:?} active; boosted domains: {:?}",
                transit,
                boosted_domains(transit)
            ),
        );
    }

    for layer in WeightLayer::ALL {
        let w = weights.get_mut(layer);
        *w = w.clamp(MIN_WEIGHT, MAX_WEIGHT);
    }
    steps.push(WeightStep {
        step: "normalize".to_string(),
        reason: format!("clamped per-layer to [{MIN_WEIGHT}, {MAX_WEIGHT}]"),
    });

    debug!(total = weights.total(), steps = steps.len(), "weights computed");
    WeightResult { weights, steps }
}

impl WeightResult {
    /// Top-3 and bottom-3 layers plus total weight.
    pub fn summary(&self) -> WeightSummary {
        let mut ranked: Vec<(String, f64)> = WeightLayer::ALL
            .iter()
            .map(|&l| (l.name().to_string(), self.weights.get(l)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        WeightSummary {
            top: ranked.iter().take(3).cloned().collect(),
            bottom: ranked.iter().rev().take(3).cloned().collect(),
            total: self.weights.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_clamped_for_all_combinations() {
        let all_geokguk = [
            Geokguk::BiGyeon,
            Geokguk::GeopJae,
            Geokguk::SikSin,
            Geokguk::SangGwan,
            Geokguk::PyeonJae,
            Geokguk::JeongJae,
            Geokguk::PyeonGwan,
            Geokguk::JeongGwan,
            Geokguk::PyeonIn,
            Geokguk::JeongIn,
            Geokguk::GeonRok,
            Geokguk::YangIn,
        ];
        let all_transits = [
            Transit::SolarReturn,
            Transit::LunarReturn,
            Transit::SaturnReturn,
            Transit::JupiterReturn,
            Transit::Eclipse,
            Transit::MercuryRetrograde,
        ];

        for geokguk in all_geokguk {
            for domain in QueryDomain::ALL {
                for element in Element::ALL {
                    let result =
                        calculate_weights(geokguk, &[element], domain, &all_transits);
                    for layer in WeightLayer::ALL {
                        let w = result.weights.get(layer);
                        assert!(
                            (MIN_WEIGHT..=MAX_WEIGHT).contains(&w),
                            "{geokguk:?}/{domain:?}/{element:?} pushed {layer:?} to {w}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_steps_include_init_and_normalize() {
        let result = calculate_weights(
            Geokguk::JeongGwan,
            &[Element::Water],
            QueryDomain::Career,
            &[],
        );
        assert_eq!(result.steps.first().unwrap().step, "init");
        assert_eq!(result.steps.last().unwrap().step, "normalize");
        // geokguk + yongsin + domain in between.
        assert_eq!(result.steps.len(), 5);
    }

    #[test]
    fn test_modifiers_compound() {
        let without = calculate_weights(Geokguk::JeongGwan, &[], QueryDomain::Overall, &[]);
        let with = calculate_weights(Geokguk::JeongGwan, &[], QueryDomain::Career, &[]);
        // Career boosts ten_god on top of the pattern boost.
        assert!(with.weights.ten_god > without.weights.ten_god);
    }

    #[test]
    fn test_transit_boosts_timing_layer() {
        let base = calculate_weights(Geokguk::SikSin, &[], QueryDomain::Overall, &[]);
        let with = calculate_weights(
            Geokguk::SikSin,
            &[],
            QueryDomain::Overall,
            &[Transit::LunarReturn],
        );
        assert!(with.weights.monthly > base.weights.monthly);
    }

    #[test]
    fn test_summary_shape() {
        let result = calculate_weights(
            Geokguk::JeongJae,
            &[Element::Metal],
            QueryDomain::Wealth,
            &[Transit::SolarReturn],
        );
        let summary = result.summary();
        assert_eq!(summary.top.len(), 3);
        assert_eq!(summary.bottom.len(), 3);
        assert!(summary.top[0].1 >= summary.top[1].1);
        assert!((summary.total - result.weights.total()).abs() < 1e-9);
    }

    #[test]
    fn test_boosted_domains_lookup() {
        assert!(boosted_domains(Transit::JupiterReturn).contains(&QueryDomain::Wealth));
        assert!(boosted_domains(Transit::Eclipse).contains(&QueryDomain::Move));
    }
}
