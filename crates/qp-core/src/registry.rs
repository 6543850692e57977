//! Registros estáticos etiqueta humana -> identificador del toolkit.
//!
//! Son datos inmutables de proceso: arrays `&'static` indexados una vez en
//! mapas bidireccionales. Cada registro declara a qué parámetros de qué
//! acciones traduce (`bindings`); `verify_registries` compara los valores
//! contra el choice-set vivo del toolkit para esos mismos parámetros.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use once_cell::sync::Lazy;

use crate::toolkit::Toolkit;

static ALPHA_DIVERSITY_METRICS: &[(&str, &str)] = &[
    ("Abundance-based Coverage Estimator (ACE) metric", "ace"),
    ("Berger-Parker Dominance Index", "berger_parker_d"),
    ("Brillouin's index", "brillouin_d"),
    ("Chao1 confidence interval", "chao1_ci"),
    ("Chao1 index", "chao1"),
    ("Dominance measure", "dominance"),
    ("Effective Number of Species (ENS)/Probability of intra-or interspecific encounter (PIE) metric", "enspie"),
    ("Esty's confidence interval", "esty_ci"),
    ("Fisher's index", "fisher_alpha"),
    ("Gini index", "gini_index"),
    ("Good's coverage of counts", "goods_coverage"),
    ("Heip's evenness measure", "heip_e"),
    ("Kempton-Taylor Q index", "kempton_taylor_q"),
    ("Lladser confidence interval", "lladser_ci"),
    ("Lladser point estimate", "lladser_pe"),
    ("Margalef's richness index", "margalef"),
    ("McIntosh dominance index D", "mcintosh_d"),
    ("McIntosh evenness index E", "mcintosh_e"),
    ("Menhinick's richness index", "menhinick"),
    ("Michaelis-Menten fit to rarefaction curve of observed OTUs", "michaelis_menten_fit"),
    ("Number of distinct features", "observed_otus"),
    ("Number of double occurrences", "doubles"),
    ("Number of observed features, including singles and doubles", "osd"),
    ("Number of single occurrences", "singles"),
    ("Pielou's evenness", "pielou_e"),
    ("Robbins' estimator", "robbins"),
    ("Shannon's index", "shannon"),
    ("Simpson's index", "simpson"),
    ("Simpson's evenness measure E", "simpson_e"),
    ("Strong's dominance index (Dw)", "strong"),
];

static ALPHA_DIVERSITY_METRICS_PHYLOGENETIC: &[(&str, &str)] = &[("Faith's Phylogenetic Diversity", "faith_pd")];

static BETA_DIVERSITY_METRICS: &[(&str, &str)] = &[
    ("Aitchison distance", "aitchison"),
    ("Bray-Curtis dissimilarity", "braycurtis"),
    ("Canberra distance", "canberra"),
    ("Canberra distance in Adkins form", "canberra_adkins"),
    ("Chebyshev distance", "chebyshev"),
    ("City-block distance", "cityblock"),
    ("Correlation coefficient", "correlation"),
    ("Cosine Similarity", "cosine"),
    ("Dice measures", "dice"),
    ("Euclidean distance", "euclidean"),
    ("Hamming distance", "hamming"),
    ("Jaccard similarity index", "jaccard"),
    ("Jensen-Shannon distance", "jensenshannon"),
    ("Kulczynski dissimilarity index", "kulsinski"),
    ("Mahalanobis distance", "mahalanobis"),
    ("Matching components", "matching"),
    ("Rogers-Tanimoto distance", "rogerstanimoto"),
    ("Russel-Rao coefficients", "russellrao"),
    ("Sokal-Michener coefficient", "sokalmichener"),
    ("Sokal-Sneath Index", "sokalsneath"),
    ("Species-by-species Euclidean", "seuclidean"),
    ("Squared Euclidean", "sqeuclidean"),
    ("Weighted Minkowski metric", "wminkowski"),
    ("Yule index", "yule"),
];

static BETA_DIVERSITY_METRICS_PHYLOGENETIC: &[(&str, &str)] = &[
    ("Unweighted UniFrac", "unweighted_unifrac"),
    ("Weighted normalized UniFrac", "weighted_normalized_unifrac"),
    ("Weighted unnormalized UniFrac", "weighted_unifrac"),
    ("Generalized UniFrac", "generalized_unifrac"),
];

static CORRELATION_METHODS: &[(&str, &str)] = &[("Spearman", "spearman"), ("Pearson", "pearson")];

static BETA_GROUP_SIG_METHODS: &[(&str, &str)] = &[("PERMANOVA", "permanova"),
                                                   ("ANOSIM", "anosim"),
                                                   ("PERMDISP", "permdisp")];

/// Parámetro de una acción del toolkit: (plugin, acción, parámetro).
pub type ParamBinding = (&'static str, &'static str, &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Registry {
    AlphaMetrics,
    AlphaPhylogeneticMetrics,
    BetaMetrics,
    BetaPhylogeneticMetrics,
    CorrelationMethods,
    GroupSignificanceMethods,
}

struct Index {
    by_label: HashMap<&'static str, &'static str>,
    by_id: HashMap<&'static str, &'static str>,
}

static REGISTRIES: [Registry; 6] = Registry::ALL;

static INDEXES: Lazy<HashMap<Registry, Index>> = Lazy::new(|| {
    Registry::ALL.iter()
                 .map(|r| {
                     let entries = r.entries();
                     (*r,
                      Index { by_label: entries.iter().copied().collect(),
                              by_id: entries.iter().map(|(l, i)| (*i, *l)).collect() })
                 })
                 .collect()
});

impl Registry {
    pub const ALL: [Registry; 6] = [Registry::AlphaMetrics,
                                    Registry::AlphaPhylogeneticMetrics,
                                    Registry::BetaMetrics,
                                    Registry::BetaPhylogeneticMetrics,
                                    Registry::CorrelationMethods,
                                    Registry::GroupSignificanceMethods];

    pub fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Registry::AlphaMetrics => ALPHA_DIVERSITY_METRICS,
            Registry::AlphaPhylogeneticMetrics => ALPHA_DIVERSITY_METRICS_PHYLOGENETIC,
            Registry::BetaMetrics => BETA_DIVERSITY_METRICS,
            Registry::BetaPhylogeneticMetrics => BETA_DIVERSITY_METRICS_PHYLOGENETIC,
            Registry::CorrelationMethods => CORRELATION_METHODS,
            Registry::GroupSignificanceMethods => BETA_GROUP_SIG_METHODS,
        }
    }

    /// Parámetros cuyo choice-set debe coincidir exactamente con este registro.
    pub fn bindings(self) -> &'static [ParamBinding] {
        match self {
            Registry::AlphaMetrics => &[("diversity", "alpha", "metric")],
            Registry::AlphaPhylogeneticMetrics => &[("diversity", "alpha_phylogenetic", "metric")],
            Registry::BetaMetrics => &[("diversity", "beta", "metric")],
            Registry::BetaPhylogeneticMetrics => &[("diversity", "beta_phylogenetic", "metric")],
            Registry::CorrelationMethods => &[("diversity", "alpha_correlation", "method"),
                                              ("diversity", "beta_correlation", "method"),
                                              ("diversity", "mantel", "method")],
            Registry::GroupSignificanceMethods => &[("diversity", "beta_group_significance", "method")],
        }
    }

    pub fn translate(self, label: &str) -> Option<&'static str> { INDEXES.get(&self)?.by_label.get(label).copied() }

    pub fn label_for(self, id: &str) -> Option<&'static str> { INDEXES.get(&self)?.by_id.get(id).copied() }

    pub fn identifiers(self) -> BTreeSet<&'static str> { self.entries().iter().map(|(_, id)| *id).collect() }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Registry::AlphaMetrics => "alpha diversity metrics",
            Registry::AlphaPhylogeneticMetrics => "phylogenetic alpha diversity metrics",
            Registry::BetaMetrics => "beta diversity metrics",
            Registry::BetaPhylogeneticMetrics => "phylogenetic beta diversity metrics",
            Registry::CorrelationMethods => "correlation methods",
            Registry::GroupSignificanceMethods => "group significance methods",
        };
        f.write_str(name)
    }
}

/// Registros que traducen un parámetro concreto. `alpha_rarefaction.metrics`
/// acepta la unión de métricas alfa y alfa filogenéticas.
pub fn registries_for(plugin: &str, action: &str, param: &str) -> &'static [Registry] {
    match (plugin, action, param) {
        ("diversity", "alpha_rarefaction", "metrics") => &[Registry::AlphaMetrics, Registry::AlphaPhylogeneticMetrics],
        _ => {
            for r in REGISTRIES.iter() {
                if r.bindings().iter().any(|(p, a, n)| (*p, *a, *n) == (plugin, action, param)) {
                    return std::slice::from_ref(r);
                }
            }
            &[]
        }
    }
}

/// Traduce una etiqueta para un parámetro.
///
/// - `None`: ningún registro aplica al parámetro.
/// - `Some(None)`: hay registros pero la etiqueta no está en ninguno.
pub fn translate_choice(plugin: &str, action: &str, param: &str, label: &str) -> Option<Option<&'static str>> {
    let registries = registries_for(plugin, action, param);
    if registries.is_empty() {
        return None;
    }
    Some(registries.iter().find_map(|r| r.translate(label)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryMismatch {
    /// No se pudo obtener el choice-set del toolkit.
    Unavailable { registry: Registry, binding: String, reason: String },
    Differs {
        registry: Registry,
        binding: String,
        missing_in_toolkit: BTreeSet<String>,
        missing_in_registry: BTreeSet<String>,
    },
}

impl fmt::Display for RegistryMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryMismatch::Unavailable { registry, binding, reason } => {
                write!(f, "{registry} ({binding}): {reason}")
            }
            RegistryMismatch::Differs { registry,
                                        binding,
                                        missing_in_toolkit,
                                        missing_in_registry, } => {
                write!(f,
                       "{registry} ({binding}): unknown to toolkit {missing_in_toolkit:?}, missing from registry {missing_in_registry:?}")
            }
        }
    }
}

/// Compara cada registro contra el choice-set vivo de sus parámetros.
pub fn verify_registries(toolkit: &dyn Toolkit) -> Result<(), Vec<RegistryMismatch>> {
    let mut problems = Vec::new();
    for registry in Registry::ALL {
        let ours: BTreeSet<String> = registry.identifiers().into_iter().map(str::to_string).collect();
        for (plugin, action, param) in registry.bindings() {
            let binding = format!("{plugin}.{action}.{param}");
            let live = match toolkit.signature(plugin, action) {
                Ok(sig) => match sig.choices(param) {
                    Some(set) => set.clone(),
                    None => {
                        problems.push(RegistryMismatch::Unavailable { registry,
                                                                      binding,
                                                                      reason: "parameter is not choice-typed".to_string() });
                        continue;
                    }
                },
                Err(e) => {
                    problems.push(RegistryMismatch::Unavailable { registry,
                                                                  binding,
                                                                  reason: e.message });
                    continue;
                }
            };
            if live != ours {
                problems.push(RegistryMismatch::Differs { registry,
                                                          binding,
                                                          missing_in_toolkit: ours.difference(&live).cloned().collect(),
                                                          missing_in_registry: live.difference(&ours).cloned().collect() });
            }
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_identifiers_are_unique_within_each_registry() {
        for r in Registry::ALL {
            let labels: BTreeSet<_> = r.entries().iter().map(|(l, _)| *l).collect();
            assert_eq!(labels.len(), r.entries().len(), "duplicate label in {r}");
            assert_eq!(r.identifiers().len(), r.entries().len(), "duplicate identifier in {r}");
        }
    }

    #[test]
    fn translation_is_bidirectional() {
        assert_eq!(Registry::BetaMetrics.translate("Rogers-Tanimoto distance"), Some("rogerstanimoto"));
        assert_eq!(Registry::BetaMetrics.label_for("rogerstanimoto"), Some("Rogers-Tanimoto distance"));
        assert_eq!(Registry::AlphaMetrics.translate("Simpson's index"), Some("simpson"));
        assert_eq!(Registry::AlphaMetrics.translate("simpson"), None);
    }

    #[test]
    fn parameters_resolve_to_their_registries() {
        assert_eq!(registries_for("diversity", "mantel", "method"), &[Registry::CorrelationMethods]);
        assert_eq!(registries_for("diversity", "alpha_rarefaction", "metrics").len(), 2);
        assert!(registries_for("feature-table", "rarefy", "sampling_depth").is_empty());
        assert_eq!(translate_choice("diversity", "alpha_rarefaction", "metrics", "Faith's Phylogenetic Diversity"),
                   Some(Some("faith_pd")));
        assert_eq!(translate_choice("diversity", "beta", "metric", "Nope"), Some(None));
        assert_eq!(translate_choice("emperor", "plot", "custom_axes", "x"), None);
    }

    #[test]
    fn beta_correlation_methods_are_checked_under_the_command() {
        assert_eq!(registries_for("diversity", "beta_correlation", "method"), &[Registry::CorrelationMethods]);
        assert_eq!(translate_choice("diversity", "beta_correlation", "method", "Pearson"), Some(Some("pearson")));
    }

    #[test]
    fn drift_is_reported_per_binding() {
        use crate::errors::ToolkitError;
        use crate::params::ResolvedParams;
        use crate::signature::{ActionSignature, ParamSpec, ParamType};
        use crate::toolkit::ActionOutputs;

        struct Live;

        impl Toolkit for Live {
            fn signature(&self, plugin: &str, action: &str) -> Result<ActionSignature, ToolkitError> {
                let registry = Registry::ALL.into_iter()
                                            .find(|r| r.bindings().iter().any(|(p, a, _)| (*p, *a) == (plugin, action)))
                                            .ok_or_else(|| ToolkitError::preflight("unknown action"))?;
                let mut choices: BTreeSet<String> = registry.identifiers().into_iter().map(str::to_string).collect();
                if action == "beta_correlation" {
                    choices.insert("kendall".to_string());
                }
                let param = registry.bindings().iter().find(|(p, a, _)| (*p, *a) == (plugin, action)).map_or("method", |b| b.2);
                Ok(ActionSignature::new(plugin, action).param(ParamSpec::required(param, ParamType::Choice(choices))))
            }

            fn invoke(&self, _: &str, _: &str, _: &ResolvedParams) -> Result<ActionOutputs, ToolkitError> { Ok(ActionOutputs::new()) }
        }

        let problems = verify_registries(&Live).unwrap_err();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].to_string(),
                   "correlation methods (diversity.beta_correlation.method): unknown to toolkit {}, missing from registry {\"kendall\"}");
    }
}
