//! Comparing every locale dictionary against the master dictionary.
//!
//! For each non-master locale the differ reports keys missing from the
//! locale, keys the master does not have, `{variable}` placeholders that were
//! lost or invented, differences in allowed tag counts and any disallowed or
//! malformed markup. Only non-empty categories are recorded, and a locale with
//! no problems does not appear in the report at all.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{
    features::{
        DictionaryFeatures, StringFeatures, TagKind, extract_dictionary_features,
        missing_from_list,
    },
    locales::LocaleDictionary,
};

/// A `(locale, key)` pair whose tag checks are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TagCheckExemption {
    pub locale: String,
    pub key: String,
}

/// Problems found in one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleIssues {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_keys: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_keys: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub missing_variables: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_variables: BTreeMap<String, Vec<String>>,
    /// Master count minus locale count, per key, when non-zero.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub missing_b_tags: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub missing_br_tags: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub missing_span_tags: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub disallowed_tags: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub improper_tags: BTreeMap<String, usize>,
}

impl LocaleIssues {
    pub fn is_empty(&self) -> bool {
        !self.has_key_problems() && !self.has_variable_problems() && !self.has_tag_problems()
    }

    pub fn has_key_problems(&self) -> bool {
        !self.missing_keys.is_empty() || !self.additional_keys.is_empty()
    }

    pub fn has_variable_problems(&self) -> bool {
        !self.missing_variables.is_empty() || !self.additional_variables.is_empty()
    }

    pub fn has_tag_problems(&self) -> bool {
        !self.missing_b_tags.is_empty()
            || !self.missing_br_tags.is_empty()
            || !self.missing_span_tags.is_empty()
            || !self.disallowed_tags.is_empty()
            || !self.improper_tags.is_empty()
    }

    /// Number of individual findings across all categories.
    pub fn problem_count(&self) -> usize {
        self.missing_keys.len()
            + self.additional_keys.len()
            + self.missing_variables.len()
            + self.additional_variables.len()
            + self.missing_b_tags.len()
            + self.missing_br_tags.len()
            + self.missing_span_tags.len()
            + self.disallowed_tags.len()
            + self.improper_tags.len()
    }

    pub fn tag_deltas(&self, kind: TagKind) -> &BTreeMap<String, i64> {
        match kind {
            TagKind::B => &self.missing_b_tags,
            TagKind::Br => &self.missing_br_tags,
            TagKind::Span => &self.missing_span_tags,
        }
    }

    fn tag_deltas_mut(&mut self, kind: TagKind) -> &mut BTreeMap<String, i64> {
        match kind {
            TagKind::B => &mut self.missing_b_tags,
            TagKind::Br => &mut self.missing_br_tags,
            TagKind::Span => &mut self.missing_span_tags,
        }
    }
}

/// Locale name to its problems. Locales without problems are absent.
pub type IssueReport = BTreeMap<String, LocaleIssues>;

/// Locale name to key to the legacy `$name$` placeholders it still uses.
pub type LegacyTokenReport = BTreeMap<String, BTreeMap<String, Vec<String>>>;

pub struct DictionaryDiffer<'a> {
    master: &'a LocaleDictionary,
    master_features: DictionaryFeatures,
    exemptions: HashSet<(&'a str, &'a str)>,
}

impl<'a> DictionaryDiffer<'a> {
    pub fn new(master: &'a LocaleDictionary, exemptions: &'a [TagCheckExemption]) -> Self {
        Self {
            master,
            master_features: extract_dictionary_features(master),
            exemptions: exemptions
                .iter()
                .map(|e| (e.locale.as_str(), e.key.as_str()))
                .collect(),
        }
    }

    /// Compare each locale against the master; problem-free locales are left out.
    pub fn diff_all<'d>(
        &self,
        locales: impl IntoIterator<Item = &'d LocaleDictionary>,
    ) -> IssueReport {
        locales
            .into_iter()
            .filter(|dictionary| dictionary.locale != self.master.locale)
            .filter_map(|dictionary| {
                let issues = self.diff_locale(dictionary);
                tracing::debug!(
                    locale = %dictionary.locale,
                    problems = issues.problem_count(),
                    "compared locale"
                );
                (!issues.is_empty()).then(|| (dictionary.locale.clone(), issues))
            })
            .collect()
    }

    pub fn diff_locale(&self, locale: &LocaleDictionary) -> LocaleIssues {
        let mut issues = LocaleIssues {
            missing_keys: self
                .master
                .keys()
                .filter(|key| !locale.contains_key(key))
                .map(String::from)
                .collect(),
            additional_keys: locale
                .keys()
                .filter(|key| !self.master.contains_key(key))
                .map(String::from)
                .collect(),
            ..Default::default()
        };

        for entry in locale.entries() {
            let Some(master_features) = self.master_features.get(&entry.key) else {
                continue;
            };
            let features = StringFeatures::extract(&entry.value);
            let key = &entry.key;

            let missing = missing_from_list(&master_features.variables, &features.variables);
            if !missing.is_empty() {
                issues.missing_variables.insert(key.clone(), missing);
            }
            let additional = missing_from_list(&features.variables, &master_features.variables);
            if !additional.is_empty() {
                issues.additional_variables.insert(key.clone(), additional);
            }

            if self.exemptions.contains(&(locale.locale.as_str(), key.as_str())) {
                continue;
            }

            for kind in TagKind::ALL {
                let delta =
                    master_features.tags.get(kind) as i64 - features.tags.get(kind) as i64;
                if delta != 0 {
                    issues.tag_deltas_mut(kind).insert(key.clone(), delta);
                }
            }
            if !features.disallowed_tags.is_empty() {
                issues
                    .disallowed_tags
                    .insert(key.clone(), features.disallowed_tags.len());
            }
            if !features.improper_tags.is_empty() {
                issues
                    .improper_tags
                    .insert(key.clone(), features.improper_tags.len());
            }
        }

        issues
    }
}

/// Find every string, in any locale, that still uses `$name$` placeholders.
pub fn find_legacy_tokens<'d>(
    dictionaries: impl IntoIterator<Item = &'d LocaleDictionary>,
) -> LegacyTokenReport {
    let mut report = LegacyTokenReport::new();
    for dictionary in dictionaries {
        let keys: BTreeMap<String, Vec<String>> = dictionary
            .entries()
            .filter_map(|entry| {
                let tokens = StringFeatures::extract(&entry.value).legacy_variables;
                (!tokens.is_empty()).then(|| (entry.key.clone(), tokens))
            })
            .collect();
        if !keys.is_empty() {
            report.insert(dictionary.locale.clone(), keys);
        }
    }
    report
}
