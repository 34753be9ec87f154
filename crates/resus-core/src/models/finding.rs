use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Clinical urgency. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Primary-survey system a finding or intervention belongs to.
///
/// Declaration order is treatment priority: catastrophic hemorrhage (the
/// trauma `x` in xABCDE) before airway, through exposure. `General` holds
/// markers that belong to no single system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AbcdeSystem {
    CatastrophicHemorrhage,
    Airway,
    Breathing,
    Circulation,
    Disability,
    Exposure,
    General,
}

impl AbcdeSystem {
    pub fn letter(&self) -> char {
        match self {
            Self::CatastrophicHemorrhage => 'X',
            Self::Airway => 'A',
            Self::Breathing => 'B',
            Self::Circulation => 'C',
            Self::Disability => 'D',
            Self::Exposure => 'E',
            Self::General => '-',
        }
    }
}

/// A derived clinical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Finding {
    /// Kebab-case identifier, e.g. `heart-rate-high`.
    pub id: String,
    pub system: AbcdeSystem,
    pub severity: Severity,
    /// Human-readable evidence, e.g. `heart_rate 190 > 140`.
    pub evidence: Vec<String>,
    /// The measured value behind a threshold or graded finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Finding {
    pub fn new(
        id: impl Into<String>,
        system: AbcdeSystem,
        severity: Severity,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            system,
            severity,
            evidence: vec![evidence.into()],
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// A set of findings keyed by id.
///
/// Inserting a finding that is already present merges its evidence and keeps
/// the more severe classification, so nothing derived is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FindingSet {
    findings: BTreeMap<String, Finding>,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, finding: Finding) {
        match self.findings.get_mut(&finding.id) {
            Some(existing) => {
                existing.severity = existing.severity.min(finding.severity);
                existing.evidence.extend(finding.evidence);
                existing.evidence.sort();
                existing.evidence.dedup();
                existing.value = existing.value.or(finding.value);
            }
            None => {
                self.findings.insert(finding.id.clone(), finding);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.findings.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Finding> {
        self.findings.get(id)
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.findings.keys().map(String::as_str)
    }
}

impl FromIterator<Finding> for FindingSet {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        let mut set = Self::new();
        for finding in iter {
            set.insert(finding);
        }
        set
    }
}
