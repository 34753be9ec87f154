//! Intervention rule engine.
//!
//! Each rule maps a subset of findings to at most one intervention. All
//! matching rules fire, except within an exclusive group, where only the
//! highest-precedence match survives. The result is ordered by severity,
//! then by primary-survey system, then by declaration order.

mod registry;

use resus_calc::CalcError;
use resus_core::config::{EngineConfig, ProtocolFormulas};
use resus_core::models::finding::{AbcdeSystem, FindingSet, Severity};
use resus_core::models::intervention::{Intervention, InterventionAction};
use resus_core::models::patient::PatientContext;
use resus_core::models::protocol::ProtocolId;

pub use registry::rules;

/// Findings that make a rule fire.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// At least one of the findings is present.
    Any(&'static [&'static str]),
    /// Every finding is present.
    All(&'static [&'static str]),
}

impl Trigger {
    /// The ids of the present findings that satisfied the trigger, or `None`
    /// when it did not fire.
    pub fn matches(&self, findings: &FindingSet) -> Option<Vec<String>> {
        match self {
            Self::Any(ids) => {
                let hit: Vec<String> = ids
                    .iter()
                    .filter(|id| findings.contains(id))
                    .map(|id| id.to_string())
                    .collect();
                (!hit.is_empty()).then_some(hit)
            }
            Self::All(ids) => ids
                .iter()
                .all(|id| findings.contains(id))
                .then(|| ids.iter().map(|id| id.to_string()).collect()),
        }
    }

    pub fn ids(&self) -> &'static [&'static str] {
        match self {
            Self::Any(ids) | Self::All(ids) => ids,
        }
    }
}

/// Rules that describe alternative treatments for the same problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusiveGroup {
    Shock,
    Oxygen,
}

/// Membership in an exclusive group. Lower precedence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusive {
    pub group: ExclusiveGroup,
    pub precedence: u8,
}

pub type BuildFn = fn(&RuleContext<'_>) -> Result<Vec<InterventionAction>, CalcError>;

pub struct Rule {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub system: AbcdeSystem,
    pub trigger: Trigger,
    pub exclusive: Option<Exclusive>,
    pub escalation: Option<&'static str>,
    pub build: BuildFn,
}

/// Per-session inputs to dose and equipment calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSettings {
    pub formulas: ProtocolFormulas,
    pub fluid_bolus_ml_per_kg: f64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            formulas: ProtocolFormulas::STANDARD,
            fluid_bolus_ml_per_kg: 20.0,
        }
    }
}

impl RuleSettings {
    pub fn from_config(config: &EngineConfig, protocol: ProtocolId) -> Self {
        Self {
            formulas: config.formulas.for_protocol(protocol),
            fluid_bolus_ml_per_kg: config.fluid_bolus_ml_per_kg,
        }
    }
}

/// What a rule's builder can see.
pub struct RuleContext<'a> {
    pub findings: &'a FindingSet,
    pub patient: &'a PatientContext,
    pub settings: &'a RuleSettings,
}

impl RuleContext<'_> {
    pub fn weight(&self) -> f64 {
        self.patient.weight_kg
    }

    pub fn has(&self, id: &str) -> bool {
        self.findings.contains(id)
    }

    /// Measured value recorded on a finding, if any.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.findings.get(id).and_then(|f| f.value)
    }
}

/// Derive the ordered intervention list for a finding set.
pub fn derive_interventions(
    findings: &FindingSet,
    patient: &PatientContext,
    settings: &RuleSettings,
) -> Result<Vec<Intervention>, CalcError> {
    let ctx = RuleContext {
        findings,
        patient,
        settings,
    };

    let matched: Vec<(&Rule, Vec<String>)> = rules()
        .iter()
        .filter_map(|rule| rule.trigger.matches(findings).map(|evidence| (rule, evidence)))
        .collect();

    let mut out = Vec::with_capacity(matched.len());
    for (rule, evidence) in &matched {
        if let Some(winner) = outranked_by(rule, &matched) {
            tracing::debug!(rule = rule.id, winner, "suppressed by exclusive rule");
            continue;
        }
        out.push(Intervention {
            id: rule.id.to_string(),
            severity: rule.severity,
            system: rule.system,
            title: rule.title.to_string(),
            evidence: evidence.clone(),
            actions: (rule.build)(&ctx)?,
            escalation_path: rule.escalation.map(str::to_string),
        });
    }

    // Stable: equal keys keep declaration order.
    out.sort_by_key(|i| (i.severity, i.system));

    tracing::debug!(
        count = out.len(),
        interventions = ?out.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        "interventions derived"
    );
    Ok(out)
}

/// The id of a matched rule in the same exclusive group with higher
/// precedence, if there is one.
fn outranked_by(rule: &Rule, matched: &[(&Rule, Vec<String>)]) -> Option<&'static str> {
    let mine = rule.exclusive?;
    matched
        .iter()
        .filter_map(|(other, _)| other.exclusive.map(|e| (other.id, e)))
        .find(|(_, e)| e.group == mine.group && e.precedence < mine.precedence)
        .map(|(id, _)| id)
}
