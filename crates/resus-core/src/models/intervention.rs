use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::dose::{Dose, Route};
use super::finding::{AbcdeSystem, Severity};

/// One concrete step of an intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterventionAction {
    pub action: String,
    pub dose: Option<Dose>,
    pub route: Option<Route>,
    pub frequency: Option<String>,
    pub titration: Option<String>,
    pub reassessment_criteria: Option<String>,
}

impl InterventionAction {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            dose: None,
            route: None,
            frequency: None,
            titration: None,
            reassessment_criteria: None,
        }
    }

    /// Attach a dose; the route follows the dose unless set explicitly later.
    pub fn dose(mut self, dose: Dose) -> Self {
        self.route = Some(dose.route);
        self.dose = Some(dose);
        self
    }

    pub fn route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    pub fn frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn titration(mut self, titration: impl Into<String>) -> Self {
        self.titration = Some(titration.into());
        self
    }

    pub fn reassess(mut self, criteria: impl Into<String>) -> Self {
        self.reassessment_criteria = Some(criteria.into());
        self
    }
}

/// A recommended treatment derived from the current findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Intervention {
    pub id: String,
    pub severity: Severity,
    pub system: AbcdeSystem,
    pub title: String,
    /// Ids of the findings that triggered this intervention.
    pub evidence: Vec<String>,
    pub actions: Vec<InterventionAction>,
    pub escalation_path: Option<String>,
}

/// Record of an operator marking an intervention performed or withdrawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterventionLogEntry {
    pub intervention_id: String,
    pub performed: bool,
    pub elapsed_seconds: u64,
    pub reassessment_cycle: u32,
}
