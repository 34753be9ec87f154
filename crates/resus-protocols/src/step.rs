use resus_core::fields;
use resus_core::models::finding::AbcdeSystem;
use resus_core::models::observation::ObservationSet;
use resus_core::models::patient::{PatientContext, PatientType};
use resus_core::models::view::{Prompt, PromptKind, ValueRange};

/// When a step is reachable, evaluated against the patient and the answers
/// recorded so far.
#[derive(Debug, Clone, PartialEq)]
pub enum Applicability {
    Always,
    PatientTypes(Vec<PatientType>),
    FlagSet(String),
    ChoiceIs { field: String, value: String },
    ChoiceIn { field: String, values: Vec<String> },
    /// True when the field was recorded and is below the threshold.
    NumericBelow { field: String, threshold: f64 },
    Not(Box<Applicability>),
    All(Vec<Applicability>),
    Any(Vec<Applicability>),
}

impl Applicability {
    pub fn applies(&self, patient: &PatientContext, observations: &ObservationSet) -> bool {
        match self {
            Self::Always => true,
            Self::PatientTypes(types) => types.contains(&patient.patient_type),
            Self::FlagSet(field) => observations.flag(field),
            Self::ChoiceIs { field, value } => observations.choice_is(field, value),
            Self::ChoiceIn { field, values } => observations
                .choice(field)
                .is_some_and(|c| values.iter().any(|v| v == c)),
            Self::NumericBelow { field, threshold } => observations
                .numeric(field)
                .is_some_and(|v| v < *threshold),
            Self::Not(inner) => !inner.applies(patient, observations),
            Self::All(all) => all.iter().all(|a| a.applies(patient, observations)),
            Self::Any(any) => any.iter().any(|a| a.applies(patient, observations)),
        }
    }

    pub fn patient_types(types: &[PatientType]) -> Self {
        Self::PatientTypes(types.to_vec())
    }

    pub fn flag(field: &str) -> Self {
        Self::FlagSet(field.to_string())
    }

    pub fn choice_is(field: &str, value: &str) -> Self {
        Self::ChoiceIs {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn choice_in(field: &str, values: &[&str]) -> Self {
        Self::ChoiceIn {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn numeric_below(field: &str, threshold: f64) -> Self {
        Self::NumericBelow {
            field: field.to_string(),
            threshold,
        }
    }

    pub fn not(inner: Applicability) -> Self {
        Self::Not(Box::new(inner))
    }
}

/// One step of a protocol template.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentStep {
    pub id: String,
    pub phase: AbcdeSystem,
    pub title: String,
    pub applicability: Applicability,
    pub prompts: Vec<Prompt>,
    pub critical_finding_options: Vec<String>,
    pub intervention_options: Vec<String>,
}

impl AssessmentStep {
    pub fn new(id: &str, phase: AbcdeSystem, title: &str) -> Self {
        Self {
            id: id.to_string(),
            phase,
            title: title.to_string(),
            applicability: Applicability::Always,
            prompts: Vec::new(),
            critical_finding_options: Vec::new(),
            intervention_options: Vec::new(),
        }
    }

    pub fn applies_when(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn prompt(mut self, prompt: Prompt) -> Self {
        self.prompts.push(prompt);
        self
    }

    pub fn critical(mut self, options: &[&str]) -> Self {
        self.critical_finding_options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn interventions(mut self, options: &[&str]) -> Self {
        self.intervention_options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn applies(&self, patient: &PatientContext, observations: &ObservationSet) -> bool {
        self.applicability.applies(patient, observations)
    }

    pub fn find_prompt(&self, field: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.field == field)
    }

    /// Prompt definitions plus the provider-selectable critical findings.
    pub fn all_prompts(&self) -> Vec<Prompt> {
        let mut prompts = self.prompts.clone();
        if !self.critical_finding_options.is_empty() {
            prompts.push(Prompt {
                field: fields::CRITICAL_FINDINGS.to_string(),
                label: "Critical findings".to_string(),
                kind: PromptKind::MultiSelect {
                    options: self.critical_finding_options.clone(),
                },
            });
        }
        prompts
    }
}

pub fn numeric(field: &str, label: &str, unit: &str, min: f64, max: f64) -> Prompt {
    Prompt {
        field: field.to_string(),
        label: label.to_string(),
        kind: PromptKind::Numeric {
            unit: unit.to_string(),
            range: ValueRange::new(min, max),
        },
    }
}

/// A numeric prompt that accepts whole numbers only.
pub fn whole(field: &str, label: &str, min: f64, max: f64) -> Prompt {
    Prompt {
        field: field.to_string(),
        label: label.to_string(),
        kind: PromptKind::Numeric {
            unit: String::new(),
            range: ValueRange::whole(min, max),
        },
    }
}

pub fn choice(field: &str, label: &str, options: &[&str]) -> Prompt {
    Prompt {
        field: field.to_string(),
        label: label.to_string(),
        kind: PromptKind::Choice {
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    }
}

pub fn flag(field: &str, label: &str) -> Prompt {
    Prompt {
        field: field.to_string(),
        label: label.to_string(),
        kind: PromptKind::Flag,
    }
}
