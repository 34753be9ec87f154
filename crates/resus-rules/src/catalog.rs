//! Every finding the evaluator can raise, with its system and severity.
//!
//! Provider-selected critical findings are looked up here too, so a finding
//! means the same thing whether it was measured or declared.

use resus_core::models::finding::{AbcdeSystem, Finding, Severity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FindingKind {
    pub id: &'static str,
    pub system: AbcdeSystem,
    pub severity: Severity,
    pub title: &'static str,
}

const fn kind(
    id: &'static str,
    system: AbcdeSystem,
    severity: Severity,
    title: &'static str,
) -> FindingKind {
    FindingKind {
        id,
        system,
        severity,
        title,
    }
}

use AbcdeSystem::*;
use Severity::*;

pub const CATALOG: &[FindingKind] = &[
    kind("catastrophic-hemorrhage", CatastrophicHemorrhage, Critical, "Catastrophic haemorrhage"),
    // Airway
    kind("airway-obstruction", Airway, Critical, "Airway obstruction"),
    kind("airway-at-risk", Airway, Warning, "Airway at risk"),
    kind("stridor", Airway, Warning, "Stridor"),
    kind("airway-protection-needed", Airway, Critical, "Airway cannot be protected"),
    kind("cervical-spine-risk", Airway, Warning, "Possible cervical spine injury"),
    kind("anaphylaxis", Airway, Critical, "Anaphylaxis"),
    // Breathing
    kind("apnea", Breathing, Critical, "Apnoea"),
    kind("respiratory-distress", Breathing, Warning, "Respiratory distress"),
    kind("respiratory-rate-low", Breathing, Critical, "Respiratory rate below normal"),
    kind("respiratory-rate-high", Breathing, Warning, "Respiratory rate above normal"),
    kind("severe-hypoxemia", Breathing, Critical, "Severe hypoxaemia"),
    kind("hypoxemia", Breathing, Warning, "Hypoxaemia"),
    kind("wheeze", Breathing, Warning, "Wheeze"),
    kind("tension-pneumothorax", Breathing, Critical, "Tension pneumothorax"),
    // Circulation
    kind("cardiac-arrest", Circulation, Critical, "Cardiac arrest"),
    kind("heart-rate-low", Circulation, Warning, "Heart rate below normal"),
    kind("heart-rate-high", Circulation, Warning, "Heart rate above normal"),
    kind("systolic-bp-low", Circulation, Warning, "Systolic BP below normal"),
    kind("systolic-bp-high", Circulation, Info, "Systolic BP above normal"),
    kind("hypotension", Circulation, Critical, "Hypotension"),
    kind("poor-perfusion", Circulation, Warning, "Poor perfusion"),
    kind("cold-peripheries", Circulation, Warning, "Cold, mottled peripheries"),
    kind("warm-peripheries", Circulation, Info, "Warm peripheries"),
    kind("fluid-refractory-shock", Circulation, Critical, "Fluid-refractory shock"),
    kind("svt", Circulation, Critical, "Supraventricular tachycardia"),
    kind("raised-jvp", Circulation, Warning, "Raised jugular venous pressure"),
    kind("aortocaval-compression-risk", Circulation, Warning, "Risk of aortocaval compression"),
    kind("hemorrhage-class-1", Circulation, Info, "Haemorrhage class I"),
    kind("hemorrhage-class-2", Circulation, Warning, "Haemorrhage class II"),
    kind("hemorrhage-class-3", Circulation, Critical, "Haemorrhage class III"),
    kind("hemorrhage-class-4", Circulation, Critical, "Haemorrhage class IV"),
    // Disability
    kind("decreased-consciousness", Disability, Critical, "Responds to pain only or unresponsive"),
    kind("altered-mental-status", Disability, Warning, "Responds to voice only"),
    kind("gcs-severe", Disability, Critical, "Severe brain injury (GCS 3-8)"),
    kind("gcs-moderate", Disability, Warning, "Moderate brain injury (GCS 9-12)"),
    kind("unequal-pupils", Disability, Critical, "Unequal or fixed pupils"),
    kind("pinpoint-pupils", Disability, Warning, "Pinpoint pupils"),
    kind("active-seizure", Disability, Critical, "Active seizure"),
    kind("hypoglycemia", Disability, Critical, "Hypoglycaemia"),
    kind("opioid-toxidrome", Disability, Critical, "Opioid toxidrome"),
    kind("toxin-exposure", Disability, Warning, "Suspected toxin exposure"),
    // Exposure
    kind("hypothermia", Exposure, Warning, "Hypothermia"),
    kind("fever", Exposure, Info, "Fever"),
    kind("non-blanching-rash", Exposure, Critical, "Non-blanching rash"),
    kind("urticaria", Exposure, Info, "Urticarial rash"),
    kind("major-burn", Exposure, Critical, "Major burn"),
    kind("burn", Exposure, Warning, "Burn"),
    // Neonatal
    kind("neonatal-apnea", Breathing, Critical, "Apnoeic or gasping newborn"),
    kind("ineffective-ventilation", Breathing, Critical, "Ventilation not effective"),
    kind("spo2-below-target", Breathing, Warning, "SpO2 below target for age in minutes"),
    kind("spo2-above-target", Breathing, Info, "SpO2 above target for age in minutes"),
    kind("neonatal-bradycardia", Circulation, Critical, "Newborn heart rate below 100"),
    kind("neonatal-severe-bradycardia", Circulation, Critical, "Newborn heart rate below 60"),
    kind(
        "persistent-severe-bradycardia",
        Circulation,
        Critical,
        "Heart rate below 60 despite compressions",
    ),
    kind("neonatal-hypovolemia", Circulation, Critical, "Suspected hypovolaemia"),
    kind("neonatal-poor-tone", General, Warning, "Poor tone"),
    kind("preterm", General, Info, "Preterm birth"),
    // Markers
    kind("no-reference-available", General, Info, "No reference range for this patient"),
];

pub fn lookup(id: &str) -> Option<&'static FindingKind> {
    CATALOG.iter().find(|k| k.id == id)
}

/// Build a finding from its catalog entry.
///
/// An id missing from the catalog is still reported, as a general warning,
/// so that nothing the evaluator raises is lost.
pub fn finding(id: &str, evidence: impl Into<String>) -> Finding {
    match lookup(id) {
        Some(k) => Finding::new(k.id, k.system, k.severity, evidence),
        None => {
            tracing::warn!(finding = id, "finding id not in catalog");
            Finding::new(id, General, Warning, evidence)
        }
    }
}
