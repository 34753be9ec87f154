//! The rule table.
//!
//! Declaration order breaks ties between rules of equal severity and system,
//! so rules are listed in the order a provider would act on them.

use resus_calc::CalcError;
use resus_calc::drugs::{Drug, compute_dose, dose_for, salbutamol_nebulised};
use resus_calc::equipment::equipment_for;
use resus_calc::fluids::{infusion_mcg_per_min, maintenance_rate_ml_per_hr, parkland, txa};
use resus_calc::scores::{HemorrhageClass, hemorrhage_profile};
use resus_core::models::dose::Dose;
use resus_core::models::finding::{AbcdeSystem, Severity};
use resus_core::models::intervention::InterventionAction as Action;
use resus_core::models::patient::PatientType;

use super::{Exclusive, ExclusiveGroup, Rule, RuleContext, Trigger};

type Actions = Result<Vec<Action>, CalcError>;

const fn rule(
    id: &'static str,
    title: &'static str,
    severity: Severity,
    system: AbcdeSystem,
    trigger: Trigger,
    build: fn(&RuleContext<'_>) -> Actions,
) -> Rule {
    Rule {
        id,
        title,
        severity,
        system,
        trigger,
        exclusive: None,
        escalation: None,
        build,
    }
}

impl Rule {
    const fn exclusive(mut self, group: ExclusiveGroup, precedence: u8) -> Self {
        self.exclusive = Some(Exclusive { group, precedence });
        self
    }

    const fn escalate(mut self, path: &'static str) -> Self {
        self.escalation = Some(path);
        self
    }
}

use AbcdeSystem::*;
use ExclusiveGroup::*;
use Severity::*;
use Trigger::{All, Any};

static RULES: &[Rule] = &[
    // x
    rule(
        "hemorrhage-control",
        "Control catastrophic haemorrhage",
        Critical,
        CatastrophicHemorrhage,
        Any(&["catastrophic-hemorrhage"]),
        hemorrhage_control,
    )
    .escalate("Activate the major haemorrhage protocol"),
    // A
    rule(
        "airway-opening",
        "Open and clear the airway",
        Critical,
        Airway,
        Any(&["airway-obstruction"]),
        airway_opening,
    )
    .escalate("Call for senior airway support; prepare for a surgical airway"),
    rule(
        "anaphylaxis",
        "Treat anaphylaxis",
        Critical,
        Airway,
        Any(&["anaphylaxis"]),
        anaphylaxis,
    )
    .escalate("No improvement after two IM doses: adrenaline infusion and critical care"),
    rule(
        "definitive-airway",
        "Secure a definitive airway",
        Critical,
        Airway,
        Any(&["airway-protection-needed"]),
        definitive_airway,
    )
    .escalate("Senior anaesthetic support for intubation"),
    rule(
        "upper-airway-obstruction",
        "Treat stridor",
        Warning,
        Airway,
        Any(&["stridor"]),
        stridor,
    ),
    rule(
        "neonatal-initial-steps",
        "Initial steps for a newborn who is not vigorous",
        Warning,
        Airway,
        Any(&["neonatal-apnea", "neonatal-poor-tone"]),
        neonatal_initial_steps,
    ),
    rule(
        "airway-support",
        "Support the airway",
        Warning,
        Airway,
        Any(&["airway-at-risk"]),
        airway_support,
    ),
    rule(
        "spinal-motion-restriction",
        "Protect the cervical spine",
        Warning,
        Airway,
        Any(&["cervical-spine-risk"]),
        spinal_motion_restriction,
    ),
    // B
    rule(
        "assisted-ventilation",
        "Ventilate",
        Critical,
        Breathing,
        Any(&["apnea", "respiratory-rate-low"]),
        assisted_ventilation,
    ),
    rule(
        "neonatal-ppv",
        "Positive-pressure ventilation",
        Critical,
        Breathing,
        Any(&["neonatal-apnea", "neonatal-bradycardia"]),
        neonatal_ppv,
    ),
    rule(
        "ventilation-corrective-steps",
        "Correct ineffective ventilation",
        Critical,
        Breathing,
        Any(&["ineffective-ventilation"]),
        ventilation_corrective_steps,
    ),
    rule(
        "needle-decompression",
        "Decompress tension pneumothorax",
        Critical,
        Breathing,
        Any(&["tension-pneumothorax"]),
        needle_decompression,
    )
    .escalate("Chest drain"),
    rule(
        "high-flow-oxygen",
        "High-flow oxygen",
        Critical,
        Breathing,
        Any(&["severe-hypoxemia"]),
        high_flow_oxygen,
    )
    .exclusive(Oxygen, 0),
    rule(
        "oxygen",
        "Supplemental oxygen",
        Warning,
        Breathing,
        Any(&["hypoxemia", "respiratory-distress"]),
        oxygen,
    )
    .exclusive(Oxygen, 1),
    rule(
        "bronchodilator",
        "Treat wheeze",
        Warning,
        Breathing,
        Any(&["wheeze"]),
        bronchodilator,
    )
    .escalate("Severe or silent chest: IV bronchodilators and critical care"),
    rule(
        "neonatal-oxygen-titration",
        "Titrate oxygen to target",
        Warning,
        Breathing,
        Any(&["spo2-below-target", "spo2-above-target"]),
        neonatal_oxygen_titration,
    ),
    // C
    rule(
        "cpr",
        "Start CPR",
        Critical,
        Circulation,
        Any(&["cardiac-arrest"]),
        cpr,
    )
    .escalate("Consider reversible causes (4 Hs and 4 Ts)"),
    rule(
        "neonatal-compressions",
        "Chest compressions",
        Critical,
        Circulation,
        Any(&["neonatal-severe-bradycardia"]),
        neonatal_compressions,
    ),
    rule(
        "neonatal-adrenaline",
        "Adrenaline",
        Critical,
        Circulation,
        Any(&["persistent-severe-bradycardia"]),
        neonatal_adrenaline,
    )
    .escalate("Consider hypovolaemia and pneumothorax"),
    rule(
        "neonatal-volume",
        "Volume replacement",
        Critical,
        Circulation,
        Any(&["neonatal-hypovolemia"]),
        neonatal_volume,
    ),
    rule(
        "cardiogenic-shock",
        "Treat cardiogenic shock",
        Critical,
        Circulation,
        All(&["poor-perfusion", "raised-jvp"]),
        cardiogenic_shock,
    )
    .exclusive(Shock, 0)
    .escalate("Cardiology and critical care"),
    rule(
        "hemorrhagic-shock",
        "Treat haemorrhagic shock",
        Critical,
        Circulation,
        Any(&["hemorrhage-class-3", "hemorrhage-class-4"]),
        hemorrhagic_shock,
    )
    .exclusive(Shock, 1)
    .escalate("Activate the major haemorrhage protocol; surgical control"),
    rule(
        "cold-shock",
        "Treat cold shock",
        Critical,
        Circulation,
        All(&["poor-perfusion", "cold-peripheries"]),
        cold_shock,
    )
    .exclusive(Shock, 2)
    .escalate("Critical care review"),
    rule(
        "warm-shock",
        "Treat warm shock",
        Critical,
        Circulation,
        All(&["poor-perfusion", "warm-peripheries"]),
        warm_shock,
    )
    .exclusive(Shock, 3)
    .escalate("Critical care review"),
    rule(
        "fluid-bolus",
        "Fluid bolus",
        Critical,
        Circulation,
        Any(&["poor-perfusion", "hypotension"]),
        fluid_bolus,
    )
    .exclusive(Shock, 4)
    .escalate("After 40 mL/kg without improvement: start inotropes"),
    rule(
        "vasoactive-support",
        "Start inotropes",
        Critical,
        Circulation,
        Any(&["fluid-refractory-shock"]),
        vasoactive_support,
    )
    .escalate("Critical care"),
    rule(
        "svt",
        "Treat supraventricular tachycardia",
        Critical,
        Circulation,
        Any(&["svt"]),
        svt,
    )
    .escalate("Unstable: synchronised cardioversion"),
    rule(
        "bradycardia",
        "Treat bradycardia",
        Warning,
        Circulation,
        Any(&["heart-rate-low"]),
        bradycardia,
    ),
    rule(
        "uterine-displacement",
        "Relieve aortocaval compression",
        Warning,
        Circulation,
        Any(&["aortocaval-compression-risk"]),
        uterine_displacement,
    ),
    rule(
        "hemorrhage-monitoring",
        "Monitor blood loss",
        Warning,
        Circulation,
        Any(&["hemorrhage-class-1", "hemorrhage-class-2"]),
        hemorrhage_monitoring,
    ),
    rule(
        "tachycardia-review",
        "Look for the cause of tachycardia",
        Info,
        Circulation,
        Any(&["heart-rate-high"]),
        tachycardia_review,
    ),
    // D
    rule(
        "seizure",
        "Terminate the seizure",
        Critical,
        Disability,
        Any(&["active-seizure"]),
        seizure,
    )
    .escalate("Still seizing after second-line drug: RSI and critical care"),
    rule(
        "hypoglycemia",
        "Correct hypoglycaemia",
        Critical,
        Disability,
        Any(&["hypoglycemia"]),
        hypoglycemia,
    ),
    rule(
        "opioid-reversal",
        "Reverse opioid toxicity",
        Critical,
        Disability,
        Any(&["opioid-toxidrome"]),
        opioid_reversal,
    ),
    rule(
        "raised-icp",
        "Treat raised intracranial pressure",
        Critical,
        Disability,
        Any(&["unequal-pupils"]),
        raised_icp,
    )
    .escalate("Urgent neurosurgical referral"),
    rule(
        "neuro-observation",
        "Neurological observation",
        Warning,
        Disability,
        Any(&["decreased-consciousness", "altered-mental-status", "gcs-moderate"]),
        neuro_observation,
    ),
    rule(
        "toxin-management",
        "Manage toxin exposure",
        Warning,
        Disability,
        Any(&["toxin-exposure"]),
        toxin_management,
    ),
    // E
    rule(
        "sepsis",
        "Treat suspected meningococcal sepsis",
        Critical,
        Exposure,
        Any(&["non-blanching-rash"]),
        sepsis,
    )
    .escalate("Critical care and infectious diseases"),
    rule(
        "burn-resuscitation",
        "Burn fluid resuscitation",
        Critical,
        Exposure,
        Any(&["major-burn"]),
        burn_resuscitation,
    )
    .escalate("Refer to a burns centre"),
    rule(
        "burn-care",
        "Burn first aid",
        Warning,
        Exposure,
        Any(&["burn"]),
        burn_care,
    ),
    rule(
        "rewarming",
        "Rewarm",
        Warning,
        Exposure,
        Any(&["hypothermia"]),
        rewarming,
    ),
    rule(
        "antipyretic",
        "Treat fever",
        Info,
        Exposure,
        Any(&["fever"]),
        antipyretic,
    ),
    rule(
        "thermal-care",
        "Preterm thermal care",
        Info,
        Exposure,
        Any(&["preterm"]),
        thermal_care,
    ),
    rule(
        "clinical-judgement",
        "Use clinical judgement",
        Info,
        General,
        Any(&["no-reference-available"]),
        clinical_judgement,
    ),
];

pub fn rules() -> &'static [Rule] {
    RULES
}

fn dose(ctx: &RuleContext<'_>, drug: Drug) -> Result<Dose, CalcError> {
    Ok(compute_dose(drug, ctx.weight())?)
}

/// Resuscitation fluid for this patient: 10 mL/kg for a newborn, otherwise
/// the configured bolus volume.
fn bolus(ctx: &RuleContext<'_>, per_kg: Option<f64>) -> Result<Dose, CalcError> {
    let spec = if ctx.patient.patient_type == PatientType::Neonate {
        Drug::NeonatalVolume.spec()
    } else {
        Drug::CrystalloidBolus
            .spec()
            .with_per_kg(per_kg.unwrap_or(ctx.settings.fluid_bolus_ml_per_kg))
    };
    Ok(dose_for(&spec, ctx.weight())?)
}

fn tube(ctx: &RuleContext<'_>) -> Result<Action, CalcError> {
    if !ctx.patient.is_pediatric() {
        return Ok(Action::new("Prepare cuffed ETT 7.0-8.0 mm; suction 14 Fr"));
    }
    let kit = equipment_for(ctx.patient, ctx.settings.formulas.suction)?;
    let cuffed = kit
        .ett_cuffed_mm
        .map(|mm| format!(" or {mm} mm cuffed"))
        .unwrap_or_default();
    Ok(Action::new(format!(
        "Prepare ETT {} mm uncuffed{cuffed}, {:.1} cm at the lips; suction {} Fr",
        kit.ett_uncuffed_mm, kit.ett_depth_cm, kit.suction_fr
    )))
}

fn suction(ctx: &RuleContext<'_>) -> Result<Action, CalcError> {
    let fr = if ctx.patient.is_pediatric() {
        equipment_for(ctx.patient, ctx.settings.formulas.suction)?.suction_fr
    } else {
        14.0
    };
    Ok(Action::new(format!("Suction the airway with a {fr} Fr catheter")))
}

fn ventilation_rate(ctx: &RuleContext<'_>) -> &'static str {
    match ctx.patient.patient_type {
        PatientType::Neonate => "40-60 breaths/min",
        PatientType::Infant => "25 breaths/min",
        PatientType::Child => "20 breaths/min",
        PatientType::Adolescent => "15 breaths/min",
        PatientType::Adult | PatientType::Pregnant => "10 breaths/min",
    }
}

fn adrenaline_infusion(ctx: &RuleContext<'_>, low: f64, high: f64) -> Result<Action, CalcError> {
    let from = infusion_mcg_per_min(low, ctx.weight())?;
    let to = infusion_mcg_per_min(high, ctx.weight())?;
    Ok(Action::new(format!("Adrenaline infusion {from}-{to} mcg/min"))
        .titration(format!("{low}-{high} mcg/kg/min to perfusion")))
}

fn hemorrhage_control(ctx: &RuleContext<'_>) -> Actions {
    let plan = txa(ctx.weight())?;
    let maintenance = plan.maintenance_mg_per_hr;
    Ok(vec![
        Action::new("Direct pressure, then tourniquet or haemostatic packing"),
        Action::new("Tranexamic acid loading dose")
            .dose(plan.loading)
            .frequency(format!("over {} min", plan.loading_minutes)),
        Action::new(format!("Tranexamic acid infusion {maintenance} mg/h"))
            .frequency(format!("for {} h", plan.maintenance_hours)),
    ])
}

fn airway_opening(ctx: &RuleContext<'_>) -> Actions {
    let manoeuvre = if ctx.has("cervical-spine-risk") {
        "Jaw thrust with manual in-line stabilisation"
    } else {
        "Head tilt-chin lift or jaw thrust"
    };
    Ok(vec![
        Action::new(manoeuvre),
        suction(ctx)?,
        Action::new("Airway adjunct if tolerated").reassess("Chest rise and air entry"),
        tube(ctx)?,
    ])
}

fn anaphylaxis(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("IM adrenaline, anterolateral thigh")
            .dose(dose(ctx, Drug::AdrenalineAnaphylaxis)?)
            .frequency("repeat every 5 min if no improvement"),
        Action::new("High-flow oxygen"),
        Action::new("Fluid bolus for circulatory compromise").dose(bolus(ctx, None)?),
    ])
}

fn definitive_airway(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Maintain airway with adjuncts and bag-mask ventilation"),
        tube(ctx)?,
        Action::new("Rapid sequence induction by the most experienced operator"),
    ])
}

fn stridor(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Keep the patient calm and upright"),
        Action::new("Dexamethasone").dose(dose(ctx, Drug::Dexamethasone)?),
        Action::new("Nebulised adrenaline for severe stridor")
            .dose(dose(ctx, Drug::AdrenalineNebulised)?)
            .reassess("Stridor at rest and work of breathing after 30 min"),
    ])
}

fn neonatal_initial_steps(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Warm, dry and stimulate"),
        Action::new("Position the head in neutral; clear secretions if obstructing"),
        Action::new("Assess heart rate and breathing").reassess("within 30 s"),
    ])
}

fn airway_support(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Position the airway; consider an adjunct"),
        suction(ctx)?,
        Action::new("Observe closely").reassess("Airway patency every 5 min"),
    ])
}

fn spinal_motion_restriction(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Manual in-line stabilisation"),
        Action::new("Jaw thrust rather than head tilt"),
        Action::new("Log roll for examination"),
    ])
}

fn assisted_ventilation(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Bag-mask ventilation with 100% oxygen")
            .frequency(ventilation_rate(ctx))
            .reassess("Chest rise and SpO2"),
        tube(ctx)?,
    ])
}

fn neonatal_ppv(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Positive-pressure ventilation by mask")
            .frequency("40-60 breaths/min")
            .titration("Start in air at 32 weeks or more; 21-30% oxygen below 32 weeks")
            .reassess("Heart rate after 30 s of effective ventilation"),
        Action::new("Attach pre-ductal SpO2 probe, right hand"),
    ])
}

fn ventilation_corrective_steps(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Mask adjustment and reposition the airway"),
        Action::new("Suction mouth and nose; open the mouth"),
        Action::new("Increase inflation pressure; consider an alternative airway")
            .reassess("Chest rise"),
    ])
}

fn needle_decompression(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Needle thoracocentesis, 2nd intercostal space mid-clavicular line")
            .reassess("Breath sounds, SpO2 and perfusion"),
        Action::new("High-flow oxygen"),
    ])
}

fn high_flow_oxygen(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Oxygen 15 L/min via non-rebreather mask").titration("Target SpO2 94-98%"),
        Action::new("Prepare to assist ventilation").reassess("SpO2 and work of breathing"),
    ])
}

fn oxygen(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Supplemental oxygen")
            .titration("Target SpO2 94-98%")
            .reassess("SpO2 and work of breathing every 5 min"),
    ])
}

fn bronchodilator(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Nebulised salbutamol, oxygen-driven")
            .dose(salbutamol_nebulised(ctx.patient.age_months, ctx.weight())?)
            .frequency("every 20 min for the first hour"),
        Action::new("Oral steroid").dose(dose(ctx, Drug::Dexamethasone)?),
    ])
}

fn neonatal_oxygen_titration(ctx: &RuleContext<'_>) -> Actions {
    let direction = if ctx.has("spo2-below-target") {
        "Increase"
    } else {
        "Reduce"
    };
    Ok(vec![
        Action::new(format!("{direction} inspired oxygen"))
            .titration("To the pre-ductal target for minutes since birth"),
    ])
}

fn cpr(ctx: &RuleContext<'_>) -> Actions {
    let ratio = match ctx.patient.patient_type {
        PatientType::Neonate => "3:1 compressions to breaths",
        PatientType::Adult | PatientType::Pregnant => "30:2 compressions to breaths",
        _ => "15:2 compressions to breaths",
    };
    let mut actions = vec![
        Action::new(format!("Start CPR, {ratio}")).frequency("100-120 compressions/min"),
        Action::new("Attach defibrillator; check rhythm").frequency("every 2 min"),
        Action::new("Adrenaline")
            .dose(dose(ctx, Drug::AdrenalineArrest)?)
            .frequency("every 3-5 min"),
        Action::new("Shockable rhythm: defibrillate").dose(dose(ctx, Drug::Defibrillation)?),
        Action::new("Shockable rhythm: amiodarone after the 3rd and 5th shocks")
            .dose(dose(ctx, Drug::Amiodarone)?),
    ];
    if ctx.patient.patient_type == PatientType::Pregnant {
        actions.push(Action::new("Manual left uterine displacement"));
    }
    Ok(actions)
}

fn neonatal_compressions(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Chest compressions, two-thumb technique, 3:1 with ventilation")
            .frequency("90 compressions and 30 breaths/min")
            .reassess("Heart rate after 60 s"),
        Action::new("Increase oxygen to 100%"),
        tube(ctx)?,
    ])
}

fn neonatal_adrenaline(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Umbilical venous catheter or intraosseous access"),
        Action::new("Adrenaline")
            .dose(dose(ctx, Drug::NeonatalAdrenaline)?)
            .frequency("every 3-5 min while heart rate is below 60"),
    ])
}

fn neonatal_volume(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Volume over 5-10 min")
            .dose(dose(ctx, Drug::NeonatalVolume)?)
            .reassess("Heart rate and perfusion"),
    ])
}

fn cardiogenic_shock(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Cautious fluid bolus")
            .dose(bolus(ctx, Some(10.0))?)
            .reassess("Liver edge and crackles after each bolus"),
        adrenaline_infusion(ctx, 0.05, 0.3)?,
    ])
}

fn hemorrhagic_shock(ctx: &RuleContext<'_>) -> Actions {
    let class = if ctx.has("hemorrhage-class-4") { 4 } else { 3 };
    let profile = hemorrhage_profile(HemorrhageClass::from_number(class)?);
    let plan = txa(ctx.weight())?;
    Ok(vec![
        Action::new(format!("Class {class}: {}", profile.fluid_guidance)),
        Action::new("Packed red cells").dose(dose(ctx, Drug::PackedRedCells)?),
        Action::new("Tranexamic acid loading dose")
            .dose(plan.loading)
            .frequency(format!("over {} min", plan.loading_minutes)),
        Action::new("Pelvic binder if pelvic injury suspected"),
    ])
}

fn cold_shock(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Fluid bolus")
            .dose(bolus(ctx, None)?)
            .reassess("Perfusion after each bolus"),
        adrenaline_infusion(ctx, 0.05, 0.3)?,
    ])
}

fn warm_shock(ctx: &RuleContext<'_>) -> Actions {
    let from = infusion_mcg_per_min(0.05, ctx.weight())?;
    let to = infusion_mcg_per_min(0.5, ctx.weight())?;
    Ok(vec![
        Action::new("Fluid bolus")
            .dose(bolus(ctx, None)?)
            .reassess("Perfusion after each bolus"),
        Action::new(format!("Noradrenaline infusion {from}-{to} mcg/min"))
            .titration("0.05-0.5 mcg/kg/min to blood pressure"),
    ])
}

fn fluid_bolus(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("IV/IO access"),
        Action::new("Isotonic fluid bolus")
            .dose(bolus(ctx, None)?)
            .frequency("over 5-10 min")
            .reassess("Heart rate, capillary refill and blood pressure after each bolus"),
    ])
}

fn vasoactive_support(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        adrenaline_infusion(ctx, 0.05, 0.3)?,
        Action::new("Hydrocortisone for catecholamine-resistant shock")
            .dose(dose(ctx, Drug::Hydrocortisone)?),
    ])
}

fn svt(ctx: &RuleContext<'_>) -> Actions {
    let cardioversion = Drug::Defibrillation.spec().with_per_kg(1.0);
    Ok(vec![
        Action::new("Vagal manoeuvres"),
        Action::new("Adenosine, rapid push with flush").dose(dose(ctx, Drug::AdenosineFirst)?),
        Action::new("Adenosine second dose if no conversion")
            .dose(dose(ctx, Drug::AdenosineSecond)?),
        Action::new("Synchronised cardioversion if unstable")
            .dose(dose_for(&cardioversion, ctx.weight())?),
    ])
}

fn bradycardia(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Support oxygenation and ventilation first"),
        Action::new("Atropine for vagal bradycardia").dose(dose(ctx, Drug::Atropine)?),
    ])
}

fn uterine_displacement(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Manual left uterine displacement or 15-30 degree left tilt"),
        Action::new("Obstetric review"),
    ])
}

fn hemorrhage_monitoring(ctx: &RuleContext<'_>) -> Actions {
    let class = if ctx.has("hemorrhage-class-2") { 2 } else { 1 };
    let profile = hemorrhage_profile(HemorrhageClass::from_number(class)?);
    Ok(vec![
        Action::new(format!("Class {class}: {}", profile.fluid_guidance))
            .reassess("Heart rate and blood pressure every 5 min"),
    ])
}

fn tachycardia_review(_: &RuleContext<'_>) -> Actions {
    Ok(vec![Action::new(
        "Consider pain, fever, hypovolaemia and hypoxia",
    )])
}

fn seizure(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("No IV access: buccal midazolam").dose(dose(ctx, Drug::MidazolamBuccal)?),
        Action::new("IV access: lorazepam")
            .dose(dose(ctx, Drug::Lorazepam)?)
            .frequency("repeat once after 5 min"),
        Action::new("Second line: levetiracetam over 5 min").dose(dose(ctx, Drug::Levetiracetam)?),
        Action::new("Alternative second line: phenobarbital over 20 min")
            .dose(dose(ctx, Drug::Phenobarbital)?),
        Action::new("Check blood glucose"),
    ])
}

fn hypoglycemia(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Dextrose 10%")
            .dose(dose(ctx, Drug::Dextrose10)?)
            .reassess("Blood glucose after 15 min"),
    ])
}

fn opioid_reversal(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Support ventilation"),
        Action::new("Naloxone")
            .dose(dose(ctx, Drug::Naloxone)?)
            .frequency("repeat every 2-3 min")
            .titration("To adequate breathing, not full consciousness"),
    ])
}

fn raised_icp(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Head up 30 degrees, head midline"),
        Action::new("Hypertonic saline 3%").dose(dose(ctx, Drug::HypertonicSaline)?),
        Action::new("Avoid hypoxia and hypotension").reassess("Pupils and GCS every 15 min"),
    ])
}

fn neuro_observation(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Check blood glucose"),
        Action::new("Recovery position if airway protected"),
        Action::new("Neurological observations").frequency("every 15 min"),
    ])
}

fn toxin_management(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Contact poisons information"),
        Action::new("Identify the agent, dose and time of exposure"),
    ])
}

fn sepsis(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Ceftriaxone").dose(dose(ctx, Drug::Ceftriaxone)?),
        Action::new("Fluid bolus").dose(bolus(ctx, None)?),
        Action::new("Blood cultures without delaying antibiotics"),
    ])
}

fn burn_resuscitation(ctx: &RuleContext<'_>) -> Actions {
    let Some(tbsa) = ctx.value("major-burn") else {
        return Ok(vec![Action::new("Record the burned area to calculate fluids")]);
    };
    let plan = parkland(ctx.weight(), tbsa)?;
    let mut actions = vec![
        Action::new(format!(
            "Parkland: 4 mL x {} kg x {tbsa}% = {} mL in 24 h",
            ctx.weight(),
            plan.total_24h_ml
        )),
        Action::new(format!(
            "{} mL over the first 8 h from injury",
            plan.first_8h_ml
        ))
        .frequency(format!("{} mL/h", plan.first_8h_rate_ml_per_hr)),
        Action::new(format!("{} mL over the next 16 h", plan.next_16h_ml))
            .frequency(format!("{} mL/h", plan.next_16h_rate_ml_per_hr))
            .titration("Urine output 0.5-1 mL/kg/h"),
    ];
    if ctx.patient.is_pediatric() {
        let maintenance = maintenance_rate_ml_per_hr(ctx.weight())?;
        actions.push(
            Action::new("Add maintenance fluid").frequency(format!("{maintenance} mL/h")),
        );
    }
    Ok(actions)
}

fn burn_care(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Cool the burn with running water for 20 min"),
        Action::new("Cover with cling film"),
        Action::new("Analgesia").dose(dose(ctx, Drug::Paracetamol)?),
    ])
}

fn rewarming(ctx: &RuleContext<'_>) -> Actions {
    let target = if ctx.patient.patient_type == PatientType::Neonate {
        "36.5-37.5 °C"
    } else {
        "above 36 °C"
    };
    Ok(vec![
        Action::new("Remove wet clothing; active external warming")
            .titration(format!("Core temperature {target}")),
    ])
}

fn antipyretic(ctx: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Paracetamol")
            .dose(dose(ctx, Drug::Paracetamol)?)
            .frequency("every 6 h, maximum 4 doses in 24 h"),
    ])
}

fn thermal_care(_: &RuleContext<'_>) -> Actions {
    Ok(vec![
        Action::new("Plastic wrap without drying below 32 weeks"),
        Action::new("Radiant warmer").titration("Temperature 36.5-37.5 °C"),
    ])
}

fn clinical_judgement(_: &RuleContext<'_>) -> Actions {
    Ok(vec![Action::new(
        "No reference range applies to this patient; interpret vital signs clinically",
    )])
}
