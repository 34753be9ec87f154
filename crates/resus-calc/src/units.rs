//! Unit conversion.

/// mg/dL per mmol/L for glucose.
pub const GLUCOSE_MG_DL_PER_MMOL_L: f64 = 18.0;

pub fn glucose_mg_dl_to_mmol_l(mg_dl: f64) -> f64 {
    mg_dl / GLUCOSE_MG_DL_PER_MMOL_L
}

pub fn glucose_mmol_l_to_mg_dl(mmol_l: f64) -> f64 {
    mmol_l * GLUCOSE_MG_DL_PER_MMOL_L
}

