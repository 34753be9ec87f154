pub mod neonatal;
pub mod primary_survey;
pub mod step_by_step;
pub mod trauma;
