pub mod dose;
pub mod export;
pub mod finding;
pub mod intervention;
pub mod observation;
pub mod patient;
pub mod protocol;
pub mod session;
pub mod view;
