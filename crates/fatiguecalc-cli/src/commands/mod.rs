pub mod calibrate;
pub mod circadian;
pub mod config;
pub mod scenario;
pub mod simulate;
pub mod sweep;
