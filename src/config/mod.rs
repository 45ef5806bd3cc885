//! Configuration loading and management for the payroll engine.
//!
//! This module provides workplace rate configuration with its built-in
//! defaults, the progressive income tax schedule, and loading of a region
//! directory of YAML files (metadata, default multipliers, tax schedule
//! and public holidays).
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/au_2026").unwrap();
//! println!("Loaded region: {}", config.region().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_OVERTIME_THRESHOLD_HOURS,
    DEFAULT_PUBLIC_HOLIDAY_MULTIPLIER, DEFAULT_SATURDAY_MULTIPLIER, DEFAULT_SUNDAY_MULTIPLIER,
    LevyConfig, RateConfig, RateDefaults, RegionConfig, RegionMetadata, TaxBracket, TaxSchedule,
};
