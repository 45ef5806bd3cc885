//! Configuration types for pay and tax calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML region files or supplied per request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PublicHolidaySet;

/// Default Saturday multiplier (150%).
pub const DEFAULT_SATURDAY_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Default Sunday multiplier (200%).
pub const DEFAULT_SUNDAY_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);
/// Default public holiday multiplier (250%).
pub const DEFAULT_PUBLIC_HOLIDAY_MULTIPLIER: Decimal = Decimal::from_parts(25, 0, 0, false, 1);
/// Default overtime multiplier (150%).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Default daily hours before overtime applies.
pub const DEFAULT_OVERTIME_THRESHOLD_HOURS: Decimal = Decimal::from_parts(80, 0, 0, false, 1);

fn default_saturday_multiplier() -> Decimal {
    DEFAULT_SATURDAY_MULTIPLIER
}

fn default_sunday_multiplier() -> Decimal {
    DEFAULT_SUNDAY_MULTIPLIER
}

fn default_public_holiday_multiplier() -> Decimal {
    DEFAULT_PUBLIC_HOLIDAY_MULTIPLIER
}

fn default_overtime_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

fn default_overtime_threshold_hours() -> Decimal {
    DEFAULT_OVERTIME_THRESHOLD_HOURS
}

/// Metadata about the configured region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionMetadata {
    /// A short code for the region schedule (e.g., "AU-2026").
    pub code: String,
    /// The human-readable name of the region.
    pub name: String,
    /// The version or effective year of the schedule.
    pub version: String,
    /// Where the published rates came from.
    #[serde(default)]
    pub source_url: String,
}

/// Multipliers a workplace uses unless it overrides them.
///
/// This is the contents of `rates.yaml`; every field is optional and falls
/// back to the built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDefaults {
    /// Multiplier for Saturday hours.
    #[serde(default = "default_saturday_multiplier")]
    pub saturday_multiplier: Decimal,
    /// Multiplier for Sunday hours.
    #[serde(default = "default_sunday_multiplier")]
    pub sunday_multiplier: Decimal,
    /// Multiplier for public holiday hours.
    #[serde(default = "default_public_holiday_multiplier")]
    pub public_holiday_multiplier: Decimal,
    /// Multiplier applied on top of the day multiplier for overtime hours.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Hours in a shift before overtime applies.
    #[serde(default = "default_overtime_threshold_hours")]
    pub overtime_threshold_hours: Decimal,
}

impl Default for RateDefaults {
    fn default() -> Self {
        Self {
            saturday_multiplier: DEFAULT_SATURDAY_MULTIPLIER,
            sunday_multiplier: DEFAULT_SUNDAY_MULTIPLIER,
            public_holiday_multiplier: DEFAULT_PUBLIC_HOLIDAY_MULTIPLIER,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
        }
    }
}

impl RateDefaults {
    /// Builds a full rate configuration for a workplace's base rate.
    pub fn with_base_rate(&self, base_rate: Decimal) -> RateConfig {
        RateConfig {
            base_rate,
            saturday_multiplier: self.saturday_multiplier,
            sunday_multiplier: self.sunday_multiplier,
            public_holiday_multiplier: self.public_holiday_multiplier,
            overtime_multiplier: self.overtime_multiplier,
            overtime_threshold_hours: self.overtime_threshold_hours,
        }
    }
}

/// The pay rates of a single workplace.
///
/// Multipliers left out of serialized input take their built-in defaults
/// (1.5 / 2.0 / 2.5 / 1.5 / 8.0).
///
/// # Example
///
/// ```
/// use payroll_engine::config::RateConfig;
/// use rust_decimal::Decimal;
///
/// let rates = RateConfig::with_base_rate(Decimal::new(20, 0));
/// assert_eq!(rates.sunday_multiplier, Decimal::new(2, 0));
/// assert!(rates.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// The ordinary hourly rate.
    pub base_rate: Decimal,
    /// Multiplier for Saturday hours.
    #[serde(default = "default_saturday_multiplier")]
    pub saturday_multiplier: Decimal,
    /// Multiplier for Sunday hours.
    #[serde(default = "default_sunday_multiplier")]
    pub sunday_multiplier: Decimal,
    /// Multiplier for public holiday hours.
    #[serde(default = "default_public_holiday_multiplier")]
    pub public_holiday_multiplier: Decimal,
    /// Multiplier applied on top of the day multiplier for overtime hours.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Hours in a shift before overtime applies.
    #[serde(default = "default_overtime_threshold_hours")]
    pub overtime_threshold_hours: Decimal,
}

impl RateConfig {
    /// Builds a rate configuration using the built-in default multipliers.
    pub fn with_base_rate(base_rate: Decimal) -> Self {
        RateDefaults::default().with_base_rate(base_rate)
    }

    /// Checks the rate invariants.
    ///
    /// The base rate must be non-negative, every multiplier at least 1 and
    /// the overtime threshold strictly positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_rate < Decimal::ZERO {
            return Err(EngineError::invalid_config(format!(
                "base_rate must not be negative, got {}",
                self.base_rate.normalize()
            )));
        }
        let multipliers = [
            ("saturday_multiplier", self.saturday_multiplier),
            ("sunday_multiplier", self.sunday_multiplier),
            ("public_holiday_multiplier", self.public_holiday_multiplier),
            ("overtime_multiplier", self.overtime_multiplier),
        ];
        for (name, value) in multipliers {
            if value < Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "{} must be at least 1, got {}",
                    name,
                    value.normalize()
                )));
            }
        }
        if self.overtime_threshold_hours <= Decimal::ZERO {
            return Err(EngineError::invalid_config(format!(
                "overtime_threshold_hours must be greater than 0, got {}",
                self.overtime_threshold_hours.normalize()
            )));
        }
        Ok(())
    }
}

/// One marginal bracket of a progressive tax schedule.
///
/// Income above `over` is taxed at `rate`, on top of the fixed `base`
/// owed on the income up to `over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The income this bracket starts above.
    pub over: Decimal,
    /// Tax owed on income up to `over`.
    pub base: Decimal,
    /// The marginal rate as a fraction (0.325 for 32.5%).
    pub rate: Decimal,
}

/// A flat levy charged on the whole income once it passes a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevyConfig {
    /// The levy rate as a fraction of income.
    pub rate: Decimal,
    /// The levy applies only to incomes strictly above this.
    pub threshold: Decimal,
}

/// A progressive income tax schedule plus levy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// The schedule's display name.
    pub name: String,
    /// Brackets ordered by `over`, starting at zero.
    pub brackets: Vec<TaxBracket>,
    /// The levy charged alongside income tax.
    pub levy: LevyConfig,
}

impl Default for TaxSchedule {
    fn default() -> Self {
        fn bracket(over: i64, base: i64, rate: Decimal) -> TaxBracket {
            TaxBracket {
                over: Decimal::new(over, 0),
                base: Decimal::new(base, 0),
                rate,
            }
        }

        Self {
            name: "Resident individual rates".to_string(),
            brackets: vec![
                bracket(0, 0, Decimal::ZERO),
                bracket(18_200, 0, Decimal::new(19, 2)),
                bracket(45_000, 5_092, Decimal::new(325, 3)),
                bracket(120_000, 29_467, Decimal::new(37, 2)),
                bracket(180_000, 51_667, Decimal::new(45, 2)),
            ],
            levy: LevyConfig {
                rate: Decimal::new(2, 2),
                threshold: Decimal::new(23_226, 0),
            },
        }
    }
}

impl TaxSchedule {
    /// Checks that the schedule is a well-formed progressive table.
    ///
    /// The first bracket must start at zero, starts must strictly increase,
    /// and marginal rates must lie in `[0, 1]` and never decrease.
    pub fn validate(&self) -> EngineResult<()> {
        let first = self.brackets.first().ok_or_else(|| {
            EngineError::invalid_config(format!("tax schedule '{}' has no brackets", self.name))
        })?;
        if !first.over.is_zero() {
            return Err(EngineError::invalid_config(format!(
                "first bracket of '{}' must start at 0, got {}",
                self.name,
                first.over.normalize()
            )));
        }
        for bracket in &self.brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::invalid_config(format!(
                    "bracket over {} has rate {} outside [0, 1]",
                    bracket.over.normalize(),
                    bracket.rate.normalize()
                )));
            }
            if bracket.base < Decimal::ZERO {
                return Err(EngineError::invalid_config(format!(
                    "bracket over {} has negative base",
                    bracket.over.normalize()
                )));
            }
        }
        for pair in self.brackets.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.over <= lower.over {
                return Err(EngineError::invalid_config(format!(
                    "bracket starts must increase: {} follows {}",
                    upper.over.normalize(),
                    lower.over.normalize()
                )));
            }
            if upper.rate < lower.rate {
                return Err(EngineError::invalid_config(format!(
                    "marginal rates must not decrease: {} above {} is lower than {}",
                    upper.rate.normalize(),
                    upper.over.normalize(),
                    lower.rate.normalize()
                )));
            }
        }
        if self.levy.rate < Decimal::ZERO || self.levy.rate > Decimal::ONE {
            return Err(EngineError::invalid_config(format!(
                "levy rate {} outside [0, 1]",
                self.levy.rate.normalize()
            )));
        }
        if self.levy.threshold < Decimal::ZERO {
            return Err(EngineError::invalid_config("levy threshold must not be negative"));
        }
        Ok(())
    }
}

/// The complete region configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RegionConfig {
    metadata: RegionMetadata,
    rate_defaults: RateDefaults,
    tax_schedule: TaxSchedule,
    public_holidays: PublicHolidaySet,
}

impl RegionConfig {
    /// Creates a new RegionConfig from its component parts.
    pub fn new(
        metadata: RegionMetadata,
        rate_defaults: RateDefaults,
        tax_schedule: TaxSchedule,
        public_holidays: PublicHolidaySet,
    ) -> Self {
        Self {
            metadata,
            rate_defaults,
            tax_schedule,
            public_holidays,
        }
    }

    /// Returns the region metadata.
    pub fn region(&self) -> &RegionMetadata {
        &self.metadata
    }

    /// Returns the default workplace multipliers.
    pub fn rate_defaults(&self) -> &RateDefaults {
        &self.rate_defaults
    }

    /// Returns the income tax schedule.
    pub fn tax_schedule(&self) -> &TaxSchedule {
        &self.tax_schedule
    }

    /// Returns the configured public holidays.
    pub fn public_holidays(&self) -> &PublicHolidaySet {
        &self.public_holidays
    }
}
