//! Statutory rates and ceilings, versioned by the month they take effect.
//!
//! Indian PF and ESI rates change by government notification, so the engine
//! never hard-codes them. A [`RateSchedule`] holds every known snapshot and
//! picks the one in force for a given pay period.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::engine::money::MAX_AMOUNT;
use crate::model::period::PayPeriod;

/// Rates are fractions (`0.12` is 12%), ceilings and charges are rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StatutoryRateConfig {
    #[schema(value_type = String, example = "0.12")]
    pub pf_employee_rate: Decimal,
    /// Combined employer PF rate; EPS is carved out of it.
    #[schema(value_type = String, example = "0.12")]
    pub pf_employer_rate: Decimal,
    #[schema(value_type = String, example = "15000")]
    pub pf_wage_ceiling: Decimal,
    #[schema(value_type = String, example = "0.0833")]
    pub eps_rate: Decimal,
    #[schema(value_type = String, example = "0.005")]
    pub edli_rate: Decimal,
    #[schema(value_type = String, example = "0.005")]
    pub admin_rate: Decimal,
    #[schema(value_type = String, example = "0")]
    pub admin_minimum_charge: Decimal,
    #[schema(value_type = String, example = "0.0075")]
    pub esi_employee_rate: Decimal,
    #[schema(value_type = String, example = "0.0325")]
    pub esi_employer_rate: Decimal,
    /// ESI applies when gross earnings are at or below this amount.
    #[schema(value_type = String, example = "21000")]
    pub esi_wage_ceiling: Decimal,
}

impl StatutoryRateConfig {
    /// Largest EPS contribution the ceiling allows.
    pub fn eps_ceiling(&self) -> Decimal {
        self.pf_wage_ceiling * self.eps_rate
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("pf_employee_rate", self.pf_employee_rate),
            ("pf_employer_rate", self.pf_employer_rate),
            ("eps_rate", self.eps_rate),
            ("edli_rate", self.edli_rate),
            ("admin_rate", self.admin_rate),
            ("esi_employee_rate", self.esi_employee_rate),
            ("esi_employer_rate", self.esi_employer_rate),
        ];
        for (name, rate) in rates {
            ensure!(
                rate >= Decimal::ZERO && rate <= Decimal::ONE,
                "{name} must be between 0 and 1, got {rate}"
            );
        }

        let amounts = [
            ("pf_wage_ceiling", self.pf_wage_ceiling),
            ("admin_minimum_charge", self.admin_minimum_charge),
            ("esi_wage_ceiling", self.esi_wage_ceiling),
        ];
        for (name, amount) in amounts {
            ensure!(amount >= Decimal::ZERO, "{name} must not be negative, got {amount}");
            ensure!(amount <= MAX_AMOUNT, "{name} must not exceed {MAX_AMOUNT}, got {amount}");
        }

        ensure!(
            self.eps_rate <= self.pf_employer_rate,
            "eps_rate ({}) cannot exceed pf_employer_rate ({})",
            self.eps_rate,
            self.pf_employer_rate
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RateSnapshot {
    #[schema(example = "IN-2019-07")]
    pub version: String,
    #[schema(value_type = String, example = "2019-07")]
    pub effective_from: PayPeriod,
    pub rates: StatutoryRateConfig,
}

/// Effective-dated rate snapshots, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawSchedule")]
pub struct RateSchedule {
    snapshots: Vec<RateSnapshot>,
}

#[derive(Deserialize)]
struct RawSchedule {
    snapshots: Vec<RateSnapshot>,
}

impl TryFrom<RawSchedule> for RateSchedule {
    type Error = anyhow::Error;

    fn try_from(raw: RawSchedule) -> Result<Self> {
        Self::new(raw.snapshots)
    }
}

static BUILTIN: Lazy<RateSchedule> = Lazy::new(|| RateSchedule {
    snapshots: vec![
        RateSnapshot {
            version: "IN-2018-06".to_string(),
            effective_from: PayPeriod::new(2018, 6).unwrap_or_else(PayPeriod::current),
            rates: StatutoryRateConfig {
                pf_employee_rate: dec!(0.12),
                pf_employer_rate: dec!(0.12),
                pf_wage_ceiling: dec!(15000),
                eps_rate: dec!(0.0833),
                edli_rate: dec!(0.005),
                admin_rate: dec!(0.005),
                admin_minimum_charge: Decimal::ZERO,
                esi_employee_rate: dec!(0.0175),
                esi_employer_rate: dec!(0.0475),
                esi_wage_ceiling: dec!(21000),
            },
        },
        RateSnapshot {
            version: "IN-2019-07".to_string(),
            effective_from: PayPeriod::new(2019, 7).unwrap_or_else(PayPeriod::current),
            rates: StatutoryRateConfig {
                pf_employee_rate: dec!(0.12),
                pf_employer_rate: dec!(0.12),
                pf_wage_ceiling: dec!(15000),
                eps_rate: dec!(0.0833),
                edli_rate: dec!(0.005),
                admin_rate: dec!(0.005),
                admin_minimum_charge: Decimal::ZERO,
                esi_employee_rate: dec!(0.0075),
                esi_employer_rate: dec!(0.0325),
                esi_wage_ceiling: dec!(21000),
            },
        },
    ],
});

impl RateSchedule {
    /// Sorts the snapshots and validates every one of them.
    pub fn new(mut snapshots: Vec<RateSnapshot>) -> Result<Self> {
        if snapshots.is_empty() {
            bail!("rate schedule must contain at least one snapshot");
        }

        let mut versions = HashSet::new();
        for snapshot in &snapshots {
            ensure!(
                versions.insert(snapshot.version.as_str()),
                "duplicate rate snapshot version '{}'",
                snapshot.version
            );
            snapshot
                .rates
                .validate()
                .with_context(|| format!("invalid rates in snapshot '{}'", snapshot.version))?;
        }

        snapshots.sort_by_key(|s| s.effective_from);
        for pair in snapshots.windows(2) {
            ensure!(
                pair[0].effective_from != pair[1].effective_from,
                "snapshots '{}' and '{}' share effective month {}",
                pair[0].version,
                pair[1].version,
                pair[0].effective_from
            );
        }

        Ok(Self { snapshots })
    }

    /// The schedule compiled into the binary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Loads a schedule from a JSON file shaped like `{"snapshots": [...]}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rates file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid rates file {}", path.display()))
    }

    /// Last snapshot effective on or before `period`.
    pub fn for_period(&self, period: PayPeriod) -> Option<&RateSnapshot> {
        self.snapshots.iter().rfind(|s| s.effective_from <= period)
    }

    pub fn latest(&self) -> &RateSnapshot {
        // `new` guarantees at least one snapshot
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn snapshots(&self) -> &[RateSnapshot] {
        &self.snapshots
    }
}
