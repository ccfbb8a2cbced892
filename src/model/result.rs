use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Employee-side deductions, named the way the result view labels them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, Serialize)]
pub enum DeductionKind {
    #[strum(serialize = "EPF")]
    #[serde(rename = "EPF")]
    Epf,
    #[strum(serialize = "ESI")]
    #[serde(rename = "ESI")]
    Esi,
    #[strum(serialize = "PT")]
    #[serde(rename = "PT")]
    ProfessionalTax,
    #[strum(serialize = "Other")]
    #[serde(rename = "Other")]
    Other,
}

impl DeductionKind {
    /// Part of the PF or ESI scheme family.
    pub fn is_scheme(&self) -> bool {
        matches!(self, DeductionKind::Epf | DeductionKind::Esi)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter, Serialize)]
pub enum ContributionKind {
    #[strum(serialize = "EPS")]
    #[serde(rename = "EPS")]
    Eps,
    /// Employer's EPF share left after EPS is carved out.
    #[strum(serialize = "EPF")]
    #[serde(rename = "EPF")]
    Epf,
    #[strum(serialize = "EDLI")]
    #[serde(rename = "EDLI")]
    Edli,
    #[strum(serialize = "Admin")]
    #[serde(rename = "Admin")]
    Admin,
    #[strum(serialize = "ESI")]
    #[serde(rename = "ESI")]
    Esi,
}

/// Conditions the engine reports instead of failing on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Anomaly {
    NegativeNetSalary,
    PfWageCappedExceedsPfWage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub earnings_gross: Decimal,
    pub pf_wage: Decimal,
    pub pf_wage_capped: Decimal,
    pub total_deductions: Decimal,
}

/// Output of one calculation. Every amount is rounded to paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollResult {
    pub breakdown: Breakdown,
    pub statutory_deductions: BTreeMap<DeductionKind, Decimal>,
    pub employer_contributions: BTreeMap<ContributionKind, Decimal>,
    pub net_salary: Decimal,
    pub employer_cost: Decimal,
    pub anomalies: Vec<Anomaly>,
}

impl PayrollResult {
    pub fn deduction(&self, kind: DeductionKind) -> Option<Decimal> {
        self.statutory_deductions.get(&kind).copied()
    }

    pub fn contribution(&self, kind: ContributionKind) -> Option<Decimal> {
        self.employer_contributions.get(&kind).copied()
    }

    pub fn total_contributions(&self) -> Decimal {
        self.employer_contributions.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kinds_render_as_result_labels() {
        let labels: Vec<String> = DeductionKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, ["EPF", "ESI", "PT", "Other"]);

        let labels: Vec<String> = ContributionKind::iter().map(|k| k.as_ref().to_owned()).collect();
        assert_eq!(labels, ["EPS", "EPF", "EDLI", "Admin", "ESI"]);
    }

    #[test]
    fn anomalies_are_snake_case() {
        assert_eq!(Anomaly::NegativeNetSalary.to_string(), "negative_net_salary");
        assert_eq!(
            serde_json::to_string(&Anomaly::PfWageCappedExceedsPfWage).unwrap(),
            "\"pf_wage_capped_exceeds_pf_wage\""
        );
    }

    #[test]
    fn scheme_deductions() {
        assert!(DeductionKind::Epf.is_scheme());
        assert!(DeductionKind::Esi.is_scheme());
        assert!(!DeductionKind::ProfessionalTax.is_scheme());
        assert!(!DeductionKind::Other.is_scheme());
    }
}
