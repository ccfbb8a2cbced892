use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::period::PayPeriod;

/// Earning figures for one pay period, in rupees.
///
/// Every field is already non-negative and rounded to paise by the time a value
/// of this type exists; the request boundary is responsible for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EarningsComponents {
    pub basic: Decimal,
    pub hra: Decimal,
    pub da: Decimal,
    pub conveyance: Decimal,
    pub special_allowance: Decimal,
    pub overtime: Decimal,
    pub bonus: Decimal,
    pub other_earnings: Decimal,
}

impl EarningsComponents {
    pub fn gross(&self) -> Decimal {
        self.basic
            + self.hra
            + self.da
            + self.conveyance
            + self.special_allowance
            + self.overtime
            + self.bonus
            + self.other_earnings
    }

    /// Basic plus dearness allowance, the wage base PF law uses.
    pub fn pf_wage(&self) -> Decimal {
        self.basic + self.da
    }
}

/// A fully-defaulted, typed calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRequest {
    pub employee_code: String,
    pub month: PayPeriod,
    pub earnings: EarningsComponents,
    /// Professional tax, supplied by the caller and passed through unchanged.
    pub pt_amount: Decimal,
    pub other_deductions: Decimal,
    /// Exempt from the PF and ESI schemes on both sides.
    pub non_account_worker: bool,
}
