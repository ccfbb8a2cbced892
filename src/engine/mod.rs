//! Statutory payroll calculation.
//!
//! [`calculate`] is a pure function of the request and one rate snapshot: it
//! holds no state, never blocks and never fails. Each deduction and employer
//! contribution is rounded once from its full-precision value; totals are
//! exact sums of those rounded entries, so `net_salary` and `employer_cost`
//! always reconcile with the itemised maps.

pub mod money;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::model::earnings::PayrollRequest;
use crate::model::rates::StatutoryRateConfig;
use crate::model::result::{Anomaly, Breakdown, ContributionKind, DeductionKind, PayrollResult};
use money::round_money;

pub fn calculate(request: &PayrollRequest, rates: &StatutoryRateConfig) -> PayrollResult {
    let earnings_gross = request.earnings.gross();
    let pf_wage = request.earnings.pf_wage();
    let pf_wage_capped = pf_wage.min(rates.pf_wage_ceiling);

    let mut statutory_deductions = BTreeMap::new();
    let mut employer_contributions = BTreeMap::new();

    if !request.non_account_worker {
        let esi_eligible = earnings_gross <= rates.esi_wage_ceiling;

        statutory_deductions.insert(
            DeductionKind::Epf,
            round_money(pf_wage_capped * rates.pf_employee_rate),
        );
        if esi_eligible {
            statutory_deductions.insert(
                DeductionKind::Esi,
                round_money(earnings_gross * rates.esi_employee_rate),
            );
        }

        let (eps, epf_residual) = employer_pf_split(pf_wage_capped, rates);
        employer_contributions.insert(ContributionKind::Eps, eps);
        employer_contributions.insert(ContributionKind::Epf, epf_residual);
        employer_contributions.insert(
            ContributionKind::Edli,
            round_money(pf_wage_capped * rates.edli_rate),
        );
        employer_contributions.insert(
            ContributionKind::Admin,
            round_money((pf_wage_capped * rates.admin_rate).max(rates.admin_minimum_charge)),
        );
        if esi_eligible {
            employer_contributions.insert(
                ContributionKind::Esi,
                round_money(earnings_gross * rates.esi_employer_rate),
            );
        }
    }

    statutory_deductions.insert(DeductionKind::ProfessionalTax, round_money(request.pt_amount));
    statutory_deductions.insert(DeductionKind::Other, round_money(request.other_deductions));

    let earnings_gross = round_money(earnings_gross);
    let total_deductions: Decimal = statutory_deductions.values().copied().sum();
    let total_contributions: Decimal = employer_contributions.values().copied().sum();

    let net_salary = earnings_gross - total_deductions;
    let employer_cost = earnings_gross + total_contributions;

    let mut anomalies = Vec::new();
    if net_salary < Decimal::ZERO {
        anomalies.push(Anomaly::NegativeNetSalary);
    }
    if pf_wage_capped > pf_wage {
        anomalies.push(Anomaly::PfWageCappedExceedsPfWage);
    }

    PayrollResult {
        breakdown: Breakdown {
            earnings_gross,
            pf_wage: round_money(pf_wage),
            pf_wage_capped: round_money(pf_wage_capped),
            total_deductions,
        },
        statutory_deductions,
        employer_contributions,
        net_salary,
        employer_cost,
        anomalies,
    }
}

/// Splits the combined employer PF into (EPS, EPF residual).
///
/// EPS is bounded by the EPS ceiling; the residual is whatever remains of the
/// rounded combined contribution, so the two always add up to it.
fn employer_pf_split(pf_wage_capped: Decimal, rates: &StatutoryRateConfig) -> (Decimal, Decimal) {
    let combined = round_money(pf_wage_capped * rates.pf_employer_rate);
    let eps = round_money((pf_wage_capped * rates.eps_rate).min(rates.eps_ceiling())).min(combined);

    (eps, combined - eps)
}
