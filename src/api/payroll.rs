use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::api::coerce;
use crate::api::request_id::{REQUEST_ID_HEADER, RequestId};
use crate::engine::{self, money::amount_from_f64, money::amount_to_f64};
use crate::error::ApiError;
use crate::model::earnings::{EarningsComponents, PayrollRequest};
use crate::model::period::PayPeriod;
use crate::model::rates::RateSchedule;
use crate::model::result::PayrollResult;

pub const API_VERSION: &str = "v1";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EarningsInput {
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 15000.0)]
    pub basic: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 6000.0)]
    pub hra: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 0.0)]
    pub da: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 1600.0)]
    pub conveyance: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 2000.0)]
    pub special_allowance: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 0.0)]
    pub overtime: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 0.0)]
    pub bonus: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 0.0)]
    pub other_earnings: f64,
}

impl From<&EarningsInput> for EarningsComponents {
    fn from(e: &EarningsInput) -> Self {
        EarningsComponents {
            basic: amount_from_f64(e.basic),
            hra: amount_from_f64(e.hra),
            da: amount_from_f64(e.da),
            conveyance: amount_from_f64(e.conveyance),
            special_allowance: amount_from_f64(e.special_allowance),
            overtime: amount_from_f64(e.overtime),
            bonus: amount_from_f64(e.bonus),
            other_earnings: amount_from_f64(e.other_earnings),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalculatePayroll {
    /// Optional caller identifier, echoed back in the response
    #[serde(default, deserialize_with = "coerce::text")]
    #[schema(example = "7f1c2a5e-calc-1", nullable = true)]
    pub request_id: Option<String>,

    #[serde(default, deserialize_with = "coerce::text")]
    #[schema(example = "EMP-001", nullable = true)]
    pub employee_code: Option<String>,

    /// Pay period; the current month when omitted
    #[serde(default, deserialize_with = "coerce::text")]
    #[schema(example = "2025-04", nullable = true)]
    pub month: Option<String>,

    #[serde(default, deserialize_with = "coerce::object_or_default")]
    pub earnings: EarningsInput,

    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 200.0)]
    pub pt_amount: f64,

    #[serde(default, deserialize_with = "coerce::number")]
    #[schema(example = 0.0)]
    pub other_deductions: f64,

    #[serde(default, deserialize_with = "coerce::flag")]
    #[schema(example = false)]
    pub non_account_worker: bool,
}

impl CalculatePayroll {
    /// Builds the typed request the engine consumes.
    pub fn into_request(self) -> Result<PayrollRequest, ApiError> {
        let month = match self.month.as_deref().map(str::trim) {
            None | Some("") => PayPeriod::current(),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::InvalidMonth(raw.to_string()))?,
        };

        Ok(PayrollRequest {
            employee_code: self.employee_code.unwrap_or_default(),
            month,
            earnings: EarningsComponents::from(&self.earnings),
            pt_amount: amount_from_f64(self.pt_amount),
            other_deductions: amount_from_f64(self.other_deductions),
            non_account_worker: self.non_account_worker,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BreakdownResponse {
    #[schema(example = 24600.0)]
    pub earnings_gross: f64,
    #[schema(example = 15000.0)]
    pub pf_wage: f64,
    #[schema(example = 15000.0)]
    pub pf_wage_capped: f64,
    #[schema(example = 2000.0)]
    pub total_deductions: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "request_id": "7f1c2a5e-calc-1",
    "api_version": "v1",
    "rates_version": "IN-2019-07",
    "breakdown": {
        "earnings_gross": 24600.0,
        "pf_wage": 15000.0,
        "pf_wage_capped": 15000.0,
        "total_deductions": 2000.0
    },
    "statutory_deductions": { "EPF": 1800.0, "Other": 0.0, "PT": 200.0 },
    "employer_contributions": { "Admin": 75.0, "EDLI": 75.0, "EPF": 550.5, "EPS": 1249.5 },
    "net_salary": 22600.0,
    "employer_cost": 26550.0
}))]
pub struct PayrollCalculationResponse {
    pub request_id: String,
    pub api_version: String,
    pub rates_version: String,
    pub breakdown: BreakdownResponse,
    pub statutory_deductions: BTreeMap<String, f64>,
    pub employer_contributions: BTreeMap<String, f64>,
    pub net_salary: f64,
    pub employer_cost: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<String>,
}

impl PayrollCalculationResponse {
    pub fn new(request_id: &RequestId, rates_version: &str, result: &PayrollResult) -> Self {
        Self {
            request_id: request_id.as_str().to_string(),
            api_version: API_VERSION.to_string(),
            rates_version: rates_version.to_string(),
            breakdown: BreakdownResponse {
                earnings_gross: amount_to_f64(result.breakdown.earnings_gross),
                pf_wage: amount_to_f64(result.breakdown.pf_wage),
                pf_wage_capped: amount_to_f64(result.breakdown.pf_wage_capped),
                total_deductions: amount_to_f64(result.breakdown.total_deductions),
            },
            statutory_deductions: result
                .statutory_deductions
                .iter()
                .map(|(kind, amount)| (kind.to_string(), amount_to_f64(*amount)))
                .collect(),
            employer_contributions: result
                .employer_contributions
                .iter()
                .map(|(kind, amount)| (kind.to_string(), amount_to_f64(*amount)))
                .collect(),
            net_salary: amount_to_f64(result.net_salary),
            employer_cost: amount_to_f64(result.employer_cost),
            anomalies: result.anomalies.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Calculate one month's payroll
#[utoipa::path(
    post,
    path = "/api/payroll/calculate",
    request_body = CalculatePayroll,
    responses(
        (status = 200, description = "Payroll breakdown", body = PayrollCalculationResponse),
        (status = 400, description = "Malformed body or month", body = Object, example = json!({
            "message": "Invalid month '2025-13', expected YYYY-MM"
        })),
        (status = 422, description = "No rates in force for the month", body = Object, example = json!({
            "message": "No statutory rates in force for 2001-01"
        })),
        (status = 429, description = "Too many requests")
    ),
    tag = "Payroll"
)]
pub async fn calculate_payroll(
    header_id: RequestId,
    schedule: web::Data<RateSchedule>,
    payload: web::Json<CalculatePayroll>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let request_id = payload
        .request_id
        .as_deref()
        .and_then(RequestId::from_caller)
        .unwrap_or(header_id);

    let request = payload.into_request().inspect_err(|e| {
        warn!(request_id = %request_id.as_str(), error = %e, "Rejected payroll request");
    })?;

    let snapshot = schedule.for_period(request.month).ok_or_else(|| {
        warn!(
            request_id = %request_id.as_str(),
            month = %request.month,
            "No rate snapshot in force"
        );
        ApiError::RatesNotEffective(request.month.to_string())
    })?;

    let result = engine::calculate(&request, &snapshot.rates);

    info!(
        request_id = %request_id.as_str(),
        employee_code = %request.employee_code,
        month = %request.month,
        rates_version = %snapshot.version,
        net_salary = %result.net_salary,
        "Payroll calculated"
    );
    if !result.anomalies.is_empty() {
        warn!(
            request_id = %request_id.as_str(),
            employee_code = %request.employee_code,
            anomalies = ?result.anomalies,
            "Payroll result carries anomalies"
        );
    }

    Ok(HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, request_id.as_str()))
        .json(PayrollCalculationResponse::new(&request_id, &snapshot.version, &result)))
}

/// List the statutory rate snapshots in force
#[utoipa::path(
    get,
    path = "/api/payroll/rates",
    responses(
        (status = 200, description = "Loaded rate schedule", body = RateSchedule)
    ),
    tag = "Payroll"
)]
pub async fn list_rates(schedule: web::Data<RateSchedule>) -> impl Responder {
    HttpResponse::Ok().json(schedule.get_ref())
}
