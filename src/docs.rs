use crate::api::payroll::{
    BreakdownResponse, CalculatePayroll, EarningsInput, PayrollCalculationResponse,
};
use crate::model::rates::{RateSchedule, RateSnapshot, StatutoryRateConfig};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cashew Payroll API",
        version = "1.0.0",
        description = r#"
## Statutory Payroll Calculator (India)

Computes one employee's monthly payroll from its earnings components:

- **Gross earnings** and the **PF wage** (basic + DA), capped at the PF wage ceiling
- **Statutory deductions**: EPF, ESI (when gross is within the ESI ceiling), Professional Tax, other deductions
- **Employer contributions**: EPS, employer EPF, EDLI, PF admin charges, employer ESI
- **Net salary** and **employer cost**

Non-account workers are exempt from PF and ESI on both sides.

### 📐 Rates
Statutory rates are versioned snapshots selected by the request's month.
`GET /api/payroll/rates` lists the snapshots this server has loaded.

### 📦 Response Format
- Amounts are rupees rounded half-up to paise
- Every response carries `request_id`, `api_version` and `rates_version`

---
Built with **Rust**, **Actix Web**, **rust_decimal**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::payroll::calculate_payroll,
        crate::api::payroll::list_rates
    ),
    components(
        schemas(
            CalculatePayroll,
            EarningsInput,
            PayrollCalculationResponse,
            BreakdownResponse,
            RateSchedule,
            RateSnapshot,
            StatutoryRateConfig
        )
    ),
    tags(
        (name = "Payroll", description = "Payroll calculation APIs"),
    )
)]
pub struct ApiDoc;
