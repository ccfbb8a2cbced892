pub mod coerce;
pub mod payroll;
pub mod request_id;
