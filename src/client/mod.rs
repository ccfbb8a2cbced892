//! State kept by a calculator front-end between submissions.
//!
//! The server never calls into this module. A front-end embedding the crate
//! (a WASM form, a TUI, a test harness) holds a [`result_slot::ResultSlot`]
//! per calculator view and feeds every `/payroll/calculate` response through it.

pub mod result_slot;
