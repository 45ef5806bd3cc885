//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for pricing shifts,
//! calculating income tax, rolling recurring expenses forward, and
//! reporting on savings goals and overall finances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    GoalProgressRequest, RolloverRequest, ShiftPayRequest, SummaryRequest, TaxRequest,
};
pub use response::{ApiError, ApiErrorResponse, HolidayListResponse, RolloverResponse};
pub use state::AppState;
