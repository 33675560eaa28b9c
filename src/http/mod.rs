//! HTTP client construction, single-request execution, and batch scheduling.
mod client;
mod executor;
mod scheduler;


pub use client::build_client;
pub use executor::{
    BODY_READ_ERROR, CONNECTION_ERROR, RequestBody, RequestExecutor, RequestTask, TIMEOUT_ERROR,
    TRANSPORT_ERROR, TaskPlan, status_label,
};
pub use scheduler::{DispatchPolicy, WindowReport, dispatch, window_ranges};
