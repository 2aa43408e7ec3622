//! The SCORM runtime API object and its by-name call surface.

mod api;
mod dispatch;
mod value;

pub use api::{
    ScormApi, TerminateGuard, DIAGNOSTIC_PLACEHOLDER, ERROR_STRING_PLACEHOLDER, NO_ERROR,
};
pub use dispatch::{ApiCall, ApiMethod, ApiResponse};
pub use value::{data_model_from_json, CmiValue, DataModel};
