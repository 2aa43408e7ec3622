//! # scorm-runtime
//!
//! A stub SCORM 1.2 runtime API object.
//!
//! E-learning content talks to its host through seven calls: `Initialize`,
//! `Terminate`, `GetLastError`, `GetErrorString`, `GetDiagnostic`,
//! `GetValue` and `SetValue`. This crate models that object with a one-way
//! lifecycle and a loosely typed key/value store seeded by the host. Error
//! reporting is a placeholder: `GetLastError` is always `0`.
//!
//! ## Features
//!
//! - **Runtime API**: [`ScormApi`] with the exact stub semantics
//! - **By-name calls**: [`ApiCall`] checks SCORM method names and arity
//! - **Review mode**: seed a session from a recorded [`AttemptRecord`]
//! - **Call scripts**: replay a text file of calls and get a transcript
//!
//! ## Quick Start
//!
//! ```
//! use scorm_runtime::{CmiValue, DataModel, ScormApi};
//!
//! let mut data = DataModel::new();
//! data.insert("cmi.core.student_id".into(), "123".into());
//!
//! let mut api = ScormApi::new(data);
//! assert!(api.initialize(""));
//! assert_eq!(api.get_value("cmi.core.student_id"), Some(&CmiValue::from("123")));
//! api.set_value("cmi.core.lesson_status", "passed");
//! assert!(api.terminate());
//! assert_eq!(api.get_last_error(), 0);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod review;
pub mod runtime;
pub mod script;
pub mod session;

// Re-export commonly used types
pub use error::{Result, RuntimeError};
pub use review::{review_data, AttemptRecord};
pub use runtime::{ApiCall, ApiMethod, ApiResponse, CmiValue, DataModel, ScormApi, TerminateGuard};
pub use script::{parse_script, replay, ScriptLine, TranscriptEntry};
pub use session::{SessionId, SessionPhase};
