//! The SCORM 1.2 runtime API object.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::value::{CmiValue, DataModel};
use crate::error::RuntimeError;
use crate::session::{SessionId, SessionPhase};
use crate::Result;

/// Value reported by `GetLastError` at every stage of a session.
pub const NO_ERROR: i32 = 0;

/// Text returned by `GetErrorString` for every code.
pub const ERROR_STRING_PLACEHOLDER: &str = "I haven't written any error strings yet.";

/// Text returned by `GetDiagnostic` for every code.
pub const DIAGNOSTIC_PLACEHOLDER: &str = "I haven't written any error handling yet.";

/// Name of the variable Terminate's guard compares against but never binds.
const UNBOUND_GUARD_VARIABLE: &str = "b";

/// How `Terminate` treats the unbound variable in its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminateGuard {
    /// Drop the unbound clause: terminate iff initialized and not terminated.
    #[default]
    IgnoreUnbound,
    /// Evaluating the guard faults, so Terminate never succeeds.
    UnboundReference,
}

impl std::str::FromStr for TerminateGuard {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ignore-unbound" => Ok(TerminateGuard::IgnoreUnbound),
            "unbound-reference" => Ok(TerminateGuard::UnboundReference),
            other => Err(RuntimeError::InvalidValue(format!(
                "unknown terminate guard '{}'",
                other
            ))),
        }
    }
}

/// A runtime API instance for one piece of content.
///
/// The lifecycle is two one-way flags. `last_error` never changes from
/// [`NO_ERROR`]. The data store is whatever the host supplied.
#[derive(Debug, Clone)]
pub struct ScormApi {
    id: SessionId,
    data: DataModel,
    initialized: bool,
    terminated: bool,
    last_error: i32,
    terminate_guard: TerminateGuard,
}

impl ScormApi {
    /// Create a session over the given initial data.
    pub fn new(data: DataModel) -> Self {
        Self::with_guard(data, TerminateGuard::default())
    }

    /// Create a session with an explicit Terminate guard interpretation.
    pub fn with_guard(data: DataModel, terminate_guard: TerminateGuard) -> Self {
        let id = SessionId::new();
        debug!(session = %id, elements = data.len(), ?terminate_guard, "session created");
        Self {
            id,
            data,
            initialized: false,
            terminated: false,
            last_error: NO_ERROR,
            terminate_guard,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_flags(self.initialized, self.terminated)
    }

    pub fn terminate_guard(&self) -> TerminateGuard {
        self.terminate_guard
    }

    /// Borrow the data store.
    pub fn data(&self) -> &DataModel {
        &self.data
    }

    /// Consume the session and hand the data store back to the host.
    pub fn into_data(self) -> DataModel {
        self.data
    }

    /// `Initialize(param)`.
    ///
    /// Accepted only for the empty string on a session that has neither been
    /// initialized nor terminated.
    pub fn initialize(&mut self, param: &str) -> bool {
        if !param.is_empty() || !self.phase().can_transition_to(SessionPhase::Initialized) {
            debug!(session = %self.id, phase = %self.phase(), param, "Initialize rejected");
            return false;
        }
        self.initialized = true;
        info!(session = %self.id, "session initialized");
        true
    }

    /// `Terminate()`, reporting a faulting guard as `false`.
    pub fn terminate(&mut self) -> bool {
        match self.try_terminate() {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(session = %self.id, error = %err, "Terminate guard faulted");
                false
            }
        }
    }

    /// `Terminate()`, surfacing a faulting guard as an error.
    ///
    /// Under [`TerminateGuard::UnboundReference`] this always returns
    /// [`RuntimeError::UnboundReference`] and leaves the session unchanged.
    pub fn try_terminate(&mut self) -> Result<bool> {
        if self.terminate_guard == TerminateGuard::UnboundReference {
            return Err(RuntimeError::UnboundReference(UNBOUND_GUARD_VARIABLE));
        }
        if !self.phase().can_transition_to(SessionPhase::Terminated) {
            debug!(session = %self.id, phase = %self.phase(), "Terminate rejected");
            return Ok(false);
        }
        self.terminated = true;
        info!(session = %self.id, "session terminated");
        Ok(true)
    }

    /// `GetLastError()`.
    pub fn get_last_error(&self) -> i32 {
        self.last_error
    }

    /// `GetErrorString(code)`. The code is ignored.
    pub fn get_error_string(&self, _code: &CmiValue) -> &'static str {
        ERROR_STRING_PLACEHOLDER
    }

    /// `GetDiagnostic(code)`. The code is ignored.
    pub fn get_diagnostic(&self, _code: &CmiValue) -> &'static str {
        DIAGNOSTIC_PLACEHOLDER
    }

    /// `GetValue(element)`. `None` when the element was never stored.
    pub fn get_value(&self, element: &str) -> Option<&CmiValue> {
        let value = self.data.get(element);
        debug!(session = %self.id, element, found = value.is_some(), "GetValue");
        value
    }

    /// `SetValue(element, value)`. Always stores, in any phase.
    pub fn set_value(&mut self, element: impl Into<String>, value: impl Into<CmiValue>) {
        let element = element.into();
        debug!(session = %self.id, element = %element, "SetValue");
        self.data.insert(element, value.into());
    }
}

impl Default for ScormApi {
    fn default() -> Self {
        Self::new(DataModel::new())
    }
}
