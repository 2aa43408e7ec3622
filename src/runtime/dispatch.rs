//! Calling the API by its exact SCORM 1.2 method names.
//!
//! Content addresses the runtime as `API.Initialize("")`,
//! `API.GetValue("cmi.core.lesson_status")` and so on. [`ApiCall`] is one
//! such call, checked for name and arity, and [`ScormApi::dispatch`] runs it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::api::ScormApi;
use super::value::CmiValue;
use crate::error::RuntimeError;
use crate::Result;

/// One of the seven runtime API methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Initialize,
    Terminate,
    GetLastError,
    GetErrorString,
    GetDiagnostic,
    GetValue,
    SetValue,
}

impl ApiMethod {
    pub const ALL: [ApiMethod; 7] = [
        ApiMethod::Initialize,
        ApiMethod::Terminate,
        ApiMethod::GetLastError,
        ApiMethod::GetErrorString,
        ApiMethod::GetDiagnostic,
        ApiMethod::GetValue,
        ApiMethod::SetValue,
    ];

    /// The exact name content uses.
    pub fn name(&self) -> &'static str {
        match self {
            ApiMethod::Initialize => "Initialize",
            ApiMethod::Terminate => "Terminate",
            ApiMethod::GetLastError => "GetLastError",
            ApiMethod::GetErrorString => "GetErrorString",
            ApiMethod::GetDiagnostic => "GetDiagnostic",
            ApiMethod::GetValue => "GetValue",
            ApiMethod::SetValue => "SetValue",
        }
    }

    /// Number of arguments the method takes.
    pub fn arity(&self) -> usize {
        match self {
            ApiMethod::Terminate | ApiMethod::GetLastError => 0,
            ApiMethod::Initialize
            | ApiMethod::GetErrorString
            | ApiMethod::GetDiagnostic
            | ApiMethod::GetValue => 1,
            ApiMethod::SetValue => 2,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ApiMethod {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self> {
        ApiMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| RuntimeError::UnknownMethod(s.to_string()))
    }
}

/// A call whose name and argument shape have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    method: ApiMethod,
    args: Vec<CmiValue>,
}

impl ApiCall {
    /// Build a call, checking arity and that text arguments are text.
    ///
    /// `Terminate` also accepts the single empty-string argument that
    /// SCORM 1.2 content conventionally passes; it is dropped.
    pub fn new(method: ApiMethod, mut args: Vec<CmiValue>) -> Result<Self> {
        if method == ApiMethod::Terminate && args.len() == 1 && args[0].as_str() == Some("") {
            args.clear();
        }

        if args.len() != method.arity() {
            return Err(RuntimeError::Arity {
                method: method.name(),
                expected: method.arity(),
                got: args.len(),
            });
        }

        match method {
            ApiMethod::Initialize | ApiMethod::GetValue | ApiMethod::SetValue => {
                if args[0].as_str().is_none() {
                    return Err(RuntimeError::ArgumentType {
                        method: method.name(),
                        index: 0,
                        expected: "a string",
                    });
                }
            }
            _ => {}
        }

        Ok(Self { method, args })
    }

    /// Parse the method name, then check the arguments.
    pub fn parse(name: &str, args: Vec<CmiValue>) -> Result<Self> {
        Self::new(name.parse()?, args)
    }

    pub fn method(&self) -> ApiMethod {
        self.method
    }

    pub fn args(&self) -> &[CmiValue] {
        &self.args
    }

    fn text_arg(&self, index: usize) -> &str {
        self.args[index].as_str().unwrap_or_default()
    }
}

/// Renders as content would write the call, e.g. `SetValue("k", 3)`.
impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match serde_json::to_string(arg) {
                Ok(json) => f.write_str(&json)?,
                Err(_) => write!(f, "{}", arg)?,
            }
        }
        f.write_str(")")
    }
}

/// What a dispatched call returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// `Initialize` / `Terminate`.
    Bool(bool),
    /// `GetLastError`.
    Code(i32),
    /// `GetErrorString` / `GetDiagnostic`.
    Text(String),
    /// `GetValue`; `None` when the element is absent.
    Value(Option<CmiValue>),
    /// `SetValue`.
    Unit,
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiResponse::Bool(b) => write!(f, "{}", b),
            ApiResponse::Code(code) => write!(f, "{}", code),
            ApiResponse::Text(text) => f.write_str(text),
            ApiResponse::Value(Some(value)) => write!(f, "{}", value),
            ApiResponse::Value(None) => f.write_str("undefined"),
            ApiResponse::Unit => Ok(()),
        }
    }
}

impl ScormApi {
    /// Run a checked call against this session.
    pub fn dispatch(&mut self, call: &ApiCall) -> ApiResponse {
        match call.method {
            ApiMethod::Initialize => ApiResponse::Bool(self.initialize(call.text_arg(0))),
            ApiMethod::Terminate => ApiResponse::Bool(self.terminate()),
            ApiMethod::GetLastError => ApiResponse::Code(self.get_last_error()),
            ApiMethod::GetErrorString => {
                ApiResponse::Text(self.get_error_string(&call.args[0]).to_string())
            }
            ApiMethod::GetDiagnostic => {
                ApiResponse::Text(self.get_diagnostic(&call.args[0]).to_string())
            }
            ApiMethod::GetValue => ApiResponse::Value(self.get_value(call.text_arg(0)).cloned()),
            ApiMethod::SetValue => {
                self.set_value(call.text_arg(0), call.args[1].clone());
                ApiResponse::Unit
            }
        }
    }
}
