// Tue Feb 03 2026 - Alex

use rhai::{EvalAltResult, ParseError, Position};
use std::fmt;
use thiserror::Error;

/// Stage of the run in which the interpreter reported a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Invoke,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Load => write!(f, "load"),
            Phase::Invoke => write!(f, "invoke"),
        }
    }
}

/// The interpreter rejected the source or raised an uncaught error
#[derive(Error, Debug, Clone)]
#[error("script {phase} failed: {message}")]
pub struct ScriptError {
    pub phase: Phase,
    pub message: String,
    pub location: Option<String>,
    pub backtrace: Vec<String>,
}

impl ScriptError {
    pub fn from_parse(phase: Phase, source: &str, err: &ParseError) -> Self {
        Self {
            phase,
            message: err.to_string(),
            location: format_location(Some(source), err.position()),
            backtrace: Vec::new(),
        }
    }

    pub fn from_eval(phase: Phase, source: &str, err: &EvalAltResult) -> Self {
        let (backtrace, innermost) = collect_backtrace(source, err);
        Self {
            phase,
            message: err.to_string(),
            location: format_location(Some(source), innermost),
            backtrace,
        }
    }
}

/// The script violated the host calling contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("definition of {name} is required")]
    Missing { name: String },

    #[error("{name} must be defined as a function, but it is bound to a {got}")]
    WrongKind { name: String, got: String },

    #[error("expected the compute function to return a {expected}, but got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("{name} takes {expected} parameters, but the host supplies {got} arguments")]
    ArityMismatch { name: String, expected: usize, got: usize },

    #[error("script declared {declared} inputs, but the host supplies {supplied} arguments")]
    UndeclaredInputs { declared: usize, supplied: usize },
}

impl ContractError {
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::Missing { .. } => "missing",
            ContractError::WrongKind { .. } => "wrong-kind",
            ContractError::TypeMismatch { .. } => "type-mismatch",
            ContractError::ArityMismatch { .. } => "arity-mismatch",
            ContractError::UndeclaredInputs { .. } => "undeclared-inputs",
        }
    }
}

/// A correctly typed result that has no exact host representation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert result to a host number: {cause}")]
pub struct ConversionError {
    pub cause: String,
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type HostResult<T> = Result<T, HostError>;

fn format_location(source: Option<&str>, pos: Position) -> Option<String> {
    let line = pos.line()?;
    match (source, pos.position()) {
        (Some(src), Some(col)) => Some(format!("{}:{}:{}", src, line, col)),
        (Some(src), None) => Some(format!("{}:{}", src, line)),
        (None, _) => Some(format!("line {}", line)),
    }
}

// Walks nested call errors outermost first, returning the frames and the
// position of the innermost error.
fn collect_backtrace(source: &str, error: &EvalAltResult) -> (Vec<String>, Position) {
    let mut frames = Vec::new();
    let mut current = error;

    loop {
        match current {
            EvalAltResult::ErrorInFunctionCall(name, src, inner, pos) => {
                let src = if src.is_empty() { source } else { src.as_str() };
                let at = format_location(Some(src), *pos).unwrap_or_else(|| src.to_string());
                frames.push(format!("at {} ({})", display_fn_name(name), at));
                current = inner.as_ref();
            }
            EvalAltResult::ErrorInModule(module, inner, pos) => {
                let at = format_location(Some(source), *pos).unwrap_or_else(|| source.to_string());
                frames.push(format!("in module {} ({})", module, at));
                current = inner.as_ref();
            }
            _ => break,
        }
    }

    let innermost = current.position();
    if let Some(at) = format_location(Some(source), innermost) {
        frames.push(format!("error: {} ({})", current, at));
    }

    (frames, innermost)
}

fn display_fn_name(name: &str) -> &str {
    if name.starts_with("anon$") {
        "<lambda>"
    } else {
        name
    }
}
