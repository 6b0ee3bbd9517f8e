// Tue Feb 03 2026 - Alex

pub mod config;
pub mod harness;
pub mod scripting;
pub mod source;
pub mod ui;

pub use config::HostConfig;
pub use harness::{ChargeHarness, ChargeOutcome};
pub use scripting::{ContractError, ConversionError, HostArg, HostError, ScriptError, ScriptValue};
pub use source::ScriptSource;
