// Tue Feb 03 2026 - Alex

pub mod environment;
pub mod error;
pub mod invoke;
pub mod loader;
pub mod registrar;
pub mod resolver;
pub mod types;

pub use environment::{BufferSink, EnvironmentOptions, LanguageFeatures, OutputSink, ScriptEnvironment, StdoutSink};
pub use error::{ContractError, ConversionError, HostError, HostResult, Phase, ScriptError};
pub use invoke::{check_declared_inputs, invoke, EXPECTED_RETURN_TYPE};
pub use loader::{load, LoadedScript};
pub use registrar::{DeclarationLog, InputDeclaration, ACK, REGISTRAR_NAME};
pub use resolver::{resolve, ComputeEntryPoint, ENTRY_POINT_NAME};
pub use types::{HostArg, ScriptValue};
