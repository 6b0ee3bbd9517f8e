// Tue Feb 03 2026 - Alex

use crate::scripting::error::{ContractError, ConversionError, HostResult, Phase, ScriptError};
use crate::scripting::loader::LoadedScript;
use crate::scripting::resolver::ComputeEntryPoint;
use crate::scripting::types::{HostArg, ScriptValue};
use rhai::{CallFnOptions, Dynamic};

/// Semantic type the entry point must return.
pub const EXPECTED_RETURN_TYPE: &str = "float";

/// Call the entry point with the host's arguments and convert the result.
pub fn invoke(script: &LoadedScript, entry: &ComputeEntryPoint, args: &[HostArg]) -> HostResult<f64> {
    if let Some(expected) = entry.arity() {
        if expected != args.len() {
            return Err(ContractError::ArityMismatch {
                name: entry.name().to_string(),
                expected,
                got: args.len(),
            }
            .into());
        }
    }

    let call_args: Vec<Dynamic> = args.iter().map(HostArg::to_dynamic).collect();
    log::debug!(
        "calling {}({})",
        entry.name(),
        args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
    );

    let returned = call(script, entry, call_args)?;
    let value = ScriptValue::from(returned);
    log::debug!("{} returned {} ({})", entry.name(), value, value.type_name());

    to_host_number(value)
}

/// Fail unless the script declared exactly one input per host argument.
pub fn check_declared_inputs(script: &LoadedScript, args: &[HostArg]) -> Result<(), ContractError> {
    let declared = script.declarations().len();
    if declared != args.len() {
        return Err(ContractError::UndeclaredInputs { declared, supplied: args.len() });
    }
    Ok(())
}

fn call(script: &LoadedScript, entry: &ComputeEntryPoint, args: Vec<Dynamic>) -> Result<Dynamic, ScriptError> {
    let result = match entry {
        ComputeEntryPoint::ScriptFunction { name, .. } => {
            let mut scope = script.scope_snapshot();
            let options = CallFnOptions::new().eval_ast(false).rewind_scope(true);
            script
                .engine()
                .call_fn_with_options::<Dynamic>(options, &mut scope, script.ast(), name, args)
        }
        ComputeEntryPoint::Pointer { ptr, .. } => ptr.call::<Dynamic>(script.engine(), script.ast(), args),
    };

    result.map_err(|err| ScriptError::from_eval(Phase::Invoke, script.source_name(), &err))
}

// The semantic type is checked before any numeric extraction.
fn to_host_number(value: ScriptValue) -> HostResult<f64> {
    match value {
        ScriptValue::Float(n) if n.is_finite() => Ok(n),
        ScriptValue::Float(n) => Err(ConversionError { cause: format!("{} is not a finite number", n) }.into()),
        other => Err(ContractError::TypeMismatch {
            expected: EXPECTED_RETURN_TYPE.to_string(),
            got: other.type_name().to_string(),
        }
        .into()),
    }
}
