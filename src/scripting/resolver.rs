// Tue Feb 03 2026 - Alex

use crate::scripting::error::ContractError;
use crate::scripting::loader::LoadedScript;
use crate::scripting::types::ScriptValue;
use rhai::{FnAccess, FnPtr};

/// Default name of the function the host calls.
pub const ENTRY_POINT_NAME: &str = "computeCharge";

/// The resolved, invocable entry point
#[derive(Debug, Clone)]
pub enum ComputeEntryPoint {
    /// A `fn` definition at the script's top level.
    ScriptFunction { name: String, params: Vec<String> },
    /// A global bound to a function pointer or closure.
    Pointer { name: String, ptr: FnPtr },
}

impl ComputeEntryPoint {
    pub fn name(&self) -> &str {
        match self {
            ComputeEntryPoint::ScriptFunction { name, .. } => name,
            ComputeEntryPoint::Pointer { name, .. } => name,
        }
    }

    /// Number of parameters, when the definition makes it known.
    pub fn arity(&self) -> Option<usize> {
        match self {
            ComputeEntryPoint::ScriptFunction { params, .. } => Some(params.len()),
            ComputeEntryPoint::Pointer { .. } => None,
        }
    }
}

/// Find the entry point `name`, preferring the overload taking `arg_count` parameters.
///
/// When no overload matches, the first public definition is returned so the
/// caller reports the arity mismatch.
pub fn resolve(script: &LoadedScript, name: &str, arg_count: usize) -> Result<ComputeEntryPoint, ContractError> {
    let mut private = false;
    let mut overloads: Vec<Vec<String>> = Vec::new();

    for func in script.ast().iter_functions().filter(|f| f.name == name) {
        if func.access == FnAccess::Private {
            private = true;
            continue;
        }
        overloads.push(func.params.iter().map(|p| p.to_string()).collect());
    }

    if !overloads.is_empty() {
        log::trace!("{} has {} public overload(s)", name, overloads.len());
        let index = overloads.iter().position(|p| p.len() == arg_count).unwrap_or(0);
        let params = overloads.swap_remove(index);
        return Ok(ComputeEntryPoint::ScriptFunction { name: name.to_string(), params });
    }

    if let Some(value) = script.global(name) {
        let value = value.clone().flatten();
        if let Some(ptr) = value.clone().try_cast::<FnPtr>() {
            return Ok(ComputeEntryPoint::Pointer { name: name.to_string(), ptr });
        }
        return Err(ContractError::WrongKind {
            name: name.to_string(),
            got: ScriptValue::from(value).type_name().to_string(),
        });
    }

    if private {
        return Err(ContractError::WrongKind {
            name: name.to_string(),
            got: "private function".to_string(),
        });
    }

    Err(ContractError::Missing { name: name.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripting::environment::{BufferSink, ScriptEnvironment};
    use crate::scripting::loader::load;
    use std::sync::Arc;

    fn loaded(source: &str) -> LoadedScript {
        let env = ScriptEnvironment::new(Arc::new(BufferSink::new()), Vec::new());
        load(env, "test.rhai", source).unwrap()
    }

    #[test]
    fn test_resolve_script_function() {
        let script = loaded("fn computeCharge(a, b, c, tag) { 1.0 }");
        let entry = resolve(&script, ENTRY_POINT_NAME, 4).unwrap();

        assert_eq!(entry.name(), ENTRY_POINT_NAME);
        assert_eq!(entry.arity(), Some(4));
    }

    #[test]
    fn test_resolve_closure_binding() {
        let script = loaded("let computeCharge = |a, b, c, tag| (a + b + c).to_float();");
        let entry = resolve(&script, ENTRY_POINT_NAME, 4).unwrap();

        assert!(matches!(entry, ComputeEntryPoint::Pointer { .. }));
        assert_eq!(entry.arity(), None);
    }

    #[test]
    fn test_missing_entry_point() {
        let script = loaded(r#"requireInput("distance"); fn somethingElse() { 1.0 }"#);
        let err = resolve(&script, ENTRY_POINT_NAME, 4).unwrap_err();

        assert_eq!(err.kind(), "missing");
        assert_eq!(err, ContractError::Missing { name: ENTRY_POINT_NAME.to_string() });
    }

    #[test]
    fn test_non_invocable_bindings() {
        for (source, got) in [
            ("let computeCharge = 42;", "int"),
            (r#"const computeCharge = "blue";"#, "string"),
            ("let computeCharge = [1.0];", "array"),
            ("let computeCharge = 2.5;", "float"),
        ] {
            let err = resolve(&loaded(source), ENTRY_POINT_NAME, 4).unwrap_err();
            assert_eq!(err.kind(), "wrong-kind", "{}", source);
            assert_eq!(
                err,
                ContractError::WrongKind { name: ENTRY_POINT_NAME.to_string(), got: got.to_string() }
            );
        }
    }

    #[test]
    fn test_private_function_is_wrong_kind() {
        let script = loaded("private fn computeCharge(a, b, c, tag) { 1.0 }");
        let err = resolve(&script, ENTRY_POINT_NAME, 4).unwrap_err();
        assert_eq!(err.kind(), "wrong-kind");
    }

    #[test]
    fn test_overload_matching_arg_count_preferred() {
        for source in [
            "fn computeCharge(a) { 0.0 } fn computeCharge(a, b, c, tag) { 1.0 }",
            "fn computeCharge(a, b, c, tag) { 1.0 } fn computeCharge(a) { 0.0 }",
        ] {
            let script = loaded(source);
            assert_eq!(resolve(&script, ENTRY_POINT_NAME, 4).unwrap().arity(), Some(4), "{}", source);
            assert_eq!(resolve(&script, ENTRY_POINT_NAME, 1).unwrap().arity(), Some(1), "{}", source);
        }
    }

    #[test]
    fn test_no_matching_overload_keeps_a_definition() {
        let script = loaded("fn computeCharge(a) { 0.0 } fn computeCharge(a, b) { 0.0 }");
        let entry = resolve(&script, ENTRY_POINT_NAME, 4).unwrap();
        assert!(matches!(entry.arity(), Some(1) | Some(2)));
    }
}
