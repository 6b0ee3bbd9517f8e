// Tue Feb 03 2026 - Alex

use crate::scripting::environment::ScriptEnvironment;
use crate::scripting::error::{Phase, ScriptError};
use crate::scripting::registrar::InputDeclaration;
use rhai::{Dynamic, Engine, Scope, AST};

/// Global bindings after the script's top level has run.
///
/// Nothing writes to a loaded script; calls run against a copy of the scope.
pub struct LoadedScript {
    engine: Engine,
    ast: AST,
    scope: Scope<'static>,
    declarations: Vec<InputDeclaration>,
    source_name: String,
}

impl LoadedScript {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn ast(&self) -> &AST {
        &self.ast
    }

    pub fn global(&self, name: &str) -> Option<&Dynamic> {
        self.scope.get(name)
    }

    pub(crate) fn scope_snapshot(&self) -> Scope<'static> {
        self.scope.clone()
    }

    pub fn declarations(&self) -> &[InputDeclaration] {
        &self.declarations
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Execute the script's top-level statements once in the environment's
/// global scope.
pub fn load(env: ScriptEnvironment, source_name: &str, source_text: &str) -> Result<LoadedScript, ScriptError> {
    let ScriptEnvironment { engine, mut scope, declarations } = env;

    let mut ast = engine
        .compile_with_scope(&scope, source_text)
        .map_err(|err| ScriptError::from_parse(Phase::Load, source_name, &err))?;
    ast.set_source(source_name);

    engine
        .run_ast_with_scope(&mut scope, &ast)
        .map_err(|err| ScriptError::from_eval(Phase::Load, source_name, &err))?;

    let declarations = declarations.snapshot();
    log::debug!(
        "loaded {}: {} functions, {} globals, {} declared inputs",
        source_name,
        ast.iter_functions().count(),
        scope.len(),
        declarations.len()
    );

    Ok(LoadedScript {
        engine,
        ast,
        scope,
        declarations,
        source_name: source_name.to_string(),
    })
}
