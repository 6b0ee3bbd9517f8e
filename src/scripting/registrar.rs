// Tue Feb 03 2026 - Alex

use crate::scripting::types::ScriptValue;
use parking_lot::Mutex;
use rhai::{Dynamic, Engine, ImmutableString};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Default global name scripts call to declare their inputs.
pub const REGISTRAR_NAME: &str = "requireInput";

/// Value every declaration call returns.
pub const ACK: &str = "ack";

/// Largest positional argument count a declaration call accepts.
pub const MAX_DECLARATION_ARGS: usize = 12;

/// One call to the declaration capability
#[derive(Debug, Clone, PartialEq)]
pub struct InputDeclaration {
    pub name: String,
    pub position: usize,
    pub args: Vec<String>,
}

impl InputDeclaration {
    fn from_args(position: usize, values: Vec<ScriptValue>) -> Self {
        let args: Vec<String> = values.iter().map(|v| v.to_string()).collect();

        let name = match values.first() {
            Some(ScriptValue::String(s)) => s.clone(),
            Some(first) => first
                .as_map()
                .and_then(|m| m.get("name"))
                .and_then(|n| n.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| args.join(", ")),
            None => String::new(),
        };

        Self { name, position, args }
    }
}

impl fmt::Display for InputDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.position, self.name, self.args.join(", "))
    }
}

/// Declarations accumulated over one run
#[derive(Debug, Clone, Default)]
pub struct DeclarationLog {
    entries: Arc<Mutex<Vec<InputDeclaration>>>,
}

impl DeclarationLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, values: Vec<ScriptValue>) -> InputDeclaration {
        let mut entries = self.entries.lock();
        let declaration = InputDeclaration::from_args(entries.len(), values);
        entries.push(declaration.clone());
        declaration
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<InputDeclaration> {
        self.entries.lock().clone()
    }
}

/// Installs the declaration capability on an engine under `name`.
///
/// The capability is registered once per arity so any argument shape up to
/// [`MAX_DECLARATION_ARGS`] resolves. Keyword-style declarations are passed
/// as a single object map.
#[allow(deprecated)]
pub fn register_declaration_capability(engine: &mut Engine, name: &str, declarations: &DeclarationLog) {
    for arity in 0..=MAX_DECLARATION_ARGS {
        let declarations = declarations.clone();
        engine.register_raw_fn(name.to_string(), vec![TypeId::of::<Dynamic>(); arity], move |_ctx, args| {
            let values: Vec<ScriptValue> = args.iter().map(|arg| ScriptValue::from((**arg).clone())).collect();
            let declaration = declarations.record(values);
            log::info!("defining required input: [{}]", declaration.args.join(", "));
            Ok(ImmutableString::from(ACK))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_registrar() -> (Engine, DeclarationLog) {
        let mut engine = Engine::new();
        let log = DeclarationLog::new();
        register_declaration_capability(&mut engine, REGISTRAR_NAME, &log);
        (engine, log)
    }

    #[test]
    fn test_declaration_acknowledged() {
        let (engine, log) = engine_with_registrar();
        let ack = engine.eval::<ImmutableString>(r#"requireInput("distance", "int")"#).unwrap();

        assert_eq!(ack.as_str(), ACK);
        assert_eq!(log.len(), 1);
        let decl = &log.snapshot()[0];
        assert_eq!(decl.name, "distance");
        assert_eq!(decl.position, 0);
        assert_eq!(decl.args, vec!["\"distance\"".to_string(), "\"int\"".to_string()]);
    }

    #[test]
    fn test_any_argument_shape_accepted() {
        let (engine, log) = engine_with_registrar();
        engine
            .run(
                r#"
                requireInput();
                requireInput(42);
                requireInput(#{ name: "color", kind: "string" });
                requireInput("a", 1, 2.5, true, [1, 2], ());
                "#,
            )
            .unwrap();

        let decls = log.snapshot();
        assert_eq!(decls.len(), 4);
        assert_eq!(decls[0].name, "");
        assert_eq!(decls[1].name, "42");
        assert_eq!(decls[2].name, "color");
        assert_eq!(decls[3].name, "a");
        assert_eq!(decls[3].args.len(), 6);
        assert_eq!(decls.iter().map(|d| d.position).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_custom_registrar_name() {
        let mut engine = Engine::new();
        let log = DeclarationLog::new();
        register_declaration_capability(&mut engine, "needs", &log);

        engine.run(r#"needs("tag")"#).unwrap();
        assert!(engine.run(r#"requireInput("tag")"#).is_err());
        assert_eq!(log.len(), 1);
    }
}
