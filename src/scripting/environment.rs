// Tue Feb 03 2026 - Alex

use crate::scripting::registrar::{register_declaration_capability, DeclarationLog, REGISTRAR_NAME};
use parking_lot::Mutex;
use rhai::packages::{Package, StandardPackage};
use rhai::{Array, Dynamic, Engine, Scope};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Receives every line a script prints
pub trait OutputSink: Send + Sync {
    fn print(&self, text: &str);
}

/// Forwards printed lines to standard output unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print(&self, text: &str) {
        println!("{}", text);
    }
}

/// Keeps printed lines in memory
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl OutputSink for BufferSink {
    fn print(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

/// Language extensions enabled for scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageFeatures {
    pub anonymous_fn: bool,
    pub looping: bool,
    pub shadowing: bool,
    pub sets: bool,
    pub strict_variables: bool,
}

impl Default for LanguageFeatures {
    fn default() -> Self {
        Self {
            anonymous_fn: true,
            looping: true,
            shadowing: true,
            sets: true,
            strict_variables: true,
        }
    }
}

/// Construction options for a [`ScriptEnvironment`]
#[derive(Debug, Clone)]
pub struct EnvironmentOptions {
    pub features: LanguageFeatures,
    pub registrar_name: String,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            features: LanguageFeatures::default(),
            registrar_name: REGISTRAR_NAME.to_string(),
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
        }
    }
}

/// Sandboxed execution context: the engine plus the global bindings.
///
/// The declaration capability is installed before anything else can run,
/// so every script sees it from its first statement.
pub struct ScriptEnvironment {
    pub(crate) engine: Engine,
    pub(crate) scope: Scope<'static>,
    pub(crate) declarations: DeclarationLog,
}

impl ScriptEnvironment {
    pub fn new<I>(sink: Arc<dyn OutputSink>, extra_globals: I) -> Self
    where
        I: IntoIterator<Item = (String, Dynamic)>,
    {
        Self::with_options(&EnvironmentOptions::default(), sink, extra_globals)
    }

    pub fn with_options<I>(options: &EnvironmentOptions, sink: Arc<dyn OutputSink>, extra_globals: I) -> Self
    where
        I: IntoIterator<Item = (String, Dynamic)>,
    {
        let mut engine = build_engine(options);

        engine.on_print(move |text| sink.print(text));
        engine.on_debug(|text, source, pos| {
            log::debug!("[script {}:{}] {}", source.unwrap_or("<unknown>"), pos, text);
        });

        let declarations = DeclarationLog::new();
        register_declaration_capability(&mut engine, &options.registrar_name, &declarations);

        let mut scope = Scope::new();
        for (name, value) in extra_globals {
            scope.push_constant_dynamic(name, value);
        }

        Self { engine, scope, declarations }
    }

    pub fn declarations(&self) -> &DeclarationLog {
        &self.declarations
    }

    pub fn global_names(&self) -> Vec<String> {
        self.scope.iter().map(|(name, _, _)| name.to_string()).collect()
    }
}

fn build_engine(options: &EnvironmentOptions) -> Engine {
    let mut engine = Engine::new_raw();
    engine.register_global_module(StandardPackage::new().as_shared_module());

    let features = &options.features;
    engine.set_allow_anonymous_fn(features.anonymous_fn);
    engine.set_allow_looping(features.looping);
    engine.set_allow_shadowing(features.shadowing);
    engine.set_strict_variables(features.strict_variables);

    engine.set_max_call_levels(options.max_call_levels);
    engine.set_max_expr_depths(options.max_expr_depth, options.max_function_expr_depth);

    if features.sets {
        register_set_builtin(&mut engine);
    }

    engine
}

// `set(items)` keeps the first occurrence of each value, in order.
fn register_set_builtin(engine: &mut Engine) {
    engine.register_fn("set", || Array::new());
    engine.register_fn("set", |items: Array| {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .filter(|item| seen.insert(format!("{}:{:?}", item.type_name(), item)))
            .collect::<Array>()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::INT;

    fn buffered() -> (ScriptEnvironment, BufferSink) {
        let sink = BufferSink::new();
        let env = ScriptEnvironment::new(Arc::new(sink.clone()), Vec::new());
        (env, sink)
    }

    #[test]
    fn test_print_forwarded_to_sink() {
        let (env, sink) = buffered();
        env.engine.run(r#"print("hello"); print(1 + 2);"#).unwrap();
        assert_eq!(sink.lines(), vec!["hello".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_registrar_installed_before_execution() {
        let (env, _) = buffered();
        env.engine.run(r#"requireInput("distance")"#).unwrap();
        assert_eq!(env.declarations().len(), 1);
    }

    #[test]
    fn test_extra_globals_visible() {
        let sink: Arc<dyn OutputSink> = Arc::new(BufferSink::new());
        let env = ScriptEnvironment::new(sink, vec![("RATE".to_string(), Dynamic::from_int(3))]);
        let mut scope = env.scope.clone();

        let value = env.engine.eval_with_scope::<INT>(&mut scope, "RATE * 2").unwrap();
        assert_eq!(value, 6);
        assert_eq!(env.global_names(), vec!["RATE".to_string()]);
    }

    #[test]
    fn test_set_builtin_dedups() {
        let (env, _) = buffered();
        let items = env.engine.eval::<Array>("set([1, 2, 1, 3, 2])").unwrap();
        let items: Vec<INT> = items.into_iter().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_disabled_features_reject_syntax() {
        let options = EnvironmentOptions {
            features: LanguageFeatures {
                anonymous_fn: false,
                looping: false,
                sets: false,
                ..LanguageFeatures::default()
            },
            ..EnvironmentOptions::default()
        };
        let env = ScriptEnvironment::with_options(&options, Arc::new(StdoutSink), Vec::new());

        assert!(env.engine.compile("let f = |x| x + 1;").is_err());
        assert!(env.engine.compile("loop { break; }").is_err());
        assert!(env.engine.run("set([1])").is_err());
    }

    #[test]
    fn test_floats_available() {
        let (env, _) = buffered();
        let value = env.engine.eval::<f64>("let x = 1526; x.to_float() / 2.0").unwrap();
        assert_eq!(value, 763.0);
    }
}
