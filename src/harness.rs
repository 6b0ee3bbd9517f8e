// Tue Feb 03 2026 - Alex

use crate::config::HostConfig;
use crate::scripting::{
    check_declared_inputs, invoke, load, resolve, HostError, HostResult, InputDeclaration, OutputSink,
    ScriptEnvironment, StdoutSink,
};
use crate::source::ScriptSource;
use std::path::Path;
use std::sync::Arc;

/// Result of one successful run
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeOutcome {
    pub charge: f64,
    pub declarations: Vec<InputDeclaration>,
}

/// Runs one script through environment setup, load, resolve and invoke
pub struct ChargeHarness {
    config: HostConfig,
    sink: Arc<dyn OutputSink>,
}

impl ChargeHarness {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            sink: Arc::new(StdoutSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn run_path(&self, path: &Path) -> HostResult<ChargeOutcome> {
        let source = ScriptSource::from_path(path)?;
        self.run(&source)
    }

    pub fn run(&self, source: &ScriptSource) -> HostResult<ChargeOutcome> {
        self.config.validate().map_err(HostError::Config)?;

        let globals = self
            .config
            .globals
            .iter()
            .map(|(name, value)| (name.clone(), value.to_dynamic()));
        let env = ScriptEnvironment::with_options(&self.config.environment_options(), self.sink.clone(), globals);
        log::debug!("host globals: [{}]", env.global_names().join(", "));

        log::debug!("loading {}", source.name);
        let script = load(env, &source.name, &source.text)?;

        let entry = resolve(&script, &self.config.entry_point, self.config.args.len())?;
        log::debug!("resolved entry point {}", entry.name());

        if self.config.strict_inputs {
            check_declared_inputs(&script, &self.config.args)?;
        }

        let charge = invoke(&script, &entry, &self.config.args)?;

        Ok(ChargeOutcome {
            charge,
            declarations: script.declarations().to_vec(),
        })
    }
}
