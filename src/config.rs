// Tue Feb 03 2026 - Alex

use crate::scripting::{EnvironmentOptions, HostArg, HostError, LanguageFeatures, ENTRY_POINT_NAME, REGISTRAR_NAME};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub entry_point: String,
    pub registrar_name: String,
    pub args: Vec<HostArg>,
    pub globals: IndexMap<String, HostArg>,
    pub features: LanguageFeatures,
    pub strict_inputs: bool,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        let limits = EnvironmentOptions::default();
        Self {
            entry_point: ENTRY_POINT_NAME.to_string(),
            registrar_name: REGISTRAR_NAME.to_string(),
            args: vec![
                HostArg::Int(23),
                HostArg::Int(1203),
                HostArg::Int(300),
                HostArg::Str("blue".to_string()),
            ],
            globals: IndexMap::new(),
            features: LanguageFeatures::default(),
            strict_inputs: false,
            max_call_levels: limits.max_call_levels,
            max_expr_depth: limits.max_expr_depth,
            max_function_expr_depth: limits.max_function_expr_depth,
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, HostError> {
        let data = std::fs::read_to_string(path)?;
        let config: HostConfig = serde_json::from_str(&data)
            .map_err(|e| HostError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(HostError::Config)?;
        Ok(config)
    }

    pub fn with_entry_point(mut self, name: &str) -> Self {
        self.entry_point = name.to_string();
        self
    }

    pub fn with_args(mut self, args: Vec<HostArg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_global(mut self, name: &str, value: HostArg) -> Self {
        self.globals.insert(name.to_string(), value);
        self
    }

    pub fn with_strict_inputs(mut self, strict: bool) -> Self {
        self.strict_inputs = strict;
        self
    }

    pub fn environment_options(&self) -> EnvironmentOptions {
        EnvironmentOptions {
            features: self.features.clone(),
            registrar_name: self.registrar_name.clone(),
            max_call_levels: self.max_call_levels,
            max_expr_depth: self.max_expr_depth,
            max_function_expr_depth: self.max_function_expr_depth,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entry_point.trim().is_empty() {
            return Err("entry_point must not be empty".to_string());
        }
        if self.registrar_name.trim().is_empty() {
            return Err("registrar_name must not be empty".to_string());
        }
        if self.entry_point == self.registrar_name {
            return Err("entry_point and registrar_name must differ".to_string());
        }
        if self.max_call_levels == 0 {
            return Err("max_call_levels must be greater than 0".to_string());
        }
        if self.max_expr_depth == 0 || self.max_function_expr_depth == 0 {
            return Err("expression depth limits must be greater than 0".to_string());
        }
        if let Some(name) = self.globals.keys().find(|k| **k == self.entry_point) {
            return Err(format!("global {} would shadow the entry point", name));
        }
        Ok(())
    }
}
