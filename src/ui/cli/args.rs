// Tue Feb 03 2026 - Alex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "charge-host")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Runs a scripted charge formula and prints the result", long_about = None)]
pub struct Args {
    /// Script defining the compute function.
    #[arg(default_value = "charge.rhai")]
    pub script: PathBuf,

    /// JSON file with host settings (entry point, arguments, features).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Require one declared input per argument the host supplies.
    #[arg(long)]
    pub strict_inputs: bool,

    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => return Err(format!("Unknown log level: {}", other)),
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["charge-host"]);
        assert_eq!(args.script, PathBuf::from("charge.rhai"));
        assert_eq!(args.log_level, "warn");
        assert!(!args.strict_inputs);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["charge-host", "rates.rhai", "--strict-inputs", "-l", "debug", "--no-color"]);
        assert_eq!(args.script, PathBuf::from("rates.rhai"));
        assert!(args.strict_inputs);
        assert!(args.no_color);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let args = Args::parse_from(["charge-host", "--log-level", "loud"]);
        assert!(args.validate().is_err());
    }
}
