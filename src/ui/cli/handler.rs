// Tue Feb 03 2026 - Alex

use super::args::Args;
use crate::config::HostConfig;
use crate::harness::ChargeHarness;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        if args.no_color {
            colored::control::set_override(false);
        }
        self.setup_logging(&args)?;

        let config = self.load_config(&args)?;
        log::info!("running {} with entry point {}", args.script.display(), config.entry_point);

        let outcome = ChargeHarness::new(config).run_path(&args.script)?;
        for declaration in &outcome.declarations {
            log::debug!("declared input {}", declaration);
        }

        println!("{}", format_charge(outcome.charge));
        Ok(())
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<HostConfig> {
        let config = match &args.config {
            Some(path) => HostConfig::from_file(path)?,
            None => HostConfig::default(),
        };

        Ok(if args.strict_inputs {
            config.with_strict_inputs(true)
        } else {
            config
        })
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// The single result line, with six fractional digits.
pub fn format_charge(charge: f64) -> String {
    format!("charge is {:.6}", charge)
}
