// Tue Feb 03 2026 - Alex

use crate::scripting::HostError;
use colored::Colorize;

pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format(&self, error: &anyhow::Error) -> String {
        let mut output = String::new();

        let header = if self.color_enabled {
            "[!]".red().bold().to_string()
        } else {
            "[!]".to_string()
        };

        output.push_str(&format!("{} {}\n", header, error));

        if let Some(host) = error.downcast_ref::<HostError>() {
            output.push_str(&self.format_details(host));
        } else if self.show_cause_chain {
            for cause in error.chain().skip(1).take(10) {
                output.push_str(&format!("  {} Caused by: {}\n", self.arrow(), cause));
            }
        }

        output
    }

    pub fn print(&self, error: &anyhow::Error) {
        eprint!("{}", self.format(error));
    }

    fn format_details(&self, error: &HostError) -> String {
        let mut output = String::new();

        match error {
            HostError::Script(err) => {
                if let Some(location) = &err.location {
                    output.push_str(&self.format_context("  at", location));
                    output.push('\n');
                }
                if !err.backtrace.is_empty() {
                    output.push_str(&format!("  {}\n", self.paint_context("Traceback:")));
                    for frame in &err.backtrace {
                        output.push_str(&format!("    {} {}\n", self.arrow(), frame));
                    }
                }
            }
            HostError::Contract(err) => {
                output.push_str(&self.format_context("  contract", err.kind()));
                output.push('\n');
            }
            HostError::Conversion(_) | HostError::Io(_) | HostError::Config(_) => {}
        }

        output
    }

    fn arrow(&self) -> String {
        if self.color_enabled {
            "→".yellow().to_string()
        } else {
            "->".to_string()
        }
    }

    fn paint_context(&self, context: &str) -> String {
        if self.color_enabled {
            context.blue().bold().to_string()
        } else {
            context.to_string()
        }
    }

    pub fn format_context(&self, context: &str, message: &str) -> String {
        format!("{}: {}", self.paint_context(context), message)
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}
