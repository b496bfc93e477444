use anyhow::{Context, Result};
use clap::ValueEnum;
use std::{fs::OpenOptions, path::PathBuf};
use tracing::Level;
use tracing_subscriber::{
    filter::FromEnvError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Clone, Debug, Copy, ValueEnum, PartialEq)]
pub enum LogOutput {
    Console,
    Json,
}

pub struct LoggingBuilder {
    output: LogOutput,
    level: Level,
    write_logs_file: Option<PathBuf>,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self {
            output: LogOutput::Console,
            level: Level::INFO,
            write_logs_file: None,
        }
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Also append logs, without colors, to this file
    pub fn with_log_file<P: Into<Option<PathBuf>>>(mut self, path: P) -> Self {
        self.write_logs_file = path.into();
        self
    }

    /// Installs the global subscriber. Logs go to stderr; stdout carries command output.
    pub fn init(self) -> Result<()> {
        let level = self.level;
        let make_filter = || -> Result<EnvFilter, FromEnvError> {
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env()
        };

        let output_layer = match self.output {
            LogOutput::Console => fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(make_filter()?)
                .boxed(),
            LogOutput::Json => fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_current_span(true)
                .with_filter(make_filter()?)
                .boxed(),
        };

        let file_layer = match self.write_logs_file {
            Some(path) => {
                let log_file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(&path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(log_file)
                        .with_filter(make_filter()?),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(output_layer)
            .with(file_layer)
            .try_init()?;
        Ok(())
    }
}

/// Create a new logging builder
pub fn logging() -> LoggingBuilder {
    LoggingBuilder::new()
}
