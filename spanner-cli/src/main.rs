//! Generates synthetic span trees and publishes them, serialized as one
//! batch, to a Kafka topic or to stdout.
mod config;
#[cfg(feature = "kafka")]
mod kafka;
mod stdout;

use clap::{CommandFactory, Parser};
use config::{Args, ConfigError, Sink};
use spanner::export::{PublishError, SpanPublisher};
use spanner::trace::{build_request_trees, DefaultIdGenerator};
use spanner_proto::EncodingError;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode span batch: {0}")]
    Encode(#[from] EncodingError),

    #[error("publisher failed: {0}")]
    Publish(#[from] PublishError),

    #[cfg(not(feature = "kafka"))]
    #[error("built without the `kafka` feature, use --stdout")]
    KafkaUnavailable,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Config(ConfigError::MissingBrokers)) => {
            let _ = Args::command().print_help();
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "span generation failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .try_init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let publisher = build_publisher(args.sink()?)?;

    let generator = DefaultIdGenerator::new();
    let batch = build_request_trees(&generator, args.num);
    let payload = spanner_proto::serialize(&batch)?;
    tracing::info!(
        topic = %args.topic,
        spans = batch.len(),
        bytes = payload.len(),
        "publishing span batch"
    );

    publisher.publish(&args.topic, payload);
    publisher.shutdown()?;
    Ok(())
}

fn build_publisher(sink: Sink) -> Result<Box<dyn SpanPublisher>, CliError> {
    match sink {
        Sink::Stdout => Ok(Box::new(stdout::StdoutPublisher::default())),
        #[cfg(feature = "kafka")]
        Sink::Kafka(config) => Ok(Box::new(kafka::KafkaPublisher::new(&config)?)),
        #[cfg(not(feature = "kafka"))]
        Sink::Kafka(_) => Err(CliError::KafkaUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_run_succeeds() {
        let args = Args::try_parse_from(["spanner", "--stdout", "--num", "2"]).unwrap();
        assert!(run(&args).is_ok());
    }

    #[test]
    fn missing_brokers_is_a_config_error() {
        temp_env::with_var_unset(config::KAFKA_PEERS, || {
            let args = Args::try_parse_from(["spanner"]).unwrap();
            assert!(matches!(
                run(&args),
                Err(CliError::Config(ConfigError::MissingBrokers))
            ));
        });
    }
}
