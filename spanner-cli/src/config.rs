use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use thiserror::Error;

/// Comma separated list of Kafka brokers, used when `--brokers` is not given.
pub(crate) const KAFKA_PEERS: &str = "KAFKA_PEERS";
/// Default topic span batches are published to.
pub(crate) const DEFAULT_TOPIC: &str = "jaeger-spans-test-001";

/// Generate synthetic span trees and publish them to a Kafka topic.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub(crate) struct Args {
    /// The Kafka brokers to connect to, as a comma separated list. Defaults to
    /// the value of KAFKA_PEERS.
    #[arg(long)]
    pub(crate) brokers: Option<String>,

    /// The Kafka topic.
    #[arg(long, default_value = DEFAULT_TOPIC)]
    pub(crate) topic: String,

    /// Number of request trees to generate.
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    pub(crate) num: NonZeroUsize,

    /// Turn on debug logging, including the Kafka client's own.
    #[arg(long)]
    pub(crate) verbose: bool,

    /// The optional certificate file for client authentication.
    #[arg(long)]
    pub(crate) certificate: Option<PathBuf>,

    /// The optional key file for client authentication.
    #[arg(long)]
    pub(crate) key: Option<PathBuf>,

    /// The optional certificate authority file for TLS client authentication.
    #[arg(long)]
    pub(crate) ca: Option<PathBuf>,

    /// Verify the broker's certificate chain.
    #[arg(long)]
    pub(crate) verify: bool,

    /// Print span batches to stdout instead of publishing them to Kafka.
    #[arg(long)]
    pub(crate) stdout: bool,
}

/// Errors raised while resolving the configuration.
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    /// Neither `--brokers` nor `KAFKA_PEERS` names a broker.
    #[error("no Kafka brokers given, use --brokers or set KAFKA_PEERS")]
    MissingBrokers,
}

/// Client TLS material. Only built when all three files are given.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(feature = "kafka"), allow(dead_code))]
pub(crate) struct TlsConfig {
    pub(crate) certificate: PathBuf,
    pub(crate) key: PathBuf,
    pub(crate) ca: PathBuf,
    pub(crate) verify: bool,
}

/// Resolved Kafka connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(feature = "kafka"), allow(dead_code))]
pub(crate) struct KafkaConfig {
    pub(crate) brokers: Vec<String>,
    pub(crate) tls: Option<TlsConfig>,
    pub(crate) verbose: bool,
}

/// Where span batches go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sink {
    Stdout,
    Kafka(KafkaConfig),
}

impl Args {
    /// Resolve the sink from the arguments and the environment.
    pub(crate) fn sink(&self) -> Result<Sink, ConfigError> {
        if self.stdout {
            return Ok(Sink::Stdout);
        }
        let brokers = resolve_brokers(self.brokers.as_deref());
        if brokers.is_empty() {
            return Err(ConfigError::MissingBrokers);
        }
        Ok(Sink::Kafka(KafkaConfig {
            brokers,
            tls: self.tls(),
            verbose: self.verbose,
        }))
    }

    fn tls(&self) -> Option<TlsConfig> {
        match (&self.certificate, &self.key, &self.ca) {
            (Some(certificate), Some(key), Some(ca)) => Some(TlsConfig {
                certificate: certificate.clone(),
                key: key.clone(),
                ca: ca.clone(),
                verify: self.verify,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!(
                    "TLS needs --certificate, --key and --ca together, connecting without TLS"
                );
                None
            }
        }
    }
}

/// Brokers from `flag`, or from [`KAFKA_PEERS`] when the flag is absent.
pub(crate) fn resolve_brokers(flag: Option<&str>) -> Vec<String> {
    let raw = match flag {
        Some(brokers) => brokers.to_string(),
        None => std::env::var(KAFKA_PEERS).unwrap_or_default(),
    };
    raw.split(',')
        .map(str::trim)
        .filter(|broker| !broker.is_empty())
        .map(ToString::to_string)
        .collect()
}
