use bitcoin::Network;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Minimum relay value for a segwit output, in satoshis
pub const DEFAULT_DUST_VALUE: u64 = 330;

/// Relay-policy transaction size ceiling used to derive the output ceiling
pub const MAX_TX_SIZE: usize = 100_000;

/// Serialised size of one P2WSH-shaped output script
pub const EMBEDDED_SCRIPT_LEN: usize = 34;

/// Default embedded-output ceiling (sanity limit, not a protocol limit)
pub const DEFAULT_MAX_OUTPUTS: usize = MAX_TX_SIZE / EMBEDDED_SCRIPT_LEN;

/// Options consumed by the encode pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingOptions {
    /// Value of every carrier and embedded output, in satoshis
    pub dust_value: u64,
    /// Ceiling on embedded outputs; exceeding it is a capacity error
    pub max_outputs: usize,
    /// Allow the packed + deflated serialisation
    pub compression: bool,
    /// Network used to parse carrier addresses
    pub network: Network,
    /// Sender address (carrier for DEPLOY / MINT)
    pub from_address: Option<String>,
    /// Recipient address (carrier for TRANSFER)
    pub to_address: Option<String>,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            dust_value: DEFAULT_DUST_VALUE,
            max_outputs: DEFAULT_MAX_OUTPUTS,
            compression: true,
            network: Network::Bitcoin,
            from_address: None,
            to_address: None,
        }
    }
}

impl EncodingOptions {
    pub fn with_from(mut self, address: &str) -> Self {
        self.from_address = Some(address.to_string());
        self
    }

    pub fn with_to(mut self, address: &str) -> Self {
        self.to_address = Some(address.to_string());
        self
    }

    pub fn without_compression(mut self) -> Self {
        self.compression = false;
        self
    }
}

/// Codec configuration loaded from `stamps_codec.toml` or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    pub dust_value: u64,
    pub max_outputs: usize,
    pub compression: bool,
    /// `bitcoin`, `testnet`, `testnet4`, `signet` or `regtest`
    pub network: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            dust_value: DEFAULT_DUST_VALUE,
            max_outputs: DEFAULT_MAX_OUTPUTS,
            compression: true,
            network: Network::Bitcoin.to_string(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from `stamps_codec.toml` and environment variables
    /// Environment variables (`STAMPS_CODEC_*`) take precedence over the file
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("stamps_codec").required(false))
    }

    /// Load configuration from an explicit file, still honouring the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build(file: File<config::FileSourceFile, config::FileFormat>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("dust_value", defaults.dust_value)?
            .set_default("max_outputs", defaults.max_outputs as u64)?
            .set_default("compression", defaults.compression)?
            .set_default("network", defaults.network)?
            .add_source(file)
            // STAMPS_CODEC_DUST_VALUE, STAMPS_CODEC_MAX_OUTPUTS, ...
            .add_source(Environment::with_prefix("STAMPS_CODEC").try_parsing(true))
            .build()?;

        let codec_config: CodecConfig = config.try_deserialize()?;
        codec_config.validate()?;
        Ok(codec_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_outputs == 0 {
            return Err(ConfigError::Message(
                "max_outputs must be at least 1".to_string(),
            ));
        }
        self.parsed_network()?;
        Ok(())
    }

    fn parsed_network(&self) -> Result<Network, ConfigError> {
        Network::from_str(&self.network)
            .map_err(|e| ConfigError::Message(format!("Unknown network '{}': {}", self.network, e)))
    }

    /// Build encoding options; addresses are per-call and start empty
    pub fn to_options(&self) -> Result<EncodingOptions, ConfigError> {
        Ok(EncodingOptions {
            dust_value: self.dust_value,
            max_outputs: self.max_outputs,
            compression: self.compression,
            network: self.parsed_network()?,
            from_address: None,
            to_address: None,
        })
    }
}
