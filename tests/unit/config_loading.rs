/// Layered configuration: defaults, file, environment
use serial_test::serial;
use stamps_codec::config::{DEFAULT_DUST_VALUE, DEFAULT_MAX_OUTPUTS};
use stamps_codec::{CodecConfig, EncodingOptions};
use std::io::Write;

const ENV_KEYS: [&str; 4] = [
    "STAMPS_CODEC_DUST_VALUE",
    "STAMPS_CODEC_MAX_OUTPUTS",
    "STAMPS_CODEC_COMPRESSION",
    "STAMPS_CODEC_NETWORK",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    clear_env();
    let file = write_config("dust_value = 546\ncompression = false\n");
    let config = CodecConfig::load_from(file.path()).unwrap();
    assert_eq!(config.dust_value, 546);
    assert!(!config.compression);
    assert_eq!(config.max_outputs, DEFAULT_MAX_OUTPUTS);

    let options = config.to_options().unwrap();
    assert_eq!(options.dust_value, 546);
    assert!(!options.compression);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = write_config("dust_value = 546\nnetwork = \"bitcoin\"\n");
    std::env::set_var("STAMPS_CODEC_DUST_VALUE", "600");
    std::env::set_var("STAMPS_CODEC_NETWORK", "testnet");

    let config = CodecConfig::load_from(file.path());
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.dust_value, 600);
    assert_eq!(
        config.to_options().unwrap().network,
        bitcoin::Network::Testnet
    );
}

#[test]
#[serial]
fn test_missing_default_file_uses_defaults() {
    clear_env();
    let config = CodecConfig::load().unwrap();
    assert_eq!(config.dust_value, DEFAULT_DUST_VALUE);
    assert_eq!(config.to_options().unwrap(), EncodingOptions::default());
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear_env();
    let file = write_config("max_outputs = 0\n");
    assert!(CodecConfig::load_from(file.path()).is_err());

    let file = write_config("network = \"moonnet\"\n");
    assert!(CodecConfig::load_from(file.path()).is_err());
}
