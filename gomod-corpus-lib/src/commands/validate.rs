use super::Host;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `corpus.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match Config::load(Utf8Path::new("."), config_path) {
        Ok(_) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file given)");
            }
            Ok(())
        }
        Err(e) => {
            let message = e.to_string();
            let first_line = message.lines().next().unwrap_or_default();
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {first_line}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn write_config(dir: &tempfile::TempDir, name: &str, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join(name);
        std::fs::write(&path, text).expect("Failed to write test config");
        path
    }

    fn validate(path: Utf8PathBuf) -> (Result<()>, TestHost) {
        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(path) });
        (result, host)
    }

    #[test]
    fn test_default_config_is_valid() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("corpus.toml");

        let mut init_host = TestHost::new();
        init_config(&mut init_host, &InitArgs { output: Some(config_path.clone()) }).expect("init_config should succeed");

        let (result, host) = validate(config_path);
        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");
        assert!(host.output_text().starts_with("Configuration file is valid"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_config(&dir, "invalid_syntax.toml", "target_count = [\n");

        let (result, host) = validate(path);
        assert!(result.is_err(), "Invalid TOML syntax should fail validation");
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_text().starts_with("❌ Configuration validation failed"));
    }

    #[test]
    fn test_unknown_field() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_config(&dir, "unknown_field.toml", "target_count = 5\nunknown_field = \"value\"\n");

        let (result, _) = validate(path);
        assert!(result.is_err(), "Unknown field should fail validation");
    }

    #[test]
    fn test_invalid_duration_format() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_config(&dir, "invalid_duration.toml", "page_delay = \"not a valid duration\"\n");

        let (result, _) = validate(path);
        assert!(result.is_err(), "Invalid duration format should fail validation");
    }

    #[test]
    fn test_out_of_range_value() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_config(&dir, "zero_timeout.toml", "page_timeout = \"0s\"\n");

        let (result, _) = validate(path);
        assert!(result.is_err(), "Zero page timeout should fail validation");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = write_config(&dir, "empty.toml", "# Empty config file\n");

        let (result, _) = validate(path);
        assert!(result.is_ok(), "Empty config should be valid (uses defaults)");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("nope.toml");

        let (result, host) = validate(path);
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
    }
}
