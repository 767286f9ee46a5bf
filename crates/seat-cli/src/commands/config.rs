use seat_config::SeatConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConfigArgs;
use crate::commands::load_config;
use crate::output::output;

const REDACTED: &str = "********";

/// Handle `seat config`.
pub fn handle(args: &ConfigArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = redacted(load_config(flags)?);
    if args.toml {
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    } else {
        output(&config, flags.format)
    }
}

/// Copy of `config` with secrets masked.
fn redacted(mut config: SeatConfig) -> SeatConfig {
    for key in [&mut config.detector.api_key, &mut config.booking.api_key] {
        if !key.is_empty() {
            *key = REDACTED.to_string();
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn api_keys_are_masked() {
        let mut config = SeatConfig::default();
        config.detector.api_key = "secret".into();
        let shown = redacted(config);
        assert_eq!(shown.detector.api_key, REDACTED);
        assert!(shown.booking.api_key.is_empty());
    }

    #[test]
    fn config_renders_as_toml() {
        let text = toml::to_string_pretty(&SeatConfig::default()).unwrap();
        assert!(text.contains("[layout]"));
        assert!(text.contains("seat_spacing = 0.55"));
    }
}
