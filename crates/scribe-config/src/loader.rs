use std::{collections::HashSet, path::Path};

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        raw.parse()
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_agent_config()?;
        self.validate_stt_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_agent_config(&self) -> anyhow::Result<()> {
        if self.agent.name.trim().is_empty() {
            anyhow::bail!("agent.name must not be empty");
        }

        Ok(())
    }

    /// Each format may be listed once in the log-probability rule
    fn validate_stt_config(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        for format in &self.stt.validation.logprobs_incompatible_formats {
            if !seen.insert(format) {
                anyhow::bail!("stt.validation.logprobs_incompatible_formats lists '{format}' more than once");
            }
        }

        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        if telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    /// Parse and validate configuration from TOML text
    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;
    use insta::assert_debug_snapshot;
    use stt::AudioResponseFormat;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = "".parse().unwrap();

        assert_eq!(config.agent.name, "summarizer");
        assert_eq!(
            config.stt.validation.logprobs_incompatible_formats,
            [AudioResponseFormat::Text, AudioResponseFormat::Srt, AudioResponseFormat::Vtt]
        );
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_config() {
        let config: Config = indoc! {r#"
            [agent]
            name = "minutes"

            [stt.validation]
            logprobs_incompatible_formats = ["text", "diarized_json"]

            [telemetry]
            log_filter = "scribe=debug,warn"
            format = "json"
        "#}
        .parse()
        .unwrap();

        assert_eq!(config.agent.name, "minutes");

        let telemetry = config.telemetry.as_ref().unwrap();
        assert_eq!(telemetry.log_filter, "scribe=debug,warn");
        assert_eq!(telemetry.format, LogFormat::Json);

        assert_debug_snapshot!(config.stt.validation, @r"
        ValidationPolicy {
            logprobs_incompatible_formats: [
                Text,
                DiarizedJson,
            ],
        }
        ");
    }

    #[test]
    fn empty_policy_list_disables_logprobs_rule() {
        let config: Config = indoc! {r"
            [stt.validation]
            logprobs_incompatible_formats = []
        "}
        .parse()
        .unwrap();

        assert!(config.stt.validation.logprobs_incompatible_formats.is_empty());
    }

    #[test]
    fn telemetry_defaults() {
        let config: Config = "[telemetry]".parse().unwrap();
        let telemetry = config.telemetry.unwrap();

        assert_eq!(telemetry.log_filter, "info");
        assert_eq!(telemetry.format, LogFormat::Text);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = indoc! {r#"
            [stt.validation]
            logprobs_incompatible_formats = ["xml"]
        "#}
        .parse::<Config>()
        .unwrap_err();

        assert!(err.to_string().starts_with("failed to parse config"), "{err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = indoc! {r"
            [stt]
            providers = {}
        "}
        .parse::<Config>()
        .unwrap_err();

        assert!(err.to_string().contains("unknown field"), "{err}");
    }

    #[test]
    fn duplicate_policy_formats_are_rejected() {
        let err = indoc! {r#"
            [stt.validation]
            logprobs_incompatible_formats = ["srt", "vtt", "srt"]
        "#}
        .parse::<Config>()
        .unwrap_err();

        insta::assert_snapshot!(
            err.to_string(),
            @"stt.validation.logprobs_incompatible_formats lists 'srt' more than once"
        );
    }

    #[test]
    fn blank_agent_name_is_rejected() {
        let err = indoc! {r#"
            [agent]
            name = "  "
        "#}
        .parse::<Config>()
        .unwrap_err();

        assert_eq!(err.to_string(), "agent.name must not be empty");
    }

    #[test]
    fn blank_log_filter_is_rejected() {
        let err = indoc! {r#"
            [telemetry]
            log_filter = ""
        "#}
        .parse::<Config>()
        .unwrap_err();

        assert_eq!(err.to_string(), "telemetry.log_filter must not be empty");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nname = \"notes\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.agent.name, "notes");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file"), "{err}");
    }
}
