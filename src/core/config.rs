use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::{Optima, Verbosity};

/// Environment variable that may hold the optima as JSON.
pub const OPTIMA_ENV_VAR: &str = "SPHERE_OPTIMA";

/// Defaults read from a YAML or JSON file.
///
/// ```yaml
/// optima: [[0, 0], [1, 1]]
/// verbosity: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    optima: Option<Value>,

    /// Added to the verbosity given on the command line.
    #[serde(default)]
    verbosity: i32,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::Config(format!(
                "cannot read config file {}: {}",
                path.display(),
                err
            ))
        })?;
        Self::parse(&text).map_err(|err| match err {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse a config document. JSON is accepted as well.
    pub fn parse(text: &str) -> Result<Self> {
        // an empty YAML document is null, not an empty mapping
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text).map_err(|err| Error::Config(err.to_string()))
    }

    /// The optima, if the file provides them.
    pub fn optima(&self) -> Result<Option<Optima>> {
        self.optima.as_ref().map(Optima::from_value).transpose()
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::new(self.verbosity)
    }
}

/// Where the optima in effect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimaSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

/// Pick the optima by precedence:
/// command line, then environment, then config file, then `[[0]]`.
///
/// The first source that is present decides;
/// if it is malformed, that is an error even if a later source would be fine.
/// An empty environment variable counts as absent.
pub fn resolve_optima(
    cli: Option<&str>,
    env: Option<&str>,
    config: Option<&Config>,
) -> Result<(Optima, OptimaSource)> {
    let (optima, source) = if let Some(arg) = cli {
        (parse_optima_argument(arg)?, OptimaSource::CommandLine)
    } else if let Some(json) = env.filter(|json| !json.trim().is_empty()) {
        let optima = Optima::from_json(json).map_err(|err| match err {
            Error::Config(msg) => Error::Config(format!("{}: {}", OPTIMA_ENV_VAR, msg)),
            other => other,
        })?;
        (optima, OptimaSource::Environment)
    } else if let Some(optima) = config.map(Config::optima).transpose()?.and_then(|o| o) {
        (optima, OptimaSource::ConfigFile)
    } else {
        (Optima::default(), OptimaSource::Default)
    };

    debug!("using optima from {:?}", source);
    Ok((optima, source))
}

/// The `--optima` value is inline JSON or the path of a YAML/JSON file.
pub fn parse_optima_argument(arg: &str) -> Result<Optima> {
    let inline_err = match Optima::from_json(arg) {
        Ok(optima) => return Ok(optima),
        Err(err) => err,
    };

    let path = Path::new(arg);
    if !path.is_file() {
        return Err(inline_err);
    }

    debug!("reading optima from {}", path.display());
    let text = fs::read_to_string(path).map_err(|err| {
        Error::Config(format!(
            "cannot read optima file {}: {}",
            path.display(),
            err
        ))
    })?;
    Optima::from_yaml(&text).map_err(|err| match err {
        Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "sphere-config-test-{}-{}",
                std::process::id(),
                name
            ));
            fs::write(&path, contents).unwrap();
            TempFile(path)
        }

        fn path(&self) -> &str {
            self.0.to_str().unwrap()
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn optima(json: &str) -> Optima {
        Optima::from_json(json).unwrap()
    }

    #[test]
    fn parses_yaml_and_json_configs() {
        let yaml = Config::parse("optima:\n  - [0, 0]\n  - [1, 1]\nverbosity: -1\n").unwrap();
        assert_ok!(yaml.optima(), Some(optima("[[0, 0], [1, 1]]")));
        assert_eq!(yaml.verbosity(), Verbosity::new(-1));

        let json = Config::parse(r#"{"optima": [[2]]}"#).unwrap();
        assert_ok!(json.optima(), Some(optima("[[2]]")));
        assert_eq!(json.verbosity(), Verbosity::default());

        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::parse("optimum: [[0]]\n").unwrap_err();
        assert!(
            err.to_string().contains("unknown field `optimum`"),
            "message was: {}",
            err
        );
    }

    #[test]
    fn loads_config_file() {
        let file = TempFile::new("load.yml", "optima: [[3, 4]]\n");
        let config = Config::load(file.path()).unwrap();
        assert_ok!(config.optima(), Some(optima("[[3, 4]]")));

        let err = Config::load("/nonexistent/sphere.yml").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("configuration error: cannot read config file /nonexistent/sphere.yml:"),
            "message was: {}",
            err
        );
    }

    #[test]
    fn precedence_of_optima_sources() {
        let config = Config::parse("optima: [[3]]").unwrap();

        assert_ok!(
            resolve_optima(Some("[[1]]"), Some("[[2]]"), Some(&config)),
            (optima("[[1]]"), OptimaSource::CommandLine),
        );
        assert_ok!(
            resolve_optima(None, Some("[[2]]"), Some(&config)),
            (optima("[[2]]"), OptimaSource::Environment),
        );
        assert_ok!(
            resolve_optima(None, None, Some(&config)),
            (optima("[[3]]"), OptimaSource::ConfigFile),
        );
        assert_ok!(
            resolve_optima(None, Some(" "), Some(&Config::default())),
            (Optima::default(), OptimaSource::Default),
        );
        assert_ok!(
            resolve_optima(None, None, None),
            (Optima::default(), OptimaSource::Default),
        );
    }

    #[test]
    fn malformed_source_is_not_skipped() {
        assert_err!(
            resolve_optima(None, Some("[[1], [1, 2]]"), None),
            "configuration error: SPHERE_OPTIMA: optimum 1 has dimension 2, expected 1",
        );
        assert_err!(
            resolve_optima(Some("[]"), Some("[[1]]"), None),
            "configuration error: at least one optimum is required",
        );
    }

    #[test]
    fn optima_argument_may_name_a_file() {
        let file = TempFile::new("optima.yaml", "- [1, 2]\n- [3, 4]\n");
        assert_ok!(
            parse_optima_argument(file.path()),
            optima("[[1, 2], [3, 4]]")
        );

        let bad = TempFile::new("bad-optima.json", "[[1, 2], [3]]");
        assert_err!(
            parse_optima_argument(bad.path()),
            format!(
                "configuration error: {}: optimum 1 has dimension 1, expected 2",
                bad.path()
            ),
        );
    }
}
