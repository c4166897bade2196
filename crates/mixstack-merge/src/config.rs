use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::marker::DEFAULT_MARKER;

/// Configuration for a [`MergeEngine`](crate::MergeEngine).
///
/// Loaded from TOML; every key is optional:
///
/// ```toml
/// markers = ["PyEval_EvalFrameDefault", "_PyEval_EvalFrameDefault"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Exact function names treated as interpreter trampolines.
    pub markers: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.to_string()],
        }
    }
}

impl MergeConfig {
    /// A configuration recognizing exactly the given marker names.
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that at least one marker is configured and none is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if let Some(index) = self.markers.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyMarker(index));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = MergeConfig::default();
        assert_eq!(c.markers, vec!["PyEval_EvalFrameDefault".to_string()]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parse_markers() {
        let c = MergeConfig::from_toml_str(
            r#"markers = ["PyEval_EvalFrameDefault", "_PyEval_EvalFrameDefault"]"#,
        )
        .unwrap();
        assert_eq!(c.markers.len(), 2);
        assert_eq!(c.markers[1], "_PyEval_EvalFrameDefault");
    }

    #[test]
    fn empty_document_uses_defaults() {
        let c = MergeConfig::from_toml_str("").unwrap();
        assert_eq!(c, MergeConfig::default());
    }

    #[test]
    fn empty_marker_list_rejected() {
        let err = MergeConfig::from_toml_str("markers = []").unwrap_err();
        assert!(matches!(err, ConfigError::NoMarkers));
    }

    #[test]
    fn empty_marker_name_rejected() {
        let err = MergeConfig::with_markers(["PyEval_EvalFrameDefault", ""])
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMarker(1)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = MergeConfig::from_toml_str("markers = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"markers = ["_PyEval_EvalFrameDefault"]"#).unwrap();

        let c = MergeConfig::load(file.path()).unwrap();
        assert_eq!(c.markers, vec!["_PyEval_EvalFrameDefault".to_string()]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MergeConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
