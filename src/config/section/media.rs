//! `[media]` section configuration.
//!
//! Where original images live and where generated renditions go.
//!
//! # Example
//!
//! ```toml
//! [media]
//! root = "media"                          # Directory holding original images
//! url = "/media/"                         # URL prefix image references use
//! renditions = true                       # Generate sized copies (experimental)
//! renditions_dir = ".herald/renditions"   # Output directory for renditions
//! renditions_url = "/media/renditions/"   # URL prefix renditions are served from
//! ```
//!
//! With `renditions = false` every image is referenced by its original URL.

use std::path::PathBuf;

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Media files and image renditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "media")]
pub struct MediaConfig {
    /// Directory holding original images, relative to the config file.
    #[config(default = "media")]
    pub root: PathBuf,

    /// URL prefix that image references start with.
    #[config(default = "/media/")]
    pub url: String,

    /// Generate resized renditions with the `image` crate.
    #[config(status = experimental)]
    pub renditions: bool,

    /// Output directory for renditions, relative to the config file.
    #[config(default = ".herald/renditions")]
    pub renditions_dir: PathBuf,

    /// URL prefix renditions are served from.
    #[config(default = "/media/renditions/")]
    pub renditions_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: "media".into(),
            url: "/media/".into(),
            renditions: false,
            renditions_dir: ".herald/renditions".into(),
            renditions_url: "/media/renditions/".into(),
        }
    }
}

impl MediaConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::FIELDS.url, &self.url),
            (Self::FIELDS.renditions_url, &self.renditions_url),
        ] {
            if !value.starts_with('/') || !value.ends_with('/') {
                diag.error_with_hint(
                    field,
                    format!("`{value}` is not a URL prefix"),
                    "start and end the prefix with `/`, e.g. \"/media/\"",
                );
            }
        }

        if self.renditions && self.url == self.renditions_url {
            diag.error_with_hint(
                Self::FIELDS.renditions_url,
                "renditions share the URL prefix of original media",
                "use a sub-prefix such as \"/media/renditions/\"",
            );
        }

        if self.root.is_absolute() {
            diag.warn(
                Self::FIELDS.root,
                "absolute media root, the config is no longer portable",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_media_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.media, MediaConfig::default());
        assert!(!config.media.renditions);
        assert_eq!(config.media.url, "/media/");
    }

    #[test]
    fn test_media_override() {
        let config = test_parse_config(
            "[media]\nroot = \"uploads\"\nurl = \"/uploads/\"\nrenditions = true",
        );
        assert_eq!(config.media.root, PathBuf::from("uploads"));
        assert_eq!(config.media.url, "/uploads/");
        assert!(config.media.renditions);
    }

    #[test]
    fn test_media_validate_prefix() {
        let media = MediaConfig {
            url: "media".into(),
            ..MediaConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        media.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, MediaConfig::FIELDS.url);
    }

    #[test]
    fn test_media_validate_shared_prefix() {
        let media = MediaConfig {
            renditions: true,
            renditions_url: "/media/".into(),
            ..MediaConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        media.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_renditions_flag_is_experimental() {
        let media = MediaConfig {
            renditions: true,
            ..MediaConfig::default()
        };

        let mut diag = ConfigDiagnostics::new();
        media.validate_field_status(&mut diag);
        assert!(!diag.hints().is_empty());

        let mut diag = ConfigDiagnostics::with_allow_experimental(true);
        media.validate_field_status(&mut diag);
        assert!(diag.hints().is_empty());
    }
}
