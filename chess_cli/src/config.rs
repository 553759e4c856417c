use serde::Deserialize;
use std::{fs, io, path::PathBuf};

use rchess::ui::renderer::RenderStyle;
use rchess::Promotion;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chess glyphs instead of two-letter piece names.
    pub unicode: bool,
    pub coordinates: bool,
    /// Used when a promoting move does not name a piece.
    pub default_promotion: PromotionPiece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<PromotionPiece> for Promotion {
    fn from(p: PromotionPiece) -> Self {
        match p {
            PromotionPiece::Queen => Promotion::Queen,
            PromotionPiece::Rook => Promotion::Rook,
            PromotionPiece::Bishop => Promotion::Bishop,
            PromotionPiece::Knight => Promotion::Knight,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unicode: true,
            coordinates: true,
            default_promotion: PromotionPiece::Queen,
        }
    }
}

impl Config {
    /// Defaults, overridden by the YAML file at `path` if it exists.
    pub fn load(path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let Some(p) = path else {
            return Ok(Self::default());
        };
        if !p.exists() {
            log::debug!("config {} not found, using defaults", p.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(p).map_err(|source| ConfigError::Read {
            path: p.clone(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: p.clone(),
            source,
        })
    }

    pub fn style(&self) -> RenderStyle {
        if self.unicode {
            RenderStyle::Unicode
        } else {
            RenderStyle::Ascii
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: Config = serde_yaml::from_str("unicode: false\n").unwrap();
        assert!(!cfg.unicode);
        assert!(cfg.coordinates);
        assert_eq!(cfg.default_promotion, PromotionPiece::Queen);
        assert_eq!(cfg.style(), RenderStyle::Ascii);
    }

    #[test]
    fn promotion_piece_by_name() {
        let cfg: Config = serde_yaml::from_str("default_promotion: knight\n").unwrap();
        assert_eq!(Promotion::from(cfg.default_promotion), Promotion::Knight);
    }

    #[test]
    fn missing_file_means_defaults() {
        let path = PathBuf::from("/nonexistent/rchess-config.yaml");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("rchess-bad-{}.yaml", std::process::id()));
        fs::write(&path, "unicode: [not, a, bool]\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
