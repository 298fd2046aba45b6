//! Export configuration
//!
//! One immutable [`ExportConfig`] is built per run (from the manifest's
//! `[export]` table, then CLI overrides) and passed by reference into
//! [`crate::export_mesh`].

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Source vertex count above which a mesh is reported as risky for 16-bit indices
pub const DEFAULT_VERTEX_WARNING_THRESHOLD: usize = 40_000;

/// How exploded vertices are welded into the unified vertex buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeldStrategy {
    /// Loop-keyed weld on position/normal/UVs, fan triangulation from the last corner
    #[default]
    Fast,
    /// Explicit triangulation into per-corner vertices, then bucketed exact weld
    Quality,
}

impl FromStr for WeldStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(WeldStrategy::Fast),
            "quality" | "optimized" => Ok(WeldStrategy::Quality),
            other => Err(format!(
                "unknown weld strategy '{}' (expected 'fast' or 'quality')",
                other
            )),
        }
    }
}

impl fmt::Display for WeldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeldStrategy::Fast => f.write_str("fast"),
            WeldStrategy::Quality => f.write_str("quality"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub strategy: WeldStrategy,

    /// Generate a tangent array (only for meshes with at least one UV layer)
    pub export_tangents: bool,

    /// Write the compact binary container instead of pretty JSON
    pub minimize: bool,

    pub vertex_warning_threshold: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            strategy: WeldStrategy::default(),
            export_tangents: false,
            minimize: false,
            vertex_warning_threshold: DEFAULT_VERTEX_WARNING_THRESHOLD,
        }
    }
}

/// Per-run or per-mesh settings that replace manifest values when present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub strategy: Option<WeldStrategy>,
    #[serde(default)]
    pub tangents: Option<bool>,
    #[serde(default)]
    pub minimize: Option<bool>,
}

impl ExportConfig {
    /// Copy of this config with any set overrides applied
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            strategy: overrides.strategy.unwrap_or(self.strategy),
            export_tangents: overrides.tangents.unwrap_or(self.export_tangents),
            minimize: overrides.minimize.unwrap_or(self.minimize),
            vertex_warning_threshold: self.vertex_warning_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.strategy, WeldStrategy::Fast);
        assert!(!config.export_tangents);
        assert!(!config.minimize);
        assert_eq!(config.vertex_warning_threshold, 40_000);
    }

    #[test]
    fn test_partial_toml() {
        let config: ExportConfig = toml::from_str("strategy = \"quality\"").unwrap();
        assert_eq!(config.strategy, WeldStrategy::Quality);
        assert_eq!(config.vertex_warning_threshold, DEFAULT_VERTEX_WARNING_THRESHOLD);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Quality".parse::<WeldStrategy>(), Ok(WeldStrategy::Quality));
        assert_eq!("fast".parse::<WeldStrategy>(), Ok(WeldStrategy::Fast));
        assert!("smart".parse::<WeldStrategy>().is_err());
    }

    #[test]
    fn test_overrides() {
        let base = ExportConfig::default();
        let overrides = ConfigOverrides {
            strategy: Some(WeldStrategy::Quality),
            tangents: Some(true),
            minimize: None,
        };
        let config = base.with_overrides(&overrides);
        assert_eq!(config.strategy, WeldStrategy::Quality);
        assert!(config.export_tangents);
        assert!(!config.minimize);

        assert_eq!(base.with_overrides(&ConfigOverrides::default()), base);
    }
}
