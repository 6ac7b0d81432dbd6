//! Controller configuration.
//!
//! A [`ListConfig`] can be built in code or loaded from TOML or JSON:
//!
//! ```toml
//! diagnostics = "log"
//!
//! [default_constraints]
//! scroll_direction = "vertical"
//! line_spacing = 8.0
//!
//! [default_constraints.distribution]
//! kind = "equally"
//! cells_in_row = 3
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticsMode;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{CellModel, Distribution, Section, SectionConstraints};

/// Settings for a [`ListController`](crate::ListController).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// How programming errors are surfaced.
    pub diagnostics: DiagnosticsMode,
    /// Constraints given to sections built with [`ListConfig::section`].
    pub default_constraints: SectionConstraints,
}

impl ListConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> ConfigResult<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat { path: path.into() }),
        };
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        let config = parse(&source)?;
        tracing::debug!(
            target: sectioned_core::logging::targets::CONTROLLER,
            path = %path.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Reject values the solver cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let constraints = &self.default_constraints;
        check_extent("default_constraints.line_spacing", constraints.line_spacing)?;
        check_extent(
            "default_constraints.interitem_spacing",
            constraints.interitem_spacing,
        )?;
        let inset = &constraints.inset;
        for (field, value) in [
            ("default_constraints.inset.top", inset.top),
            ("default_constraints.inset.left", inset.left),
            ("default_constraints.inset.bottom", inset.bottom),
            ("default_constraints.inset.right", inset.right),
        ] {
            check_extent(field, value)?;
        }
        match constraints.distribution {
            Distribution::Equally { cells_in_row: 0 } => Err(ConfigError::invalid_value(
                "default_constraints.distribution.cells_in_row",
                "must be at least 1",
            )),
            Distribution::ProportionallyWithLastCellFillingWidth { minimum_width } => check_extent(
                "default_constraints.distribution.minimum_width",
                minimum_width,
            ),
            _ => Ok(()),
        }
    }

    /// Build a section with the configured default constraints.
    pub fn section(
        &self,
        identifier: impl Into<String>,
        cell_models: Vec<Arc<dyn CellModel>>,
    ) -> Section {
        Section::new(identifier, cell_models).with_constraints(self.default_constraints)
    }
}

fn check_extent(field: &str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("expected a finite, non-negative number, got {value}"),
        ))
    }
}
