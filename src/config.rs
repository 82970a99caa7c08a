use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{Color, PALETTE_SIZE};

/// Tunables for the report layer. The analyses themselves take no options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many changed pixels a diff summary lists before truncating.
    pub diff_preview: usize,
    /// Colors to flood-fill in a frame report. `None` means every color present.
    pub component_colors: Option<Vec<Color>>,
    pub detect_patterns: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { diff_preview: 5, component_colors: None, detect_patterns: true }
    }
}

impl AnalysisConfig {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(content)?;
        if let Some(colors) = &config.component_colors {
            if let Some(bad) = colors.iter().find(|&&c| c as usize >= PALETTE_SIZE) {
                anyhow::bail!("component color {} is outside the {}-color palette", bad, PALETTE_SIZE);
            }
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
    }
}
