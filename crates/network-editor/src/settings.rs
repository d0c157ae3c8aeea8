use linkgraph::GenerateParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BULK_NODE_COUNT: usize = 1000;
pub const BULK_EXTRA_LINKS_PER_NODE: usize = 1;
pub const NEW_NODE_LABEL: &str = "New node";

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Editor configuration. Missing fields fall back to the defaults, so a
/// settings file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Node count used by the bulk-generate action.
    pub bulk_node_count: usize,
    pub bulk_extra_links_per_node: usize,
    /// Label given to nodes added one at a time.
    pub new_node_label: String,
    /// Fixed seed for bulk generation; `None` uses the thread generator.
    pub seed: Option<u64>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            bulk_node_count: BULK_NODE_COUNT,
            bulk_extra_links_per_node: BULK_EXTRA_LINKS_PER_NODE,
            new_node_label: NEW_NODE_LABEL.to_owned(),
            seed: None,
        }
    }
}

impl EditorSettings {
    pub fn bulk_params(&self) -> GenerateParams {
        GenerateParams::new(
            self.bulk_node_count,
            self.bulk_extra_links_per_node,
        )
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json_str = std::fs::read_to_string(path).map_err(|source| {
            SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        serde_json::from_str(&json_str).map_err(|source| {
            SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
