use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILENAME;
use crate::rewrite::ScaleOptions;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section.
    pub pxscale: PxScaleConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for pxscale. Every field falls back to the built-in default.
pub struct PxScaleConfig {
    /// Directory holding the component files, relative to the config file.
    pub root: Option<PathBuf>,
    /// File-name glob for candidate files.
    pub pattern: Option<String>,
    /// Whether to descend into subdirectories.
    pub recursive: Option<bool>,
    /// Folders skipped during recursive discovery.
    pub exclude_folders: Option<Vec<String>>,
    /// Name of the scaling function binding.
    pub helper: Option<String>,
    /// Hook that returns the scaling function.
    pub hook: Option<String>,
    /// Module the hook is imported from.
    pub import_module: Option<String>,
    /// Prefix of scene component names.
    pub component_prefix: Option<String>,
    /// Calls after which the binding is injected.
    pub context_calls: Option<Vec<String>>,
    /// Component whose `size` prop is always scaled.
    pub glow_component: Option<String>,
    /// Per-property thresholds keyed by the property name as written in source.
    pub thresholds: Option<BTreeMap<String, u64>>,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }
        // Relative paths like "." have no parents to walk; resolve them first.
        if let Ok(abs) = current.canonicalize() {
            current = abs;
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Root directory from the config, resolved against the config file's folder.
    #[must_use]
    pub fn resolved_root(&self) -> Option<PathBuf> {
        let root = self.pxscale.root.as_ref()?;
        if root.is_absolute() {
            return Some(root.clone());
        }
        let base = self
            .config_file_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(root))
    }

    /// Builds the rewrite options, applying every configured override.
    #[must_use]
    pub fn scale_options(&self) -> ScaleOptions {
        let c = &self.pxscale;
        let mut options = ScaleOptions::default();
        if let Some(helper) = &c.helper {
            options.helper.clone_from(helper);
        }
        if let Some(hook) = &c.hook {
            options.hook.clone_from(hook);
        }
        if let Some(module) = &c.import_module {
            options.import_module.clone_from(module);
        }
        if let Some(prefix) = &c.component_prefix {
            options.component_prefix.clone_from(prefix);
        }
        if let Some(calls) = &c.context_calls {
            options.context_calls.clone_from(calls);
        }
        if let Some(glow) = &c.glow_component {
            options.glow_component.clone_from(glow);
        }
        for (property, value) in c.thresholds.iter().flatten() {
            options.thresholds.set(property, *value);
        }
        options
    }

    /// Threshold keys that do not name a known property.
    #[must_use]
    pub fn unknown_threshold_keys(&self) -> Vec<String> {
        let known = crate::rewrite::Thresholds::default();
        self.pxscale
            .thresholds
            .iter()
            .flatten()
            .filter(|(k, _)| known.get(k).is_none())
            .map(|(k, _)| k.clone())
            .collect()
    }
}
