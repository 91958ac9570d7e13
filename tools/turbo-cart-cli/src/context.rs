//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use turbo_cart::collaborators::Collaborators;
use turbo_cart::{Storefront, StorefrontConfig};

use crate::output::Output;
use crate::shell::{CountBadge, TerminalDrawer, TerminalNavigator, TerminalNotifier};

const CONFIG_NAMES: [&str; 3] = ["turbo-cart.toml", ".turbo-cart.toml", "turbo-cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_path) = match config_path {
            Some(path) => {
                let config = StorefrontConfig::load(path)
                    .with_context(|| format!("Failed to load config from {path}"))?;
                (config, Some(PathBuf::from(path)))
            }
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                match Self::find_config(&cwd) {
                    Some((config, path)) => (config, Some(path)),
                    None => (StorefrontConfig::default(), None),
                }
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    if let Ok(config) = StorefrontConfig::load(candidate.to_str()?) {
                        return Some((config, candidate));
                    }
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Wire a storefront against the configured backend, with terminal
    /// collaborators standing in for the page shells.
    pub fn storefront(&self) -> Storefront {
        let collaborators = Collaborators::new()
            .with_drawer(Arc::new(TerminalDrawer::new(self.output.clone())))
            .with_notifier(Arc::new(TerminalNotifier::new(self.output.clone())))
            .with_navigator(Arc::new(TerminalNavigator::new(self.output.clone())));

        Storefront::connect(self.config.clone(), collaborators)
            .with_indicator(Arc::new(CountBadge::new(self.output.clone())))
    }
}
