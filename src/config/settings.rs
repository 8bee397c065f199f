//! Configuration settings for neoquest.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network and contract configuration.
    pub network: NetworkConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Network and contract configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Neo N3 node JSON-RPC endpoint.
    pub rpc_url: String,
    /// Base58 address of the deployed market contract.
    pub contract_address: String,
    /// Base58 address of the voting account. Required to connect.
    pub account_address: Option<String>,
    /// Expected network magic; connection fails on mismatch when set.
    pub network_magic: Option<u32>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            // N3 TestNet seed node.
            rpc_url: "http://seed3t5.neo.org:20332".to_string(),
            contract_address: String::new(),
            account_address: None,
            network_magic: None,
            timeout_secs: 30,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Start in dark mode. Persisted when toggled in the app.
    pub dark_mode: bool,
    /// Enable Unicode symbols.
    pub unicode_symbols: bool,
    /// Show the footer hint bar.
    pub show_hint_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            dark_mode: true,
            unicode_symbols: true,
            show_hint_bar: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh market data.
    pub refresh: String,
    /// Connect the wallet.
    pub connect: String,
    /// Toggle dark mode.
    pub dark_mode: String,
    /// Choose the Yes outcome.
    pub outcome_yes: String,
    /// Choose the No outcome.
    pub outcome_no: String,
    /// Edit the stake amount.
    pub amount: String,
    /// Stake the whole balance.
    pub max_amount: String,
    /// Submit the vote.
    pub vote: String,
    /// Open the create-market form.
    pub create_market: String,
    /// Submit the create-market form.
    pub submit_market: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            connect: "w".to_string(),
            dark_mode: "d".to_string(),
            outcome_yes: "y".to_string(),
            outcome_no: "n".to_string(),
            amount: "i".to_string(),
            max_amount: "m".to_string(),
            vote: "v".to_string(),
            create_market: "a".to_string(),
            submit_market: "s".to_string(),
        }
    }
}

/// Theme configuration: one palette per mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark: Palette,
    pub light: Palette,
}

impl ThemeConfig {
    /// The palette for the current dark-mode flag.
    pub fn active(&self, dark_mode: bool) -> &Palette {
        if dark_mode { &self.dark } else { &self.light }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dark: Palette::default(),
            light: Palette {
                background: "#f6f8fa".to_string(),
                foreground: "#1f2328".to_string(),
                accent: "#0969da".to_string(),
                success: "#1a7f37".to_string(),
                warning: "#9a6700".to_string(),
                error: "#cf222e".to_string(),
                border: "#d0d7de".to_string(),
                selection: "#ddf4ff".to_string(),
                muted: "#656d76".to_string(),
            },
        }
    }
}

/// Color palette (hex strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub border: String,
    pub selection: String,
    pub muted: String,
}

impl Default for Palette {
    fn default() -> Self {
        // Dark palette by default; the light one overrides in ThemeConfig.
        Self {
            background: "#0d1117".to_string(),
            foreground: "#e6edf3".to_string(),
            accent: "#58a6ff".to_string(),
            success: "#3be86f".to_string(),
            warning: "#ffa726".to_string(),
            error: "#ef5350".to_string(),
            border: "#30363d".to_string(),
            selection: "#21262d".to_string(),
            muted: "#8b949e".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.network.rpc_url, config.network.rpc_url);
        assert_eq!(back.ui.dark_mode, config.ui.dark_mode);
        assert_eq!(back.keybindings.vote, "v");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [network]
            rpc_url = "http://localhost:10332"
            contract_address = "NZs2zXSPuuv9ZF6TDGSWT1RBmE8rfGj7UW"
            "#,
        )
        .unwrap();
        assert_eq!(config.network.rpc_url, "http://localhost:10332");
        assert_eq!(config.network.timeout_secs, 30);
        assert!(config.ui.dark_mode);
    }

    #[test]
    fn active_palette_follows_the_dark_mode_flag() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.active(true).background, theme.dark.background);
        assert_eq!(theme.active(false).background, theme.light.background);
    }
}
