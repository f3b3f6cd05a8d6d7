use anyhow::{Context, Result};
use crossterm::event::{KeyModifiers, ModifierKeyCode};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dom::Selector;

/// Selectors for every element the controller binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub search: Selector,
    pub rows: Selector,
    pub overlay: Selector,
    /// Resolved inside the overlay element
    pub overlay_close: Selector,
    pub help_trigger: Selector,
    pub theme_toggle: Selector,
    pub refresh_control: Selector,
    pub pause_control: Selector,
    /// Marker class applied to the selected row
    pub selected_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            search: Selector::class("input"),
            rows: Selector::class("flag"),
            overlay: Selector::id("help-dialog"),
            overlay_close: Selector::tag("button"),
            help_trigger: Selector::class("help-trigger"),
            theme_toggle: Selector::class("theme-toggle"),
            refresh_control: Selector::id("sync"),
            pause_control: Selector::id("pause"),
            selected_class: "selected".to_string(),
        }
    }
}

/// The auxiliary key that enables the refresh/pause/help/theme shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Alt,
    Control,
    Shift,
    Meta,
}

impl ModifierKey {
    /// Platform default: Control on macOS (Alt produces dead keys there), Alt elsewhere
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            ModifierKey::Control
        } else {
            ModifierKey::Alt
        }
    }

    /// Whether a physical modifier key event belongs to this modifier
    pub fn matches(self, code: ModifierKeyCode) -> bool {
        use ModifierKeyCode::*;
        match self {
            ModifierKey::Alt => matches!(code, LeftAlt | RightAlt),
            ModifierKey::Control => matches!(code, LeftControl | RightControl),
            ModifierKey::Shift => matches!(code, LeftShift | RightShift),
            ModifierKey::Meta => matches!(code, LeftMeta | RightMeta | LeftSuper | RightSuper),
        }
    }

    /// Key code reported for the left-hand key of this modifier
    pub fn left_code(self) -> ModifierKeyCode {
        match self {
            ModifierKey::Alt => ModifierKeyCode::LeftAlt,
            ModifierKey::Control => ModifierKeyCode::LeftControl,
            ModifierKey::Shift => ModifierKeyCode::LeftShift,
            ModifierKey::Meta => ModifierKeyCode::LeftMeta,
        }
    }

    pub fn flag(self) -> KeyModifiers {
        match self {
            ModifierKey::Alt => KeyModifiers::ALT,
            ModifierKey::Control => KeyModifiers::CONTROL,
            ModifierKey::Shift => KeyModifiers::SHIFT,
            ModifierKey::Meta => KeyModifiers::META | KeyModifiers::SUPER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModifierKey::Alt => "Alt",
            ModifierKey::Control => "Ctrl",
            ModifierKey::Shift => "Shift",
            ModifierKey::Meta => "Meta",
        }
    }
}

impl Default for ModifierKey {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub modifier: ModifierKey,
}

/// Where the theme preference is applied and persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Attribute set on the document root
    pub attribute: String,
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_max_age_secs: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            attribute: "data-theme".to_string(),
            cookie_name: "prefers-color-scheme".to_string(),
            cookie_path: "/".to_string(),
            cookie_max_age_secs: 31_536_000, // one year
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ids of content regions whose replacement invalidates the roster.
    /// A whole-body replacement always does.
    pub rebuild_regions: Vec<String>,
    pub selectors: Selectors,
    pub keys: KeyConfig,
    pub theme: ThemeConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rebuild_regions: vec!["flags".to_string()],
            selectors: Selectors::default(),
            keys: KeyConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("overleash-dashboard")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".overleash-dashboard")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config = Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config with {} rebuild regions, modifier {:?}",
            config.rebuild_regions.len(),
            config.keys.modifier
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).with_context(|| {
                    format!("Failed to create config directory: {:?}", config_dir)
                })?;
                info!("Created config directory: {:?}", config_dir);
            }
        }

        fs::write(config_path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Whether replacing the region with this id requires a rebuild
    pub fn is_rebuild_region(&self, region_id: &str) -> bool {
        self.rebuild_regions.iter().any(|r| r == region_id)
    }
}
