//! Color-scheme preference: the one piece of state that survives a reload.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ThemeConfig;
use crate::dom::{Cookie, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    #[default]
    Auto,
}

impl ThemePreference {
    /// Next preference in the `auto → dark → light → auto` cycle
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Auto => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
            ThemePreference::Auto => "auto",
        }
    }

    /// Anything that is not exactly `dark` or `light` counts as `auto`
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            "auto" => Ok(ThemePreference::Auto),
            other => anyhow::bail!("unknown color scheme '{}'", other),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preference currently in effect: the root attribute, else the cookie, else auto
pub fn current(doc: &dyn Document, config: &ThemeConfig) -> ThemePreference {
    doc.root_attribute(&config.attribute)
        .or_else(|| doc.cookie(&config.cookie_name))
        .map(|raw| ThemePreference::parse_lenient(&raw))
        .unwrap_or_default()
}

/// Apply the attribute and persist the cookie
pub fn apply(doc: &mut dyn Document, config: &ThemeConfig, preference: ThemePreference) {
    doc.set_root_attribute(&config.attribute, preference.as_str());
    doc.set_cookie(&Cookie {
        name: config.cookie_name.clone(),
        value: preference.as_str().to_string(),
        path: config.cookie_path.clone(),
        max_age_secs: config.cookie_max_age_secs,
    });
}

/// Advance the preference one step and apply it
pub fn cycle(doc: &mut dyn Document, config: &ThemeConfig) -> ThemePreference {
    let previous = current(doc, config);
    let next = previous.next();
    debug!("theme {} -> {}", previous, next);
    apply(doc, config, next);
    next
}
