use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    controller::TableController,
    default_colors::*,
    export::{CsvFormat, DEFAULT_FILE_NAME},
    gateway::{OpenLibrary, DEFAULT_BASE_URL},
    pipeline::EnrichmentPolicy,
    types::{PageSize, QueryState},
    view::WindowMode,
};

pub const CONFIG_FILE: &str = "bookdash.toml";
pub const ENV_PREFIX: &str = "BOOKDASH_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    pub fn style(&self, s: impl ToString, enabled: bool) -> String {
        if !enabled {
            return s.to_string();
        }
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

/// How the table is drawn in the terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub color:          bool,
    /// Cells longer than this are cut off with an ellipsis.
    pub column_width:   usize,
    pub style_header:   StyleConfig,
    pub style_sort:     StyleConfig,
    pub style_key:      StyleConfig,
    pub style_cell:     StyleConfig,
    pub style_editing:  StyleConfig,
    pub style_footer:   StyleConfig,
    pub style_error:    StyleConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            color:         true,
            column_width:  24,
            style_header:  StyleConfig {
                bold: true,
                color: COLOR_HEADER,
                ..StyleConfig::default()
            },
            style_sort:    StyleConfig {
                bold: true,
                color: COLOR_SORT,
                ..StyleConfig::default()
            },
            style_key:     StyleConfig {
                color: COLOR_KEY,
                ..StyleConfig::default()
            },
            style_cell:    StyleConfig::default(),
            style_editing: StyleConfig {
                italic: true,
                color: COLOR_EDITING,
                ..StyleConfig::default()
            },
            style_footer:  StyleConfig {
                color: COLOR_DIMMED,
                ..StyleConfig::default()
            },
            style_error:   StyleConfig {
                bold: true,
                color: COLOR_ERROR,
                ..StyleConfig::default()
            },
        }
    }
}

/// Compatibility switches. Each defaults to the corrected behaviour, the
/// other variant reproduces the legacy dashboard.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    pub enrichment: EnrichmentPolicy,
    pub csv:        CsvFormat,
    pub window:     WindowMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url:             String,
    pub page_size:            PageSize,
    pub export_path:          PathBuf,
    pub history_file:         PathBuf,
    pub log_level:            String,
    pub request_timeout_secs: Option<u64>,
    pub behaviour:            BehaviourConfig,
    pub table:                TableConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    /// Defaults, then `bookdash.toml`, then `BOOKDASH_*` variables (also read
    /// from a `.env` file). Nested keys use `__`, e.g.
    /// `BOOKDASH_BEHAVIOUR__CSV=raw`.
    pub fn read_config() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level {:?}", self.log_level))
    }

    pub fn open_library(&self) -> OpenLibrary {
        let client = OpenLibrary::new(&self.base_url);
        match self.request_timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        }
    }

    pub fn controller(&self) -> TableController<OpenLibrary> {
        TableController::new(self.open_library())
            .with_policy(self.behaviour.enrichment)
            .with_window(self.behaviour.window)
            .with_query(QueryState::with_page_size(self.page_size))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url:             DEFAULT_BASE_URL.into(),
            page_size:            PageSize::default(),
            export_path:          PathBuf::from(DEFAULT_FILE_NAME),
            history_file:         PathBuf::from("history.txt"),
            log_level:            "warn".into(),
            request_timeout_secs: None,
            behaviour:            BehaviourConfig::default(),
            table:                TableConfig::default(),
        }
    }
}
