//! Destination URL classification and per-row composition.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use leadpost_model::{ConfigError, FieldSchema};

/// Path fragment that marks a URL as already carrying both routing identifiers.
static SUBMISSION_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/flows/[a-z0-9]{24}/sources/[a-z0-9]{24}").expect("Invalid submission path regex")
});

/// Whether a destination already embeds the flow and source identifiers.
///
/// Purely structural; no lookup is performed.
pub fn is_fully_qualified(url: &str) -> bool {
    SUBMISSION_PATH_REGEX.is_match(url)
}

/// How the destination is addressed. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// The URL is posted to as-is for every row.
    FullyQualified,
    /// Flow and source identifiers are appended from each row.
    Base,
}

/// Operator-supplied destination, validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    raw: String,
    mode: AddressingMode,
}

impl Destination {
    /// Validate a destination string. A scheme and a host are required in
    /// either addressing mode.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl(raw.to_string()))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::InvalidUrl(raw.to_string()));
        }
        let mode = if is_fully_qualified(raw) {
            AddressingMode::FullyQualified
        } else {
            AddressingMode::Base
        };
        Ok(Self {
            raw: raw.to_string(),
            mode,
        })
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Check the destination against the input columns and fix the routing
    /// for the run.
    ///
    /// A base URL without both `flow_id` and `source_id` columns cannot be
    /// routed at all, so this fails before any row is touched.
    pub fn plan(&self, schema: &FieldSchema) -> Result<RoutePlan, ConfigError> {
        match self.mode {
            AddressingMode::FullyQualified => Ok(RoutePlan::Fixed(self.raw.clone())),
            AddressingMode::Base => match (schema.flow_id_column, schema.source_id_column) {
                (Some(flow_column), Some(source_column)) => Ok(RoutePlan::PerRow {
                    base: self.raw.trim_end_matches('/').to_string(),
                    flow_column,
                    source_column,
                }),
                _ => Err(ConfigError::MissingRoutingColumns),
            },
        }
    }
}

/// Routing decided at startup, applied to each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePlan {
    Fixed(String),
    PerRow {
        base: String,
        flow_column: usize,
        source_column: usize,
    },
}

impl RoutePlan {
    /// The URL to post `row` to.
    pub fn url_for<'a>(&'a self, row: &[String]) -> Cow<'a, str> {
        match self {
            Self::Fixed(url) => Cow::Borrowed(url),
            Self::PerRow {
                base,
                flow_column,
                source_column,
            } => {
                let flow = row.get(*flow_column).map_or("", String::as_str);
                let source = row.get(*source_column).map_or("", String::as_str);
                Cow::Owned(format!("{base}/flows/{flow}/sources/{source}/submit"))
            }
        }
    }
}
