//! Reporting of rejected field input.
//!
//! A malformed logging call must not abort the calling program. The
//! construction boundary turns conversion errors into a
//! [`ConversionDiagnostic`] delivered to a [`DiagnosticSink`], and carries on
//! with an unset instance. By default diagnostics go to the `log` facade.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
};

use arche_common::error::Error;
use arche_components::FieldInput;

/// Environment variable selecting the log level of diagnostics.
pub const LEVEL_ENV_VAR: &str = "ARCHE_DIAGNOSTICS_LEVEL";

/// Environment variable limiting the length of offending value previews.
pub const PREVIEW_LEN_ENV_VAR: &str = "ARCHE_VALUE_PREVIEW_LEN";

/// One rejected construction or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionDiagnostic {
    /// Short archetype name, e.g. `Scalar`.
    pub archetype: String,
    /// The failing field, when the error is attributable to one.
    pub field: Option<String>,
    /// Preview of the offending value.
    pub value: Option<String>,
    pub message: String,
}

impl fmt::Display for ConversionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.archetype)?;
        if let Some(field) = &self.field {
            write!(f, ": field '{field}'")?;
        }
        if let Some(value) = &self.value {
            write!(f, " rejected {value}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Receives diagnostics. Implementations must not panic.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &ConversionDiagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    pub level: log::Level,
}

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &ConversionDiagnostic) {
        log::log!(target: "arche::diagnostics", self.level, "{diagnostic}");
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<ConversionDiagnostic>>,
}

impl CollectingSink {
    pub fn new() -> CollectingSink {
        Default::default()
    }

    pub fn diagnostics(&self) -> Vec<ConversionDiagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &ConversionDiagnostic) {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Level of the records emitted by the default [`LogSink`].
    pub level: log::Level,
    /// Maximum number of characters of an offending value kept in a diagnostic.
    pub value_preview_len: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            level: log::Level::Warn,
            value_preview_len: 64,
        }
    }
}

impl DiagnosticsConfig {
    /// Reads [`LEVEL_ENV_VAR`] and [`PREVIEW_LEN_ENV_VAR`], keeping the
    /// defaults for missing or unparsable values.
    pub fn from_env() -> DiagnosticsConfig {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DiagnosticsConfig {
        let mut config = DiagnosticsConfig::default();
        if let Some(level) = lookup(LEVEL_ENV_VAR) {
            match log::Level::from_str(level.trim()) {
                Ok(level) => config.level = level,
                Err(_) => log::debug!("ignoring invalid {LEVEL_ENV_VAR}={level}"),
            }
        }
        if let Some(len) = lookup(PREVIEW_LEN_ENV_VAR) {
            match len.trim().parse() {
                Ok(len) => config.value_preview_len = len,
                Err(_) => log::debug!("ignoring invalid {PREVIEW_LEN_ENV_VAR}={len}"),
            }
        }
        config
    }
}

/// Configuration plus sink, passed to every fallible construction boundary.
#[derive(Clone)]
pub struct Diagnostics {
    config: DiagnosticsConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::new(DiagnosticsConfig::default())
    }
}

impl Diagnostics {
    /// Diagnostics logged through [`LogSink`] at the configured level.
    pub fn new(config: DiagnosticsConfig) -> Diagnostics {
        Diagnostics {
            config,
            sink: Arc::new(LogSink {
                level: config.level,
            }),
        }
    }

    pub fn with_sink(config: DiagnosticsConfig, sink: Arc<dyn DiagnosticSink>) -> Diagnostics {
        Diagnostics { config, sink }
    }

    /// Process-wide diagnostics, configured from the environment on first use.
    pub fn global() -> &'static Diagnostics {
        static GLOBAL: OnceLock<Diagnostics> = OnceLock::new();
        GLOBAL.get_or_init(|| Diagnostics::new(DiagnosticsConfig::from_env()))
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Reports `error` raised while building an instance of `archetype`.
    ///
    /// `value` is the input of the failing field, if known.
    pub fn report_error(&self, archetype: &str, error: &Error, value: Option<&FieldInput>) {
        let diagnostic = ConversionDiagnostic {
            archetype: archetype.to_string(),
            field: error.field_name().map(str::to_string),
            value: value.map(|value| value.preview(self.config.value_preview_len)),
            message: error.to_string(),
        };
        self.sink.report(&diagnostic);
    }
}
