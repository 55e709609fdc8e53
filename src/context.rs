//! Process-wide rendering state driven by declared display capability.
//!
//! A [`RenderingContext`] owns the current formatter and the visibility
//! closures built for one [`ColorSupport`] declaration. Re-declaring support
//! replaces all of them at once, so a reader never pairs a formatter from one
//! declaration with closures from another.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use colorgate_color::Color;

use crate::{
    ColorSupport, Config, Converter, Formatter, GetAlpha, IsVisible, VisibilityPolicy,
};

/// Source of display capability, such as a platform media query.
pub trait CapabilityProbe {
    /// Capability the display currently declares.
    fn color_support(&self) -> ColorSupport;
}

impl CapabilityProbe for ColorSupport {
    fn color_support(&self) -> ColorSupport {
        *self
    }
}

struct Snapshot {
    support: ColorSupport,
    formatter: Formatter,
    is_visible: IsVisible,
    get_alpha: GetAlpha,
}

impl Snapshot {
    fn new(converter: Converter, support: ColorSupport) -> Self {
        let policy = VisibilityPolicy::with_converter(converter, support);
        Self {
            support,
            formatter: Formatter::for_support(support.p3),
            is_visible: policy.into_is_visible(),
            get_alpha: policy.into_get_alpha(),
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("support", &self.support)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

/// Current formatter and visibility policy for a display.
#[derive(Debug)]
pub struct RenderingContext {
    converter: Converter,
    current: RwLock<Arc<Snapshot>>,
}

impl Default for RenderingContext {
    fn default() -> Self {
        Self::new(ColorSupport::SRGB_ONLY)
    }
}

impl RenderingContext {
    /// Creates a context for `support` with the standard converter.
    #[must_use]
    pub fn new(support: ColorSupport) -> Self {
        Self::with_converter(Converter::standard(), support)
    }

    /// Creates a context for `support` using `converter`.
    #[must_use]
    pub fn with_converter(converter: Converter, support: ColorSupport) -> Self {
        Self {
            converter,
            current: RwLock::new(Arc::new(Snapshot::new(converter, support))),
        }
    }

    /// Creates a context from start-up configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_converter(config.converter(), config.support)
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the declared capability, rebuilding formatter and closures.
    pub fn set_support(&self, support: ColorSupport) {
        let next = Arc::new(Snapshot::new(self.converter, support));
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            from = ?current.support,
            to = ?support,
            formatter = ?next.formatter,
            "color support changed"
        );
        *current = next;
    }

    /// Declares P3 support, keeping the current Rec.2020 declaration.
    pub fn set_color_support(&self, has_p3: bool) {
        let support = ColorSupport {
            p3: has_p3,
            ..self.support()
        };
        self.set_support(support);
    }

    /// Re-reads capability from `probe`.
    pub fn refresh(&self, probe: &impl CapabilityProbe) {
        self.set_support(probe.color_support());
    }

    /// Declared capability.
    #[must_use]
    pub fn support(&self) -> ColorSupport {
        self.snapshot().support
    }

    /// Formatter currently in use.
    #[must_use]
    pub fn formatter(&self) -> Formatter {
        self.snapshot().formatter
    }

    /// Converter used by this context.
    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Serializes `color` with the current formatter.
    #[must_use]
    pub fn format(&self, color: &Color) -> String {
        self.snapshot().formatter.format(&self.converter, color)
    }

    /// Whether `color` is visible under the current declaration.
    #[must_use]
    pub fn is_visible(&self, color: &Color) -> bool {
        (self.snapshot().is_visible)(color)
    }

    /// Opacity hint for `color` under the current declaration.
    #[must_use]
    pub fn get_alpha(&self, color: &Color) -> f64 {
        (self.snapshot().get_alpha)(color)
    }
}

static GLOBAL: OnceLock<RenderingContext> = OnceLock::new();

/// The process-wide context, configured from the environment on first use.
pub fn global() -> &'static RenderingContext {
    GLOBAL.get_or_init(|| match Config::from_env() {
        Ok(config) => RenderingContext::from_config(&config),
        Err(error) => {
            tracing::warn!(%error, "ignoring invalid colorgate configuration");
            RenderingContext::default()
        }
    })
}

/// Declares P3 support on the process-wide context.
pub fn set_color_support(has_p3: bool) {
    global().set_color_support(has_p3);
}

/// Serializes `color` with the process-wide formatter.
#[must_use]
pub fn format(color: &Color) -> String {
    global().format(color)
}
