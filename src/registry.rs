use colorgate_color::Mode;

/// The set of color modes that have been registered for conversion.
///
/// Conversions check both ends against the registry and panic on a mode
/// that was never registered; that is a wiring bug, not a runtime case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registry {
    modes: u16,
}

const fn bit(mode: Mode) -> u16 {
    1 << mode as u16
}

impl Registry {
    /// A registry with nothing registered.
    #[must_use]
    pub const fn empty() -> Self {
        Self { modes: 0 }
    }

    /// Registers every mode the picker works with: rgb, p3, rec2020,
    /// oklch, oklab, hsl, lch and lab.
    #[must_use]
    pub const fn standard() -> Self {
        Self::empty()
            .register(Mode::Rec2020)
            .register(Mode::Oklch)
            .register(Mode::Rgb)
            .register(Mode::Lch)
            .register(Mode::P3)
            .register(Mode::Oklab)
            .register(Mode::Hsl)
            .register(Mode::Lab)
    }

    /// Returns the registry with `mode` added.
    #[must_use]
    pub const fn register(self, mode: Mode) -> Self {
        Self {
            modes: self.modes | bit(mode),
        }
    }

    /// Whether `mode` has been registered.
    #[must_use]
    pub const fn contains(&self, mode: Mode) -> bool {
        self.modes & bit(mode) != 0
    }

    /// Registered modes, in declaration order.
    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        Mode::ALL.into_iter().filter(|mode| self.contains(*mode))
    }

    /// Asserts that `mode` has been registered.
    ///
    /// # Panics
    ///
    /// Panics if it was not.
    #[track_caller]
    pub fn require(&self, mode: Mode) {
        assert!(
            self.contains(mode),
            "color mode `{mode}` is not registered"
        );
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registers_every_mode() {
        let registry = Registry::standard();
        assert_eq!(registry.modes().count(), Mode::ALL.len());
    }

    #[test]
    fn custom_registration() {
        let registry = Registry::empty().register(Mode::Rgb).register(Mode::Oklch);
        assert!(registry.contains(Mode::Rgb));
        assert!(registry.contains(Mode::Oklch));
        assert!(!registry.contains(Mode::P3));
        assert_eq!(registry.modes().collect::<Vec<_>>(), [Mode::Rgb, Mode::Oklch]);
    }

    #[test]
    #[should_panic(expected = "color mode `p3` is not registered")]
    fn require_panics_on_missing_mode() {
        Registry::empty().register(Mode::Rgb).require(Mode::P3);
    }
}
