//! Report rendering configuration.

/// Controls how diagnostics are drawn.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Emit ANSI colors.
    pub color: bool,
    /// Use the compact layout (no surrounding source lines).
    pub compact: bool,
    /// Columns a tab in the template source expands to.
    pub tab_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            color: true,
            compact: false,
            tab_width: 4,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text output, suitable for logs and tests.
    pub fn plain() -> Self {
        Self::default().color(false)
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub(crate) fn to_ariadne(&self) -> ariadne::Config {
        ariadne::Config::default()
            .with_color(self.color)
            .with_compact(self.compact)
            .with_tab_width(self.tab_width)
    }
}
