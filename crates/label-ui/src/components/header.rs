use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative accent string placed either side of the application title.
pub const ACCENT: &str = "· • ·";

/// Annotation screen header rendering four lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Source file and timezone information in `[ source | timezone ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Name of the loaded point file, or a placeholder when nothing is
    /// loaded.
    pub source: &'a str,
    /// Human-readable timezone string (e.g. "UTC", "America/New_York").
    pub timezone: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(source: &'a str, timezone: &'a str, theme: &'a Theme) -> Self {
        Self {
            source,
            timezone,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// Every span owns its content, so the lines outlive the header.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" GEOLABEL POINT ANNOTATION ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Source / timezone info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone.to_string(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
