use crate::themes::Theme;
use label_core::formatting::format_count;
use label_core::models::Progress;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a progress bar.
pub struct ProgressBarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    /// Character used to fill the completed portion of the bar.
    pub filled_char: char,
    /// Character used to fill the empty portion of the bar.
    pub empty_char: char,
    /// Whether to append a percentage figure after the bar.
    pub show_percentage: bool,
    /// Whether to append the `completed / total` counts after the bar.
    pub show_counts: bool,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            width: 50,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            show_percentage: true,
            show_counts: true,
        }
    }
}

// ── AnnotationProgressBar ────────────────────────────────────────────────────

/// Horizontal progress bar showing annotated points relative to the loaded
/// total.
///
/// Renders as a coloured fill + empty portion followed by a label with the
/// percentage and the `completed / total` counts formatted with thousands
/// separators.
pub struct AnnotationProgressBar<'a> {
    /// Share of points annotated, clamped to `[0.0, 100.0]`.
    pub percentage: f64,
    /// Completion counters being visualised.
    pub progress: Progress,
    /// Theme from which colour styles are taken.
    pub theme: &'a Theme,
    /// Visual configuration.
    pub config: ProgressBarConfig,
}

impl<'a> AnnotationProgressBar<'a> {
    /// Construct a new bar, computing the percentage automatically.
    pub fn new(progress: Progress, theme: &'a Theme) -> Self {
        Self {
            percentage: progress.percent().min(100.0),
            progress,
            theme,
            config: ProgressBarConfig::default(),
        }
    }

    /// Render the progress bar as a [`Line`] suitable for embedding in any
    /// ratatui widget that accepts `Line` values.
    pub fn to_line(&self) -> Line<'a> {
        let filled = ((self.percentage / 100.0) * self.config.width as f64) as u16;
        let empty = self.config.width.saturating_sub(filled);

        let bar_style = self.theme.progress_style(self.percentage);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        let label = format!(
            " {:.1}% ({}/{})",
            self.percentage,
            format_count(self.progress.completed),
            format_count(self.progress.total),
        );

        Line::from(vec![
            Span::styled(filled_str, bar_style),
            Span::styled(empty_str, self.theme.progress_empty),
            Span::styled(label, self.theme.progress_label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
