//! Annotation screen for the geolabel TUI.
//!
//! Renders the current sample point, the class buttons derived from the
//! configured taxonomy, session progress, the selected imagery layer, and
//! the navigation hints.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use label_core::formatting::format_coord;
use label_core::models::Taxonomy;
use label_core::time_utils::TimezoneHandler;
use label_runtime::coordinator::SessionSnapshot;

use crate::components::header::Header;
use crate::components::progress_bar::AnnotationProgressBar;
use crate::themes::Theme;

/// Maximum display width of the note line before truncation.
const NOTE_WIDTH: usize = 60;

/// All data required to render the annotation view.
pub struct AnnotateViewData<'a> {
    /// Latest session snapshot from the coordinator.
    pub snapshot: &'a SessionSnapshot,
    /// Configured label taxonomy, in display order.
    pub taxonomy: &'a Taxonomy,
    /// Human-readable timezone string for timestamp display.
    pub timezone: &'a str,
    /// Whether timestamps use the 12-hour clock.
    pub twelve_hour: bool,
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Truncate `s` to at most `max` display columns, appending `…` when cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

// ── Main render ───────────────────────────────────────────────────────────────

/// Render the annotation view into `area`.
pub fn render_annotate_view(frame: &mut Frame, area: Rect, data: &AnnotateViewData, theme: &Theme) {
    let lines = build_annotate_lines(data, theme);
    let paragraph = Paragraph::new(Text::from(lines));
    frame.render_widget(paragraph, area);
}

/// Render the empty state shown before any points are loaded.
pub fn render_no_points(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No annotation points loaded", theme.bold)),
        Line::from(""),
        Line::from(Span::styled(
            "Provide a CSV file of points (id,lat,lon,note) to begin annotation",
            theme.dim,
        )),
        Line::from(""),
        Line::from(Span::styled("[q] quit", theme.dim)),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Build the full `Vec<Line>` for the annotation view (extracted for
/// testability).
pub fn build_annotate_lines<'a>(data: &AnnotateViewData, theme: &'a Theme) -> Vec<Line<'a>> {
    let snapshot = data.snapshot;
    let mut lines: Vec<Line<'a>> = Vec::with_capacity(24);

    // ── Header ────────────────────────────────────────────────────────────
    let source = snapshot
        .source
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unsaved session".to_string());
    lines.extend(Header::new(&source, data.timezone, theme).to_lines());

    // ── Progress ──────────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Progress:", theme.label)));
    lines.push(AnnotationProgressBar::new(snapshot.progress, theme).to_line());
    lines.push(Line::from(""));

    // ── Loading / error states ────────────────────────────────────────────
    if snapshot.loading {
        lines.push(Line::from(Span::styled("Loading points…", theme.info)));
        lines.push(Line::from(""));
    }
    if let Some(error) = &snapshot.load_error {
        lines.push(Line::from(vec![
            Span::styled("Load failed: ", theme.error),
            Span::styled(error.clone(), theme.text),
        ]));
        lines.push(Line::from(""));
    }

    // ── Current point ─────────────────────────────────────────────────────
    if let Some(point) = &snapshot.current_point {
        let status = if snapshot.current_annotation.is_some() {
            Span::styled(" ● annotated", theme.point_annotated)
        } else {
            Span::styled(" ○ pending", theme.point_pending)
        };
        lines.push(Line::from(vec![
            Span::styled("Point:     ", theme.label),
            Span::styled(point.id.clone(), theme.value),
            Span::styled(
                format!(
                    "  ({} of {})",
                    snapshot.cursor + 1,
                    snapshot.progress.total
                ),
                theme.dim,
            ),
            status,
        ]));
        lines.push(Line::from(vec![
            Span::styled("Location:  ", theme.label),
            Span::styled(format_coord(point.lat, point.lon), theme.value),
        ]));
        if !point.note.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Note:      ", theme.label),
                Span::styled(truncate_to_width(&point.note, NOTE_WIDTH), theme.text),
            ]));
        }

        if let Some(annotation) = &snapshot.current_annotation {
            let tz = TimezoneHandler::new(data.timezone);
            lines.push(Line::from(vec![
                Span::styled("Labeled:   ", theme.label),
                Span::styled(annotation.class.clone(), theme.success),
                Span::styled(
                    format!(
                        " at {}",
                        tz.format_local(annotation.annotated_at, data.twelve_hour)
                    ),
                    theme.dim,
                ),
            ]));
        }
        lines.push(Line::from(""));

        // ── Class buttons ─────────────────────────────────────────────────
        lines.push(Line::from(Span::styled(
            "Select classification:",
            theme.label,
        )));
        let mut class_spans: Vec<Span<'a>> = Vec::new();
        for (i, class) in data.taxonomy.classes().iter().enumerate() {
            class_spans.push(Span::styled(format!("[{}] ", i + 1), theme.dim));
            class_spans.push(Span::styled(
                format!("{}  ", class.label),
                theme.class_style(i),
            ));
        }
        lines.push(Line::from(class_spans));
        lines.push(Line::from(""));
    }

    // ── Imagery ───────────────────────────────────────────────────────────
    if let Some(name) = &snapshot.imagery_name {
        lines.push(Line::from(vec![
            Span::styled("Imagery:   ", theme.label),
            Span::styled(name.clone(), theme.info),
            Span::styled(format!("  (layer {})", snapshot.imagery_index + 1), theme.dim),
        ]));
        lines.push(Line::from(""));
    }

    // ── Completion banner ─────────────────────────────────────────────────
    if snapshot.all_annotated {
        lines.push(Line::from(Span::styled(
            "All samples annotated!",
            theme.success,
        )));
        lines.push(Line::from(""));
    }

    // ── Key hints ─────────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled(
        "[1-9] label   [n/→] skip   [b/←] back   [i] imagery   [q] quit",
        theme.dim,
    )));

    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
