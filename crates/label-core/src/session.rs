//! Annotation session state machine.
//!
//! Owns the ordered point list, the cursor, and the annotations collected so
//! far. All mutation goes through the operations defined here; out-of-range
//! commands are silent no-ops so UI-originated input can never corrupt the
//! session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Annotation, Progress, SamplePoint};

/// Clock used to stamp annotations. Injectable so tests can pin timestamps.
pub type Clock = fn() -> DateTime<Utc>;

fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

/// The annotation workflow state for one loaded point set.
///
/// Invariants maintained by the operations:
/// * `cursor` stays within `[0, points.len()]`; it equals `points.len()`
///   only for an empty session.
/// * `annotations` holds at most one entry per point id.
/// * `load` is the only operation that replaces the point list, and it
///   always resets the cursor and clears the annotations.
pub struct AnnotationSession {
    points: Vec<SamplePoint>,
    cursor: usize,
    annotations: HashMap<String, Annotation>,
    clock: Clock,
}

impl AnnotationSession {
    /// Create an empty session using the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Create an empty session with an explicit clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            points: Vec::new(),
            cursor: 0,
            annotations: HashMap::new(),
            clock,
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Replace the point list, reset the cursor, and clear all annotations.
    ///
    /// Accepts an empty sequence, which yields a session with no current
    /// point. Validation of the points themselves belongs to ingestion.
    pub fn load(&mut self, points: Vec<SamplePoint>) {
        debug!(count = points.len(), "loading point set");
        self.points = points;
        self.cursor = 0;
        self.annotations.clear();
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The point under the cursor, or `None` past the end.
    pub fn current_point(&self) -> Option<&SamplePoint> {
        self.points.get(self.cursor)
    }

    /// Current cursor index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All loaded points in session order.
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// The annotation recorded for `id`, if any.
    pub fn annotation_for(&self, id: &str) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// All annotations keyed by point id. Iteration order is unspecified.
    pub fn annotations(&self) -> &HashMap<String, Annotation> {
        &self.annotations
    }

    /// Completion counters: distinct annotated ids over loaded points.
    ///
    /// Skipping does not count as progress; re-annotating an id does not
    /// double count.
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.annotations.len(),
            total: self.points.len(),
        }
    }

    /// `true` iff the session is non-empty and every point is annotated.
    pub fn all_annotated(&self) -> bool {
        self.progress().is_complete()
    }

    // ── Labeling ──────────────────────────────────────────────────────────

    /// Record a label for the point at `index`.
    ///
    /// Out-of-range indices are ignored. The annotation is keyed by point id
    /// and replaces any prior annotation for that id. When the labeled index
    /// is the cursor and the cursor is not on the last point, the cursor
    /// advances by one.
    pub fn annotate(&mut self, index: usize, class: &str) {
        let Some(point) = self.points.get(index).cloned() else {
            debug!(index, "annotate ignored: index out of range");
            return;
        };

        let id = point.id.clone();
        let annotation = Annotation {
            point,
            class: class.to_string(),
            annotated_at: (self.clock)(),
        };
        self.annotations.insert(id, annotation);

        if index == self.cursor && self.cursor + 1 < self.points.len() {
            self.cursor += 1;
        }
    }

    /// Record a label for the point under the cursor.
    pub fn annotate_current(&mut self, class: &str) {
        if self.current_point().is_some() {
            self.annotate(self.cursor, class);
        } else {
            debug!("annotate_current ignored: no current point");
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────

    /// Advance the cursor by one, clamped to the last point. Produces no
    /// annotation; idempotent once at the end.
    pub fn skip(&mut self) {
        if self.cursor + 1 < self.points.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor back by one, clamped to the first point. Existing
    /// annotations are untouched, so a revisited point still counts as
    /// completed.
    pub fn go_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn point(id: &str) -> SamplePoint {
        SamplePoint {
            id: id.to_string(),
            lat: 40.0,
            lon: -74.0,
            note: String::new(),
        }
    }

    fn session_with(n: usize) -> AnnotationSession {
        let mut session = AnnotationSession::with_clock(fixed_clock);
        session.load((0..n).map(|i| point(&format!("p{i}"))).collect());
        session
    }

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_sets_counters() {
        for n in [0usize, 1, 5] {
            let session = session_with(n);
            let progress = session.progress();
            assert_eq!(progress.total, n);
            assert_eq!(progress.completed, 0);
            assert_eq!(session.cursor(), 0);
        }
    }

    #[test]
    fn test_load_empty_has_no_current_point() {
        let session = session_with(0);
        assert!(session.current_point().is_none());
    }

    #[test]
    fn test_reload_resets_cursor_and_annotations() {
        let mut session = session_with(3);
        session.annotate(0, "wheat");
        session.skip();
        assert_eq!(session.cursor(), 2);

        session.load(vec![point("q0"), point("q1")]);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.progress().completed, 0);
        assert_eq!(session.progress().total, 2);
        assert!(session.annotation_for("p0").is_none());
    }

    // ── current_point ─────────────────────────────────────────────────────

    #[test]
    fn test_current_point_follows_cursor() {
        let mut session = session_with(3);
        assert_eq!(session.current_point().unwrap().id, "p0");
        session.skip();
        assert_eq!(session.current_point().unwrap().id, "p1");
    }

    // ── annotate ──────────────────────────────────────────────────────────

    #[test]
    fn test_annotate_increments_progress_once() {
        let mut session = session_with(3);
        session.annotate(0, "wheat");
        assert_eq!(session.progress().completed, 1);

        // Re-annotating the same id must not double count.
        session.annotate(0, "maize");
        assert_eq!(session.progress().completed, 1);
        assert_eq!(session.annotation_for("p0").unwrap().class, "maize");
    }

    #[test]
    fn test_annotate_advances_cursor() {
        let mut session = session_with(3);
        session.annotate(0, "wheat");
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_annotate_last_point_does_not_advance() {
        let mut session = session_with(3);
        session.skip();
        session.skip();
        assert_eq!(session.cursor(), 2);

        session.annotate(2, "nocrop");
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.progress().completed, 1);
    }

    #[test]
    fn test_annotate_non_cursor_index_leaves_cursor() {
        let mut session = session_with(3);
        session.skip();
        assert_eq!(session.cursor(), 1);

        // Labeling a point behind the cursor records it but does not move.
        session.annotate(0, "wheat");
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.annotation_for("p0").unwrap().class, "wheat");
    }

    #[test]
    fn test_annotate_out_of_range_is_noop() {
        let mut session = session_with(2);
        session.annotate(2, "wheat");
        session.annotate(usize::MAX, "wheat");
        assert_eq!(session.progress().completed, 0);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_annotate_empty_session_is_noop() {
        let mut session = session_with(0);
        session.annotate(0, "wheat");
        session.annotate_current("wheat");
        assert_eq!(session.progress().completed, 0);
    }

    #[test]
    fn test_annotate_stamps_clock_time() {
        let mut session = session_with(1);
        session.annotate(0, "rapeseed");
        let annotation = session.annotation_for("p0").unwrap();
        assert_eq!(annotation.annotated_at, fixed_clock());
    }

    #[test]
    fn test_annotate_accepts_unknown_class() {
        // Taxonomy enforcement is advisory; the session stores what it is
        // given.
        let mut session = session_with(1);
        session.annotate(0, "not-in-any-taxonomy");
        assert_eq!(
            session.annotation_for("p0").unwrap().class,
            "not-in-any-taxonomy"
        );
    }

    #[test]
    fn test_annotate_current_labels_cursor_point() {
        let mut session = session_with(2);
        session.skip();
        session.annotate_current("maize");
        assert_eq!(session.annotation_for("p1").unwrap().class, "maize");
        // Cursor was on the last point, so it stays.
        assert_eq!(session.cursor(), 1);
    }

    // ── skip ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skip_clamps_at_last_point() {
        let mut session = session_with(4);
        for _ in 0..4 {
            session.skip();
        }
        assert_eq!(session.cursor(), 3);
        assert_eq!(session.progress().completed, 0);
    }

    #[test]
    fn test_skip_empty_session_is_noop() {
        let mut session = session_with(0);
        session.skip();
        assert_eq!(session.cursor(), 0);
    }

    // ── go_back ───────────────────────────────────────────────────────────

    #[test]
    fn test_go_back_from_zero_is_noop() {
        let mut session = session_with(3);
        session.go_back();
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_go_back_preserves_annotations() {
        let mut session = session_with(3);
        session.annotate(0, "wheat");
        assert_eq!(session.cursor(), 1);

        session.go_back();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.progress().completed, 1);
        assert!(session.annotation_for("p0").is_some());
    }

    // ── all_annotated ─────────────────────────────────────────────────────

    #[test]
    fn test_all_annotated_false_for_empty_session() {
        let session = session_with(0);
        assert!(!session.all_annotated());
    }

    #[test]
    fn test_all_annotated_requires_every_point() {
        let mut session = session_with(2);
        session.annotate(0, "wheat");
        assert!(!session.all_annotated());
        session.annotate(1, "maize");
        assert!(session.all_annotated());
    }

    #[test]
    fn test_navigation_continues_after_completion() {
        // No terminal state: the operator may keep moving after finishing.
        let mut session = session_with(2);
        session.annotate(0, "wheat");
        session.annotate(1, "maize");
        assert!(session.all_annotated());

        session.go_back();
        assert_eq!(session.cursor(), 0);
        session.skip();
        assert_eq!(session.cursor(), 1);
        assert!(session.all_annotated());
    }
}
