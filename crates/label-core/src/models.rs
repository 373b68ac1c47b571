use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single geographic sample location eligible for labeling.
///
/// Points are immutable once created; the session never rewrites them, only
/// attaches annotations keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Identifier unique within a session. Synthesized at ingestion time when
    /// the source row does not carry one.
    pub id: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Free-text note attached to the point, empty when absent.
    #[serde(default)]
    pub note: String,
}

/// The label assigned to one point.
///
/// Carries all fields of the point it labels plus the chosen class and the
/// labeling timestamp. At most one annotation exists per point id;
/// re-labeling replaces the prior annotation in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The point this annotation labels.
    #[serde(flatten)]
    pub point: SamplePoint,
    /// Taxonomy value chosen by the operator.
    pub class: String,
    /// UTC timestamp of when the label was assigned (ISO-8601 on the wire).
    pub annotated_at: DateTime<Utc>,
}

/// One selectable class in the label taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationClass {
    /// Stable machine value stored in annotations.
    pub value: String,
    /// Human-readable label shown to the operator.
    pub label: String,
}

impl AnnotationClass {
    /// Convenience constructor.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The ordered, configured set of allowed label values.
///
/// The taxonomy is advisory: the session stores whatever class string it is
/// given, and enforcement stays at the boundary that offers choices to the
/// operator. Callers that need strict checking use [`Taxonomy::contains`]
/// before issuing the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    classes: Vec<AnnotationClass>,
}

impl Taxonomy {
    /// Build a taxonomy from an ordered class list.
    pub fn new(classes: Vec<AnnotationClass>) -> Self {
        Self { classes }
    }

    /// The ordered class list.
    pub fn classes(&self) -> &[AnnotationClass] {
        &self.classes
    }

    /// Class at `index`, in configured order.
    pub fn get(&self, index: usize) -> Option<&AnnotationClass> {
        self.classes.get(index)
    }

    /// `true` when `value` is one of the configured class values.
    pub fn contains(&self, value: &str) -> bool {
        self.classes.iter().any(|c| c.value == value)
    }

    /// Number of configured classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` when no classes are configured.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for Taxonomy {
    /// Built-in crop-type taxonomy used when no configuration is supplied.
    fn default() -> Self {
        Self::new(vec![
            AnnotationClass::new("rapeseed", "Rapeseed"),
            AnnotationClass::new("wheat", "Wheat"),
            AnnotationClass::new("maize", "Maize"),
            AnnotationClass::new("nocrop", "No Cropland"),
        ])
    }
}

/// Completion counters for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Number of distinct annotated point ids.
    pub completed: usize,
    /// Number of loaded points.
    pub total: usize,
}

impl Progress {
    /// Completion as a percentage in `[0.0, 100.0]`, `0.0` for an empty
    /// session.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }

    /// `true` iff every loaded point is annotated and the session is
    /// non-empty.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ── SamplePoint serde ──────────────────────────────────────────────────

    #[test]
    fn test_sample_point_note_defaults_empty() {
        let json = r#"{"id":"p1","lat":40.7128,"lon":-74.0060}"#;
        let point: SamplePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.id, "p1");
        assert_eq!(point.note, "");
    }

    // ── Annotation serde ───────────────────────────────────────────────────

    #[test]
    fn test_annotation_flattens_point_fields() {
        let annotation = Annotation {
            point: SamplePoint {
                id: "p1".to_string(),
                lat: 34.0522,
                lon: -118.2437,
                note: "LA".to_string(),
            },
            class: "wheat".to_string(),
            annotated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&annotation).unwrap();
        // Point fields sit at the top level, alongside class and timestamp.
        assert_eq!(json["id"], "p1");
        assert_eq!(json["class"], "wheat");
        assert!(json["annotated_at"]
            .as_str()
            .unwrap()
            .starts_with("2024-06-01T12:00:00"));
    }

    // ── Taxonomy ───────────────────────────────────────────────────────────

    #[test]
    fn test_taxonomy_default_classes() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.len(), 4);
        assert_eq!(taxonomy.get(0).unwrap().value, "rapeseed");
        assert_eq!(taxonomy.get(3).unwrap().label, "No Cropland");
    }

    #[test]
    fn test_taxonomy_contains() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.contains("maize"));
        assert!(!taxonomy.contains("barley"));
        assert!(!taxonomy.contains(""));
    }

    #[test]
    fn test_taxonomy_preserves_order() {
        let taxonomy = Taxonomy::new(vec![
            AnnotationClass::new("b", "B"),
            AnnotationClass::new("a", "A"),
        ]);
        let values: Vec<&str> = taxonomy.classes().iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a"]);
    }

    #[test]
    fn test_taxonomy_empty() {
        let taxonomy = Taxonomy::new(vec![]);
        assert!(taxonomy.is_empty());
        assert!(taxonomy.get(0).is_none());
        assert!(!taxonomy.contains("anything"));
    }

    // ── Progress ───────────────────────────────────────────────────────────

    #[test]
    fn test_progress_percent() {
        let progress = Progress {
            completed: 1,
            total: 4,
        };
        assert!((progress.percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_percent_empty_session() {
        let progress = Progress::default();
        assert_eq!(progress.percent(), 0.0);
    }

    #[test]
    fn test_progress_is_complete() {
        assert!(!Progress::default().is_complete());
        assert!(!Progress {
            completed: 2,
            total: 3
        }
        .is_complete());
        assert!(Progress {
            completed: 3,
            total: 3
        }
        .is_complete());
    }
}
