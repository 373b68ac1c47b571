//! Single-writer session coordinator.
//!
//! Owns the [`AnnotationSession`] and the [`ImageryCatalog`] inside one tokio
//! task. Commands arrive on an `mpsc` channel and run to completion one at a
//! time, so a second ingestion queues behind an in-flight one instead of
//! racing it. After every command the coordinator publishes a fresh
//! [`SessionSnapshot`] through a `watch` channel; observers only ever see a
//! complete state, never a torn one.

use std::path::PathBuf;

use label_core::imagery::ImageryCatalog;
use label_core::models::{Annotation, Progress, SamplePoint};
use label_core::session::AnnotationSession;
use label_data::ingest;
use tokio::sync::{mpsc, watch};

// ── Public types ──────────────────────────────────────────────────────────────

/// A command issued against the annotation session.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Ingest a point file, replacing the session on success.
    LoadFile(PathBuf),
    /// Replace the session with an already-parsed point list.
    LoadPoints(Vec<SamplePoint>),
    /// Label the point at `index`.
    Annotate { index: usize, class: String },
    /// Label the point under the cursor.
    AnnotateCurrent { class: String },
    /// Advance the cursor without labeling.
    Skip,
    /// Step the cursor back by one.
    GoBack,
    /// Select the imagery layer at `index`.
    SelectImagery(usize),
    /// Advance to the next imagery layer, wrapping at the end.
    CycleImagery,
}

/// Immutable view of the session published after each command.
///
/// This is the primary data contract between the coordinator and the
/// presentation layer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The point under the cursor, or `None` when nothing is loaded.
    pub current_point: Option<SamplePoint>,
    /// The existing annotation for the current point, if it was labeled
    /// before (e.g. when revisiting).
    pub current_annotation: Option<Annotation>,
    /// Cursor index into the point list.
    pub cursor: usize,
    /// Completion counters.
    pub progress: Progress,
    /// `true` iff every loaded point is annotated.
    pub all_annotated: bool,
    /// `true` while an ingestion is in flight.
    pub loading: bool,
    /// Index of the selected imagery layer.
    pub imagery_index: usize,
    /// Display name of the selected imagery layer.
    pub imagery_name: Option<String>,
    /// The file the current point set was loaded from, if any.
    pub source: Option<PathBuf>,
    /// Human-readable description of the last structural ingestion failure.
    pub load_error: Option<String>,
}

// ── SessionCoordinator ────────────────────────────────────────────────────────

/// Background coordinator owning all mutable workflow state.
///
/// Call [`SessionCoordinator::start`] to spin up the command loop in a
/// dedicated tokio task and receive the command handle plus the snapshot
/// channel.
pub struct SessionCoordinator {
    session: AnnotationSession,
    imagery: ImageryCatalog,
    source: Option<PathBuf>,
    loading: bool,
    load_error: Option<String>,
}

impl SessionCoordinator {
    /// Create a coordinator with an empty session and the given imagery
    /// catalog.
    pub fn new(imagery: ImageryCatalog) -> Self {
        Self {
            session: AnnotationSession::new(),
            imagery,
            source: None,
            loading: false,
            load_error: None,
        }
    }

    /// Start the command loop.
    ///
    /// Returns:
    /// - A [`SessionHandle`] for queueing [`SessionCommand`]s and aborting.
    /// - A `watch::Receiver<SessionSnapshot>` holding the latest state.
    pub fn start(self) -> (SessionHandle, watch::Receiver<SessionSnapshot>) {
        // Small buffer: commands are operator keystrokes, not bulk traffic.
        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        let (snap_tx, snap_rx) = watch::channel(self.snapshot());

        let handle = tokio::spawn(async move {
            self.command_loop(cmd_rx, snap_tx).await;
        });

        (
            SessionHandle {
                tx: cmd_tx,
                handle,
            },
            snap_rx,
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main command loop. Exits when every command sender is dropped.
    async fn command_loop(
        mut self,
        mut rx: mpsc::Receiver<SessionCommand>,
        tx: watch::Sender<SessionSnapshot>,
    ) {
        while let Some(command) = rx.recv().await {
            self.apply(command, &tx).await;
            let _ = tx.send(self.snapshot());
        }
        tracing::debug!("command channel closed; coordinator exiting");
    }

    /// Execute one command against the owned state.
    ///
    /// Every branch is total: out-of-range input degrades to a no-op inside
    /// the session, and ingestion failure leaves the loaded point set
    /// untouched. Nothing here is fatal.
    async fn apply(&mut self, command: SessionCommand, tx: &watch::Sender<SessionSnapshot>) {
        match command {
            SessionCommand::LoadFile(path) => {
                // Publish the in-flight state before parsing so observers can
                // show a loading indicator.
                self.loading = true;
                self.load_error = None;
                let _ = tx.send(self.snapshot());

                let parse = tokio::task::spawn_blocking({
                    let path = path.clone();
                    move || ingest::load_points_file(&path)
                })
                .await;

                self.loading = false;
                match parse {
                    Ok(Ok(points)) => {
                        tracing::info!(
                            count = points.len(),
                            file = %path.display(),
                            "point set loaded"
                        );
                        self.session.load(points);
                        self.source = Some(path);
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(error = %e, file = %path.display(), "ingestion failed");
                        self.load_error = Some(e.to_string());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ingestion task did not complete");
                        self.load_error = Some(e.to_string());
                    }
                }
            }
            SessionCommand::LoadPoints(points) => {
                self.session.load(points);
                self.source = None;
                self.load_error = None;
            }
            SessionCommand::Annotate { index, class } => self.session.annotate(index, &class),
            SessionCommand::AnnotateCurrent { class } => self.session.annotate_current(&class),
            SessionCommand::Skip => self.session.skip(),
            SessionCommand::GoBack => self.session.go_back(),
            SessionCommand::SelectImagery(index) => self.imagery.select(index),
            SessionCommand::CycleImagery => self.imagery.cycle(),
        }
    }

    /// Build a consistent snapshot of the current state.
    fn snapshot(&self) -> SessionSnapshot {
        let current_point = self.session.current_point().cloned();
        let current_annotation = current_point
            .as_ref()
            .and_then(|p| self.session.annotation_for(&p.id))
            .cloned();

        SessionSnapshot {
            current_point,
            current_annotation,
            cursor: self.session.cursor(),
            progress: self.session.progress(),
            all_annotated: self.session.all_annotated(),
            loading: self.loading,
            imagery_index: self.imagery.current_index(),
            imagery_name: self.imagery.current().map(|l| l.name.clone()),
            source: self.source.clone(),
            load_error: self.load_error.clone(),
        }
    }
}

// ── SessionHandle ─────────────────────────────────────────────────────────────

/// A handle to the coordinator task.
///
/// Drop all clones of the command sender (or call [`SessionHandle::abort`])
/// to stop the loop.
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
    handle: tokio::task::JoinHandle<()>,
}

impl SessionHandle {
    /// Queue a command for the coordinator.
    ///
    /// Returns `false` when the coordinator has already shut down.
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).await.is_ok()
    }

    /// Immediately abort the command loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
