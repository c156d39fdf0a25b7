use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::{Value, json};

use crate::error::{BoardError, Rejection, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::BoardMetrics;
use crate::model::{Cell, ItemId, Layout, RowId};
use crate::reconcile::{Insertion, Reconciled, ReconcileRules, Reconciler};
use crate::target::{DropTarget, NewRow};

pub mod audit;

use audit::{SessionAudit, SessionAuditEventBuilder, SessionAuditStage};

/// Configuration knobs for a drag controller.
#[derive(Clone)]
pub struct BoardConfig {
    /// Rules handed to the reconciler on every drop and edit.
    pub rules: ReconcileRules,
    /// Optional structured logger used by the controller.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<BoardMetrics>>>,
    /// Optional lifecycle audit sink.
    pub audit: Option<Arc<dyn SessionAudit>>,
    /// Target field used for session log events.
    pub log_target: String,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rules: ReconcileRules::default(),
            logger: None,
            metrics: None,
            audit: None,
            log_target: "room::board.session".to_string(),
            metrics_target: "room::board.metrics".to_string(),
        }
    }
}

impl BoardConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(BoardMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<BoardMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Host callback fired once per committed layout change.
pub trait LayoutListener: Send {
    fn name(&self) -> &str {
        "layout_listener"
    }

    fn on_layout_change(&mut self, layout: &Layout);
}

impl<F> LayoutListener for F
where
    F: FnMut(&Layout) + Send,
{
    fn on_layout_change(&mut self, layout: &Layout) {
        self(layout)
    }
}

/// Inputs a host feeds into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start(ItemId),
    Hover(Option<DropTarget>),
    Drop(Option<DropTarget>),
    Cancel,
}

/// Layout edits applied outside a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Insert { cell: Cell, at: Insertion },
    Remove(ItemId),
    RemoveRow(RowId),
    Resize { item: ItemId, delta: f32 },
    EqualizeRow(RowId),
}

/// Current hover target and whether dropping there would change the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub target: DropTarget,
    pub accepted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Above,
    Below,
}

/// What a host draws while a card hovers over a drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    /// Line above or below a row; dropping there creates a new row.
    Horizontal { row: RowId, edge: Edge },
    /// Gap before the card at `index` in `row`.
    Vertical { row: RowId, index: usize },
    RowHighlight(RowId),
    Card(ItemId),
}

impl Indicator {
    /// `None` when the target names a row the layout does not have.
    pub fn for_target(layout: &Layout, target: &DropTarget) -> Option<Self> {
        let indicator = match target {
            DropTarget::Item(id) => {
                layout.row_of(id)?;
                Indicator::Card(id.clone())
            }
            DropTarget::Row(row) => {
                layout.row(*row)?;
                Indicator::RowHighlight(*row)
            }
            DropTarget::Slot { row, index } => {
                let len = layout.row(*row)?.len();
                Indicator::Vertical {
                    row: *row,
                    index: (*index).min(len),
                }
            }
            DropTarget::NewRow(NewRow::Above(row)) => {
                layout.row(*row)?;
                Indicator::Horizontal {
                    row: *row,
                    edge: Edge::Above,
                }
            }
            DropTarget::NewRow(NewRow::Below(row)) => {
                layout.row(*row)?;
                Indicator::Horizontal {
                    row: *row,
                    edge: Edge::Below,
                }
            }
            DropTarget::NewRow(NewRow::End) => Indicator::Horizontal {
                row: layout.rows().last()?.id(),
                edge: Edge::Below,
            },
        };
        Some(indicator)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active: ItemId,
    pub origin_row: RowId,
    pub hover: Option<Hover>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of a drop or an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Committed,
    Skipped(Rejection),
}

impl DropOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, DropOutcome::Committed)
    }
}

/// Owns the committed layout and runs one drag session at a time.
pub struct DragController {
    layout: Layout,
    state: DragState,
    listeners: Vec<Box<dyn LayoutListener>>,
    config: BoardConfig,
    created_at: Instant,
}

impl DragController {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, BoardConfig::default())
    }

    pub fn with_config(layout: Layout, config: BoardConfig) -> Self {
        Self {
            layout,
            state: DragState::Idle,
            listeners: Vec::new(),
            config,
            created_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BoardConfig {
        &mut self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_layout(self) -> Layout {
        self.layout
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(session) => Some(session.active.as_str()),
            DragState::Idle => None,
        }
    }

    pub fn hovered(&self) -> Option<&Hover> {
        match &self.state {
            DragState::Dragging(session) => session.hover.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Visual indicator for the current hover target, if any.
    pub fn indicator(&self) -> Option<Indicator> {
        let hover = self.hovered()?;
        Indicator::for_target(&self.layout, &hover.target)
    }

    pub fn register_listener<L>(&mut self, listener: L)
    where
        L: LayoutListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.config.rules)
    }

    /// Idle → Dragging.
    pub fn start(&mut self, active: impl Into<ItemId>) -> Result<()> {
        let active = active.into();
        if let DragState::Dragging(session) = &self.state {
            return Err(BoardError::DragInProgress(session.active.clone()));
        }
        let origin_row = self
            .layout
            .row_of(&active)
            .ok_or_else(|| BoardError::ItemNotFound(active.clone()))?;

        self.record_metric(|metrics| metrics.record_drag());
        self.log_session_event(
            LogLevel::Debug,
            "drag_started",
            [json_str("active", active.as_str()), json_kv("row", origin_row)],
        );
        self.audit(
            SessionAuditStage::DragStarted,
            [json_str("active", active.as_str()), json_kv("row", origin_row)],
        );

        self.state = DragState::Dragging(DragSession {
            active,
            origin_row,
            hover: None,
        });
        Ok(())
    }

    /// Record the hovered target. Returns whether the hover changed.
    pub fn hover(&mut self, target: Option<DropTarget>) -> Result<bool> {
        let reconciler = self.reconciler();
        let session = match &mut self.state {
            DragState::Dragging(session) => session,
            DragState::Idle => return Err(BoardError::NotDragging),
        };

        if session.hover.as_ref().map(|hover| &hover.target) == target.as_ref() {
            return Ok(false);
        }

        session.hover = target.map(|target| {
            let accepted = reconciler
                .apply_drop(&self.layout, &session.active, &target)
                .is_ok();
            Hover { target, accepted }
        });

        let described = describe_hover(session.hover.as_ref());
        self.record_metric(|metrics| metrics.record_hover());
        self.log_session_event(LogLevel::Trace, "hover_changed", described.clone());
        self.audit(SessionAuditStage::HoverChanged, described);
        Ok(true)
    }

    /// Dragging → Idle, applying the drop.
    pub fn end(&mut self, target: Option<DropTarget>) -> Result<DropOutcome> {
        let session = match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => session,
            DragState::Idle => return Err(BoardError::NotDragging),
        };

        let Some(target) = target else {
            self.skip_drop(&session.active, None, Rejection::NoTarget);
            return Ok(DropOutcome::Skipped(Rejection::NoTarget));
        };

        let result = self
            .reconciler()
            .apply_drop(&self.layout, &session.active, &target);
        match result {
            Ok(next) => {
                let (created, pruned) = row_churn(&self.layout, &next);
                self.layout = next;
                self.record_metric(|metrics| metrics.record_commit(created, pruned));
                let fields = [
                    json_str("active", session.active.as_str()),
                    json_str("target", target.to_string()),
                    json_kv("rows_created", created),
                    json_kv("rows_pruned", pruned),
                ];
                self.log_session_event(LogLevel::Info, "drop_committed", fields.clone());
                self.audit(SessionAuditStage::DropCommitted, fields);
                self.notify_listeners();
                Ok(DropOutcome::Committed)
            }
            Err(rejection) => {
                self.skip_drop(&session.active, Some(&target), rejection.clone());
                Ok(DropOutcome::Skipped(rejection))
            }
        }
    }

    /// Dragging → Idle without touching the layout. Returns whether a
    /// session was discarded.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                self.record_metric(|metrics| metrics.record_cancel());
                let fields = [json_str("active", session.active.as_str())];
                self.log_session_event(LogLevel::Debug, "drag_cancelled", fields.clone());
                self.audit(SessionAuditStage::DragCancelled, fields);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Apply an edit. Edits are refused while a drag is in progress.
    pub fn edit(&mut self, edit: Edit) -> Result<DropOutcome> {
        if let DragState::Dragging(session) = &self.state {
            return Err(BoardError::DragInProgress(session.active.clone()));
        }

        let reconciler = self.reconciler();
        let (label, result): (&str, Reconciled) = match &edit {
            Edit::Insert { cell, at } => {
                ("insert", reconciler.insert_cell(&self.layout, cell.clone(), *at))
            }
            Edit::Remove(item) => ("remove", reconciler.remove_item(&self.layout, item)),
            Edit::RemoveRow(row) => ("remove_row", reconciler.remove_row(&self.layout, *row)),
            Edit::Resize { item, delta } => {
                ("resize", reconciler.resize_item(&self.layout, item, *delta))
            }
            Edit::EqualizeRow(row) => ("equalize_row", reconciler.equalize_row(&self.layout, *row)),
        };

        match result {
            Ok(next) => {
                let (created, pruned) = row_churn(&self.layout, &next);
                self.layout = next;
                self.record_metric(|metrics| metrics.record_edit(created, pruned));
                let fields = [
                    json_str("edit", label),
                    json_kv("rows_created", created),
                    json_kv("rows_pruned", pruned),
                ];
                self.log_session_event(LogLevel::Info, "edit_committed", fields.clone());
                self.audit(SessionAuditStage::EditCommitted, fields);
                self.notify_listeners();
                Ok(DropOutcome::Committed)
            }
            Err(rejection) => {
                self.log_session_event(
                    LogLevel::Debug,
                    "edit_skipped",
                    [json_str("edit", label), json_str("reason", rejection.kind())],
                );
                Ok(DropOutcome::Skipped(rejection))
            }
        }
    }

    /// Feed one host event. Hover and cancel produce no outcome.
    pub fn dispatch(&mut self, event: DragEvent) -> Result<Option<DropOutcome>> {
        match event {
            DragEvent::Start(active) => self.start(active).map(|_| None),
            DragEvent::Hover(target) => self.hover(target).map(|_| None),
            DragEvent::Drop(target) => self.end(target).map(Some),
            DragEvent::Cancel => {
                self.cancel();
                Ok(None)
            }
        }
    }

    /// Replay a scripted event sequence. Returns the number of committed drops.
    pub fn run_scripted<I>(&mut self, events: I) -> Result<usize>
    where
        I: IntoIterator<Item = DragEvent>,
    {
        let mut committed = 0;
        for event in events {
            if let Some(DropOutcome::Committed) = self.dispatch(event)? {
                committed += 1;
            }
        }
        self.emit_metrics();
        Ok(committed)
    }

    /// Log a metrics snapshot if both a logger and metrics are configured.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard
                    .snapshot(self.created_at.elapsed())
                    .to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    fn skip_drop(&mut self, active: &str, target: Option<&DropTarget>, rejection: Rejection) {
        self.record_metric(|metrics| metrics.record_skip());
        let target = target.map(ToString::to_string).unwrap_or_default();
        let fields = [
            json_str("active", active),
            json_str("target", target),
            json_str("reason", rejection.kind()),
        ];
        self.log_session_event(LogLevel::Debug, "drop_skipped", fields.clone());
        self.audit(SessionAuditStage::DropSkipped, fields);
    }

    fn notify_listeners(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener.on_layout_change(&self.layout);
        }
        let count = self.listeners.len();
        self.audit(
            SessionAuditStage::ListenersNotified,
            [json_kv("listeners", count)],
        );
    }

    fn record_metric(&self, record: impl FnOnce(&mut BoardMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn log_session_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            if logger.enabled(level) {
                let event = event_with_fields(level, &self.config.log_target, message, fields);
                let _ = logger.log_event(event);
            }
        }
    }

    fn audit<I>(&self, stage: SessionAuditStage, details: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(audit) = self.config.audit.as_ref() {
            let mut builder = SessionAuditEventBuilder::new(stage);
            for (key, value) in details {
                builder.detail(key, value);
            }
            audit.record(builder.finish());
        }
    }
}

fn describe_hover(hover: Option<&Hover>) -> Vec<(String, Value)> {
    match hover {
        Some(hover) => vec![
            json_str("target", hover.target.to_string()),
            json_kv("accepted", hover.accepted),
        ],
        None => vec![json_kv("target", json!(null))],
    }
}

/// Rows that appear in `after` but not `before`, and the reverse.
fn row_churn(before: &Layout, after: &Layout) -> (usize, usize) {
    let old: HashSet<RowId> = before.row_ids().into_iter().collect();
    let new: HashSet<RowId> = after.row_ids().into_iter().collect();
    (new.difference(&old).count(), old.difference(&new).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::model::Row;
    use audit::BufferedAudit;

    fn layout() -> Layout {
        Layout::from_rows([Row::of(0, ["a", "b", "c"]), Row::of(1, ["d"])]).unwrap()
    }

    fn counting_controller() -> (DragController, Arc<Mutex<Vec<Layout>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut controller = DragController::new(layout());
        let sink = Arc::clone(&seen);
        controller.register_listener(move |layout: &Layout| {
            sink.lock().unwrap().push(layout.clone());
        });
        (controller, seen)
    }

    #[test]
    fn drop_commits_and_notifies_once() {
        let (mut controller, seen) = counting_controller();
        controller.start("a").unwrap();
        assert_eq!(controller.active(), Some("a"));

        let outcome = controller.end(Some(DropTarget::Row(1))).unwrap();
        assert_eq!(outcome, DropOutcome::Committed);
        assert!(!controller.is_dragging());
        assert_eq!(controller.layout().row_of("a"), Some(1));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(&seen[0], controller.layout());
    }

    #[test]
    fn noop_drops_do_not_notify() {
        let (mut controller, seen) = counting_controller();
        let before = controller.layout().clone();

        controller.start("a").unwrap();
        let outcome = controller.end(Some(DropTarget::item("a"))).unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(Rejection::SelfTarget));

        controller.start("d").unwrap();
        let outcome = controller.end(None).unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(Rejection::NoTarget));

        controller.start("d").unwrap();
        let outcome = controller
            .end(Some(DropTarget::NewRow(NewRow::Below(1))))
            .unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(Rejection::Unchanged));

        assert_eq!(controller.layout(), &before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn rebalanced_noop_drops_do_not_notify() {
        let seen = Arc::new(Mutex::new(0usize));
        let mut config = BoardConfig::default();
        config.rules = ReconcileRules::default().rebalance_widths(true);
        let mut controller = DragController::with_config(layout(), config);
        let counter = Arc::clone(&seen);
        controller.register_listener(move |_: &Layout| {
            *counter.lock().unwrap() += 1;
        });
        let before = controller.layout().clone();

        controller.start("d").unwrap();
        let outcome = controller
            .end(Some(DropTarget::NewRow(NewRow::Above(1))))
            .unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(Rejection::Unchanged));
        assert_eq!(controller.layout(), &before);
        assert_eq!(*seen.lock().unwrap(), 0);

        controller.start("d").unwrap();
        assert!(controller.end(Some(DropTarget::Row(0))).unwrap().is_committed());
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn sessions_are_sequential() {
        let mut controller = DragController::new(layout());
        controller.start("a").unwrap();
        assert!(matches!(
            controller.start("b"),
            Err(BoardError::DragInProgress(active)) if active == "a"
        ));
        assert!(matches!(
            controller.edit(Edit::Remove("b".to_string())),
            Err(BoardError::DragInProgress(_))
        ));
        assert!(controller.cancel());
        assert!(!controller.cancel());
        assert!(matches!(controller.end(None), Err(BoardError::NotDragging)));
        assert!(matches!(controller.hover(None), Err(BoardError::NotDragging)));
        assert!(matches!(
            controller.start("zz"),
            Err(BoardError::ItemNotFound(id)) if id == "zz"
        ));
    }

    #[test]
    fn hover_tracks_indicator_without_committing() {
        let mut config = BoardConfig::default();
        config.rules = ReconcileRules::default().with_max_items_per_row(3);
        let mut controller = DragController::with_config(layout(), config);
        let before = controller.layout().clone();

        controller.start("d").unwrap();
        assert!(controller
            .hover(Some(DropTarget::Slot { row: 0, index: 1 }))
            .unwrap());
        assert_eq!(
            controller.hovered(),
            Some(&Hover {
                target: DropTarget::Slot { row: 0, index: 1 },
                accepted: false,
            })
        );
        assert_eq!(
            controller.indicator(),
            Some(Indicator::Vertical { row: 0, index: 1 })
        );
        assert!(!controller
            .hover(Some(DropTarget::Slot { row: 0, index: 1 }))
            .unwrap());

        controller
            .hover(Some(DropTarget::NewRow(NewRow::Above(0))))
            .unwrap();
        assert!(controller.hovered().unwrap().accepted);
        assert_eq!(
            controller.indicator(),
            Some(Indicator::Horizontal {
                row: 0,
                edge: Edge::Above,
            })
        );
        assert_eq!(controller.layout(), &before);

        assert!(controller.cancel());
        assert_eq!(controller.indicator(), None);
        assert_eq!(controller.layout(), &before);
    }

    #[test]
    fn indicators_follow_targets() {
        let layout = layout();
        assert_eq!(
            Indicator::for_target(&layout, &DropTarget::NewRow(NewRow::End)),
            Some(Indicator::Horizontal {
                row: 1,
                edge: Edge::Below,
            })
        );
        assert_eq!(
            Indicator::for_target(&layout, &DropTarget::Slot { row: 1, index: 7 }),
            Some(Indicator::Vertical { row: 1, index: 1 })
        );
        assert_eq!(
            Indicator::for_target(&layout, &DropTarget::item("b")),
            Some(Indicator::Card("b".to_string()))
        );
        assert_eq!(Indicator::for_target(&layout, &DropTarget::Row(5)), None);
        assert_eq!(Indicator::for_target(&layout, &DropTarget::item("zz")), None);
    }

    #[test]
    fn scripted_session_logs_and_audits() {
        let sink = Arc::new(MemorySink::new());
        let audit = Arc::new(BufferedAudit::new());
        let mut config = BoardConfig::default();
        config.logger = Some(Logger::from_arc(sink.clone()).with_min_level(LogLevel::Debug));
        config.audit = Some(audit.clone());
        config.enable_metrics();
        let metrics = config.metrics_handle().unwrap();

        let mut controller = DragController::with_config(layout(), config);
        let committed = controller
            .run_scripted([
                DragEvent::Start("c".to_string()),
                DragEvent::Hover(Some(DropTarget::item("a"))),
                DragEvent::Drop(Some(DropTarget::item("a"))),
                DragEvent::Start("d".to_string()),
                DragEvent::Cancel,
                DragEvent::Start("b".to_string()),
                DragEvent::Drop(Some(DropTarget::NewRow(NewRow::End))),
            ])
            .unwrap();
        assert_eq!(committed, 2);
        assert_eq!(
            controller.layout().arrangement(),
            vec![
                vec!["c".to_string(), "a".to_string()],
                vec!["d".to_string()],
                vec!["b".to_string()],
            ]
        );

        let messages = sink.messages();
        assert_eq!(
            messages,
            vec![
                "drag_started",
                "drop_committed",
                "drag_started",
                "drag_cancelled",
                "drag_started",
                "drop_committed",
                "board_metrics",
            ]
        );

        assert_eq!(
            audit.stages(),
            vec![
                SessionAuditStage::DragStarted,
                SessionAuditStage::HoverChanged,
                SessionAuditStage::DropCommitted,
                SessionAuditStage::ListenersNotified,
                SessionAuditStage::DragStarted,
                SessionAuditStage::DragCancelled,
                SessionAuditStage::DragStarted,
                SessionAuditStage::DropCommitted,
                SessionAuditStage::ListenersNotified,
            ]
        );

        let snapshot = metrics
            .lock()
            .unwrap()
            .snapshot(std::time::Duration::from_millis(0));
        assert_eq!(snapshot.drags, 3);
        assert_eq!(snapshot.commits, 2);
        assert_eq!(snapshot.cancels, 1);
        assert_eq!(snapshot.rows_created, 1);
    }

    #[test]
    fn edits_commit_through_listeners() {
        let (mut controller, seen) = counting_controller();
        let outcome = controller
            .edit(Edit::Insert {
                cell: Cell::new("e"),
                at: Insertion::EndOfRow(1),
            })
            .unwrap();
        assert!(outcome.is_committed());

        let outcome = controller.edit(Edit::RemoveRow(9)).unwrap();
        assert_eq!(outcome, DropOutcome::Skipped(Rejection::RowNotFound(9)));

        controller.edit(Edit::Remove("d".to_string())).unwrap();
        controller.edit(Edit::Remove("e".to_string())).unwrap();
        assert_eq!(controller.layout().row_ids(), vec![0]);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
