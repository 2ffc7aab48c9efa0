//! Detail-panel ownership shared between chart widgets
//!
//! At most one widget owns the detail panel. Claims always succeed and the
//! most recent one wins; hover only reaches the panel through its owner.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::models::{DataPoint, LocationPoint, ProcessedRecord, WidgetId};
use crate::types::LocationSlot;

/// Opacity applied to series other than the hovered one
pub const DIMMED_OPACITY: f64 = 0.3;

/// Who owns the panel and what it shows. Both are set or both are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelState {
    pub active: Option<WidgetId>,
    pub selected: Option<DataPoint>,
}

/// The only ways the panel state changes
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    Claim { widget: WidgetId, point: DataPoint },
    Release,
}

impl PanelState {
    fn apply(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::Claim { widget, point } => {
                self.active = Some(widget);
                self.selected = Some(point);
            }
            PanelCommand::Release => {
                self.active = None;
                self.selected = None;
            }
        }
    }
}

/// Shared handle to the panel state, cloned into every widget of a page
#[derive(Debug, Clone, Default)]
pub struct PanelCoordinator {
    state: Rc<RefCell<PanelState>>,
}

impl PanelCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, command: PanelCommand) {
        self.state.borrow_mut().apply(command);
    }

    /// Hand the panel to `widget`, replacing any previous owner
    pub fn claim(&self, widget: &WidgetId, point: DataPoint) {
        self.dispatch(PanelCommand::Claim {
            widget: widget.clone(),
            point,
        });
    }

    /// Close the panel; a no-op when already closed
    pub fn release(&self) {
        self.dispatch(PanelCommand::Release);
    }

    pub fn is_owner(&self, widget: &WidgetId) -> bool {
        self.state.borrow().active.as_ref() == Some(widget)
    }

    pub fn owner(&self) -> Option<WidgetId> {
        self.state.borrow().active.clone()
    }

    pub fn selected(&self) -> Option<DataPoint> {
        self.state.borrow().selected.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().active.is_some()
    }

    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }
}

/// How a series is drawn while the pointer is over the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesEmphasis {
    Normal,
    Highlighted,
    Dimmed,
}

impl SeriesEmphasis {
    pub fn opacity(&self) -> f64 {
        match self {
            SeriesEmphasis::Normal | SeriesEmphasis::Highlighted => 1.0,
            SeriesEmphasis::Dimmed => DIMMED_OPACITY,
        }
    }
}

/// One rendered chart, with its own hover state
#[derive(Debug, Clone)]
pub struct ChartWidget {
    id: WidgetId,
    panel: PanelCoordinator,
    hover: Option<DataPoint>,
}

impl ChartWidget {
    pub fn new(panel: PanelCoordinator) -> Self {
        Self::with_id(WidgetId::generate(), panel)
    }

    pub fn with_id(id: WidgetId, panel: PanelCoordinator) -> Self {
        Self {
            id,
            panel,
            hover: None,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.panel.is_owner(&self.id)
    }

    pub fn on_point_click(&mut self, point: DataPoint) {
        self.panel.claim(&self.id, point);
    }

    pub fn on_hover(&mut self, point: DataPoint) {
        self.hover = Some(point);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover = None;
    }

    pub fn hovered(&self) -> Option<&DataPoint> {
        self.hover.as_ref()
    }

    /// What this widget's panel should show: the hovered point if any,
    /// otherwise the claimed one. `None` when another widget owns the panel.
    pub fn panel_point(&self) -> Option<DataPoint> {
        if !self.is_active() {
            return None;
        }
        self.hover.clone().or_else(|| self.panel.selected())
    }

    pub fn emphasis(&self, series: &str) -> SeriesEmphasis {
        match &self.hover {
            None => SeriesEmphasis::Normal,
            Some(point) if point.variety() == series => SeriesEmphasis::Highlighted,
            Some(_) => SeriesEmphasis::Dimmed,
        }
    }

    /// Legend click: the selected variety closes the panel, any other
    /// variety claims it at its first location.
    pub fn toggle_legend(&mut self, record: &ProcessedRecord, series_color: &str) {
        let already_selected = self.is_active()
            && self
                .panel
                .selected()
                .is_some_and(|point| point.variety() == record.variety);

        if already_selected {
            self.panel.release();
        } else {
            let point = LocationPoint::from_record(record, LocationSlot::MezoberenyI, series_color);
            self.panel.claim(&self.id, point.into());
        }
    }

    /// Close the panel if this widget owns it
    pub fn close(&mut self) {
        if self.is_active() {
            self.panel.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationValues;

    fn record(variety: &str, m_i: f64) -> ProcessedRecord {
        let mut locations = LocationValues::default();
        locations.set(LocationSlot::MezoberenyI, m_i);
        ProcessedRecord::new(variety, locations)
    }

    fn point(variety: &str, m_i: f64) -> DataPoint {
        LocationPoint::from_record(&record(variety, m_i), LocationSlot::MezoberenyI, "#d97706").into()
    }

    #[test]
    fn test_last_claim_wins() {
        let panel = PanelCoordinator::new();
        let mut a = ChartWidget::with_id("a".into(), panel.clone());
        let mut b = ChartWidget::with_id("b".into(), panel.clone());

        a.on_point_click(point("N00530", 1.0));
        b.on_point_click(point("H2239", 2.0));

        assert!(!a.is_active());
        assert!(b.is_active());
        assert_eq!(panel.owner(), Some(WidgetId::from("b")));
        assert_eq!(panel.selected().map(|p| p.variety().to_string()), Some("H2239".to_string()));
    }

    #[test]
    fn test_release_is_idempotent() {
        let panel = PanelCoordinator::new();
        panel.release();
        panel.claim(&"a".into(), point("N00530", 1.0));
        panel.release();
        panel.release();
        assert_eq!(panel.snapshot(), PanelState::default());
        assert!(!panel.is_open());
    }

    #[test]
    fn test_hover_surfaces_only_for_owner() {
        let panel = PanelCoordinator::new();
        let mut a = ChartWidget::with_id("a".into(), panel.clone());
        let mut b = ChartWidget::with_id("b".into(), panel.clone());

        b.on_hover(point("H2239", 3.0));
        assert_eq!(b.panel_point(), None);

        a.on_point_click(point("N00530", 1.0));
        b.on_hover(point("H2249", 4.0));
        assert_eq!(b.panel_point(), None);

        a.on_hover(point("N00544", 5.0));
        assert_eq!(a.panel_point().map(|p| p.value()), Some(5.0));

        a.on_pointer_leave();
        assert_eq!(a.panel_point().map(|p| p.variety().to_string()), Some("N00530".to_string()));
    }

    #[test]
    fn test_emphasis_dims_other_series() {
        let mut widget = ChartWidget::new(PanelCoordinator::new());
        assert_eq!(widget.emphasis("N00530"), SeriesEmphasis::Normal);

        widget.on_hover(point("N00530", 1.0));
        assert_eq!(widget.emphasis("N00530"), SeriesEmphasis::Highlighted);
        assert_eq!(widget.emphasis("N00544"), SeriesEmphasis::Dimmed);
        assert_eq!(widget.emphasis("N00544").opacity(), DIMMED_OPACITY);
    }

    #[test]
    fn test_toggle_legend() {
        let panel = PanelCoordinator::new();
        let mut widget = ChartWidget::with_id("a".into(), panel.clone());
        let n00530 = record("N00530", 7.5);

        widget.toggle_legend(&n00530, "#d97706");
        let selected = panel.selected().unwrap();
        assert_eq!(selected.variety(), "N00530");
        assert_eq!(selected.value(), 7.5);

        widget.toggle_legend(&record("N00544", 2.0), "#d97706");
        assert_eq!(panel.selected().unwrap().variety(), "N00544");

        widget.toggle_legend(&record("N00544", 2.0), "#d97706");
        assert!(!panel.is_open());
    }

    #[test]
    fn test_close_only_releases_own_claim() {
        let panel = PanelCoordinator::new();
        let mut a = ChartWidget::with_id("a".into(), panel.clone());
        let mut b = ChartWidget::with_id("b".into(), panel.clone());

        a.on_point_click(point("N00530", 1.0));
        b.close();
        assert!(a.is_active());

        a.close();
        assert!(!panel.is_open());
    }
}
