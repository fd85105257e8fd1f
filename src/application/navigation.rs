// Navigation actions - Turn resolved targets and filters into modals and menus
use crate::application::actionability::find_all_matching_targets;
use crate::application::error::NavigationError;
use crate::application::filter_pipeline::{
    build_navigation_filters, build_navigation_filters_for_points, NavigationContext,
};
use crate::application::presenter::{NavigationPresenter, PresentationHandle, Translator};
use crate::domain::data_point::WidgetPoint;
use crate::domain::filter::Filter;
use crate::domain::jtd::{JtdConfig, JtdDestination, JtdTarget, JtdTargetInner, MeasurementUnit, NavigateType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MENU_TITLE_KEY: &str = "jumpToDashboard.menuTitle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMergeStrategy {
    /// Passed filters are merged into the destination's own filters
    MergeWithTarget,
    /// Passed filters replace the destination's own filters
    ReplaceTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpContent {
    pub destination: JtdDestination,
    pub filters: Vec<Filter>,
    pub merge_strategy: FilterMergeStrategy,
    pub display_toolbar_row: bool,
    pub display_filter_pane: bool,
}

/// Descriptor for the host's "open modal" capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpAction {
    pub title: String,
    pub size: ModalSize,
    pub measurement_unit: MeasurementUnit,
    pub resizable: bool,
    pub content: JumpContent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub caption: String,
    pub action: JumpAction,
}

/// Descriptor for the host's "open menu" capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuDescriptor {
    pub title: String,
    pub position: ClickPosition,
    pub items: Vec<MenuItem>,
}

pub fn build_jump_action(target: &JtdTarget, filters: Vec<Filter>, config: &JtdConfig) -> JumpAction {
    let merge_strategy = if config.merge_target_dashboard_filters {
        FilterMergeStrategy::MergeWithTarget
    } else {
        FilterMergeStrategy::ReplaceTarget
    };

    JumpAction {
        title: config
            .modal
            .title
            .clone()
            .unwrap_or_else(|| target.caption.clone()),
        size: ModalSize {
            width: config.modal.width,
            height: config.modal.height,
        },
        measurement_unit: config.modal.measurement,
        resizable: config.modal.resize,
        content: JumpContent {
            destination: target.destination.clone(),
            filters,
            merge_strategy,
            display_toolbar_row: config.display_toolbar_row,
            display_filter_pane: config.display_filter_pane,
        },
    }
}

/// One menu item per target, each carrying its own single-target action
pub fn build_jump_menu(
    targets: &[&JtdTargetInner],
    filters: &[Filter],
    config: &JtdConfig,
    position: ClickPosition,
    title: String,
) -> MenuDescriptor {
    let items = targets
        .iter()
        .map(|t| MenuItem {
            caption: t.caption().to_string(),
            action: build_jump_action(&t.target, filters.to_vec(), config),
        })
        .collect();

    MenuDescriptor {
        title,
        position,
        items,
    }
}

/// Reported to the optional listener whenever a destination is opened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationEvent {
    pub caption: String,
    pub destination: JtdDestination,
    pub filter_count: usize,
    pub at: DateTime<Utc>,
}

pub type NavigationListener = Arc<dyn Fn(&NavigationEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "handle", rename_all = "snake_case")]
pub enum ClickOutcome {
    Ignored,
    Navigated(PresentationHandle),
    MenuOpened(PresentationHandle),
}

/// Click handling for one widget's jump-to-dashboard configuration
#[derive(Clone)]
pub struct JumpController {
    config: JtdConfig,
    presenter: Arc<dyn NavigationPresenter>,
    translator: Arc<dyn Translator>,
    listener: Option<NavigationListener>,
}

impl JumpController {
    pub fn new(
        config: JtdConfig,
        presenter: Arc<dyn NavigationPresenter>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            config,
            presenter,
            translator,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: NavigationListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn config(&self) -> &JtdConfig {
        &self.config
    }

    pub fn handle_click(
        &self,
        point: &WidgetPoint,
        context: &NavigationContext,
        position: ClickPosition,
    ) -> Result<ClickOutcome, NavigationError> {
        self.handle_interaction(Some(NavigateType::Click), std::slice::from_ref(point), context, position)
    }

    pub fn handle_right_click(
        &self,
        point: &WidgetPoint,
        context: &NavigationContext,
        position: ClickPosition,
    ) -> Result<ClickOutcome, NavigationError> {
        self.handle_interaction(
            Some(NavigateType::RightClick),
            std::slice::from_ref(point),
            context,
            position,
        )
    }

    /// Lasso/marquee selection; navigates regardless of the configured gesture
    pub fn handle_multi_select(
        &self,
        points: &[WidgetPoint],
        context: &NavigationContext,
        position: ClickPosition,
    ) -> Result<ClickOutcome, NavigationError> {
        self.handle_interaction(None, points, context, position)
    }

    /// Open the destination of an item of a menu built by this controller
    pub fn select_menu_item(
        &self,
        menu: &MenuDescriptor,
        index: usize,
    ) -> Result<PresentationHandle, NavigationError> {
        let item = menu
            .items
            .get(index)
            .ok_or(NavigationError::UnknownMenuItem(index))?;
        Ok(self.open(&item.caption, item.action.clone()))
    }

    fn handle_interaction(
        &self,
        gesture: Option<NavigateType>,
        points: &[WidgetPoint],
        context: &NavigationContext,
        position: ClickPosition,
    ) -> Result<ClickOutcome, NavigationError> {
        if !self.config.enabled || points.is_empty() {
            return Ok(ClickOutcome::Ignored);
        }
        if gesture.is_some_and(|g| g != self.config.navigate_type) {
            return Ok(ClickOutcome::Ignored);
        }
        if self.config.jump_targets.is_empty() {
            tracing::warn!("Jump to dashboard triggered without configured targets");
            return Err(NavigationError::NoJumpTargetsConfigured);
        }

        let targets = self.targets_matching_all(points);
        if targets.is_empty() {
            return Ok(ClickOutcome::Ignored);
        }

        let filters = match points {
            [point] => build_navigation_filters(&self.config, context, point),
            _ => build_navigation_filters_for_points(&self.config, context, points),
        };

        let menu_gesture = gesture == Some(NavigateType::RightClick);
        if targets.len() == 1 && !menu_gesture {
            let target = targets[0];
            let action = build_jump_action(&target.target, filters, &self.config);
            return Ok(ClickOutcome::Navigated(self.open(target.caption(), action)));
        }

        let menu = build_jump_menu(
            &targets,
            &filters,
            &self.config,
            position,
            self.translator.translate(MENU_TITLE_KEY),
        );
        tracing::debug!("Opening jump menu with {} targets", menu.items.len());
        Ok(ClickOutcome::MenuOpened(self.presenter.open_menu(menu)))
    }

    /// Targets applying to every selected point, in configuration order
    fn targets_matching_all(&self, points: &[WidgetPoint]) -> Vec<&JtdTargetInner> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };

        let mut targets = find_all_matching_targets(&self.config, first);
        for point in rest {
            let matching = find_all_matching_targets(&self.config, point);
            targets.retain(|t| matching.iter().any(|m| std::ptr::eq(*m, *t)));
        }
        targets
    }

    fn open(&self, caption: &str, action: JumpAction) -> PresentationHandle {
        tracing::info!(
            "Jumping to {} with {} filters",
            caption,
            action.content.filters.len()
        );

        if let Some(listener) = &self.listener {
            listener(&NavigationEvent {
                caption: caption.to_string(),
                destination: action.content.destination.clone(),
                filter_count: action.content.filters.len(),
                at: Utc::now(),
            });
        }

        self.presenter.open_modal(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attribute::Attribute;
    use crate::domain::data_point::{
        ChartDataPointEntries, DataPoint, DataPointEntry, PivotDataPointEntry, PivotTableDataPoint,
        PivotTableEntries,
    };
    use crate::domain::dimension::PivotArea;
    use crate::domain::jtd::InlineDashboard;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Presented {
        Modal(JumpAction),
        Menu(MenuDescriptor),
    }

    #[derive(Default)]
    struct RecordingPresenter {
        presented: Mutex<Vec<Presented>>,
    }

    impl RecordingPresenter {
        fn take(&self) -> Vec<Presented> {
            std::mem::take(&mut *self.presented.lock().unwrap())
        }

        fn record(&self, presented: Presented) -> PresentationHandle {
            let mut all = self.presented.lock().unwrap();
            all.push(presented);
            PresentationHandle(all.len() as u64)
        }
    }

    impl NavigationPresenter for RecordingPresenter {
        fn open_modal(&self, action: JumpAction) -> PresentationHandle {
            self.record(Presented::Modal(action))
        }

        fn open_menu(&self, menu: MenuDescriptor) -> PresentationHandle {
            self.record(Presented::Menu(menu))
        }
    }

    struct KeyTranslator;

    impl Translator for KeyTranslator {
        fn translate(&self, key: &str) -> String {
            format!("t({})", key)
        }
    }

    fn division() -> Attribute {
        Attribute::new("[Admissions.Division]", "Division")
    }

    fn chart_point(member: &str) -> WidgetPoint {
        WidgetPoint::Chart(DataPoint::new(ChartDataPointEntries {
            category: vec![DataPointEntry::category(division(), member)],
            ..Default::default()
        }))
    }

    fn controller(config: JtdConfig) -> (JumpController, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::default());
        let controller = JumpController::new(config, presenter.clone(), Arc::new(KeyTranslator));
        (controller, presenter)
    }

    fn click_config(targets: Vec<JtdTargetInner>) -> JtdConfig {
        JtdConfig {
            navigate_type: NavigateType::Click,
            ..JtdConfig::with_targets(targets)
        }
    }

    #[test]
    fn test_build_jump_action_uses_modal_settings() {
        let mut config = JtdConfig::default();
        config.modal.width = Some(80);
        config.modal.height = Some(60);
        config.modal.measurement = MeasurementUnit::Percent;
        config.merge_target_dashboard_filters = true;

        let target = JtdTarget::dashboard("d1", "Details");
        let filters = vec![Filter::members(division(), vec!["Cardiology".to_string()])];
        let action = build_jump_action(&target, filters.clone(), &config);

        assert_eq!(action.title, "Details");
        assert_eq!(action.size, ModalSize { width: Some(80), height: Some(60) });
        assert_eq!(action.measurement_unit, MeasurementUnit::Percent);
        assert_eq!(action.content.filters, filters);
        assert_eq!(action.content.merge_strategy, FilterMergeStrategy::MergeWithTarget);
        assert_eq!(
            action.content.destination,
            JtdDestination::DashboardId { id: "d1".to_string() }
        );

        config.modal.title = Some("Drill".to_string());
        config.merge_target_dashboard_filters = false;
        let action = build_jump_action(&target, Vec::new(), &config);
        assert_eq!(action.title, "Drill");
        assert_eq!(action.content.merge_strategy, FilterMergeStrategy::ReplaceTarget);
    }

    #[test]
    fn test_single_target_click_navigates_directly() {
        let (controller, presenter) = controller(click_config(vec![JtdTargetInner::new(
            JtdTarget::dashboard("d1", "Details"),
        )]));

        let outcome = controller
            .handle_click(&chart_point("Cardiology"), &NavigationContext::default(), ClickPosition::default())
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Navigated(PresentationHandle(1)));
        let presented = presenter.take();
        let [Presented::Modal(action)] = presented.as_slice() else {
            panic!("expected one modal, got {:?}", presented);
        };
        assert_eq!(
            action.content.filters,
            vec![Filter::members(division(), vec!["Cardiology".to_string()])]
        );
    }

    #[test]
    fn test_multiple_targets_open_a_menu_at_click_position() {
        let (controller, presenter) = controller(click_config(vec![
            JtdTargetInner::new(JtdTarget::dashboard("d1", "Details")),
            JtdTargetInner::new(JtdTarget::inline(
                InlineDashboard {
                    title: "Ad hoc".to_string(),
                    widget_oids: Vec::new(),
                    filters: Vec::new(),
                },
                "Ad hoc",
            )),
        ]));
        let position = ClickPosition { x: 10.0, y: 20.0 };

        let outcome = controller
            .handle_click(&chart_point("Cardiology"), &NavigationContext::default(), position)
            .unwrap();
        assert_eq!(outcome, ClickOutcome::MenuOpened(PresentationHandle(1)));

        let presented = presenter.take();
        let [Presented::Menu(menu)] = presented.as_slice() else {
            panic!("expected one menu, got {:?}", presented);
        };
        assert_eq!(menu.title, "t(jumpToDashboard.menuTitle)");
        assert_eq!(menu.position, position);
        let captions: Vec<&str> = menu.items.iter().map(|i| i.caption.as_str()).collect();
        assert_eq!(captions, vec!["Details", "Ad hoc"]);

        let handle = controller.select_menu_item(menu, 1).unwrap();
        assert_eq!(handle, PresentationHandle(1));
        let presented = presenter.take();
        let [Presented::Modal(action)] = presented.as_slice() else {
            panic!("expected the selected item to open a modal");
        };
        assert_eq!(action.title, "Ad hoc");
        assert!(matches!(
            controller.select_menu_item(menu, 5),
            Err(NavigationError::UnknownMenuItem(5))
        ));
    }

    #[test]
    fn test_right_click_always_opens_menu() {
        let (controller, presenter) = controller(JtdConfig::with_targets(vec![JtdTargetInner::new(
            JtdTarget::dashboard("d1", "Details"),
        )]));

        let ignored = controller
            .handle_click(&chart_point("Cardiology"), &NavigationContext::default(), ClickPosition::default())
            .unwrap();
        assert_eq!(ignored, ClickOutcome::Ignored);

        let outcome = controller
            .handle_right_click(&chart_point("Cardiology"), &NavigationContext::default(), ClickPosition::default())
            .unwrap();
        assert!(matches!(outcome, ClickOutcome::MenuOpened(_)));
        assert!(matches!(presenter.take().as_slice(), [Presented::Menu(m)] if m.items.len() == 1));
    }

    #[test]
    fn test_click_without_targets_raises_configuration_error() {
        let (controller, presenter) = controller(click_config(Vec::new()));

        let result = controller.handle_click(
            &chart_point("Cardiology"),
            &NavigationContext::default(),
            ClickPosition::default(),
        );

        let err = result.unwrap_err();
        assert_eq!(err, NavigationError::NoJumpTargetsConfigured);
        assert_eq!(err.translate(&KeyTranslator), "t(jumpToDashboard.errors.noTargets)");
        assert!(presenter.take().is_empty());
    }

    #[test]
    fn test_disabled_or_unmatched_clicks_are_silent() {
        let mut config = click_config(vec![JtdTargetInner::scoped(
            JtdTarget::dashboard("d1", "Details"),
            vec!["values.0".parse().unwrap()],
        )]);
        let cell = WidgetPoint::Pivot(PivotTableDataPoint::data_cell(PivotTableEntries {
            rows: vec![PivotDataPointEntry::new("Cardiology", PivotArea::Rows, 0)],
            ..Default::default()
        }));

        let (scoped, presenter) = controller(config.clone());
        let outcome = scoped
            .handle_click(&cell, &NavigationContext::default(), ClickPosition::default())
            .unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(presenter.take().is_empty());

        config.enabled = false;
        config.jump_targets.clear();
        let (disabled, _) = controller(config);
        assert_eq!(
            disabled.handle_click(&cell, &NavigationContext::default(), ClickPosition::default()),
            Ok(ClickOutcome::Ignored)
        );
    }

    fn pivot_cell(area: PivotArea) -> WidgetPoint {
        let entry = vec![PivotDataPointEntry::new("Cardiology", area, 0)];
        let entries = match area {
            PivotArea::Rows => PivotTableEntries { rows: entry, ..Default::default() },
            PivotArea::Columns => PivotTableEntries { columns: entry, ..Default::default() },
            PivotArea::Values => PivotTableEntries { values: entry, ..Default::default() },
        };
        WidgetPoint::Pivot(PivotTableDataPoint::data_cell(entries))
    }

    fn scoped(id: &str, dims: &[&str]) -> JtdTargetInner {
        JtdTargetInner::scoped(
            JtdTarget::dashboard(id, id),
            dims.iter().map(|d| d.parse().unwrap()).collect(),
        )
    }

    #[test]
    fn test_multi_select_over_disjoint_scopes_is_ignored() {
        let (controller, presenter) = controller(JtdConfig::with_targets(vec![
            scoped("by-row", &["rows.0"]),
            scoped("by-value", &["values.0"]),
        ]));

        let outcome = controller
            .handle_multi_select(
                &[pivot_cell(PivotArea::Rows), pivot_cell(PivotArea::Values)],
                &NavigationContext::default(),
                ClickPosition::default(),
            )
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(presenter.take().is_empty());
    }

    #[test]
    fn test_multi_select_keeps_only_targets_shared_by_all_points() {
        let (controller, presenter) = controller(JtdConfig::with_targets(vec![
            scoped("by-row", &["rows.0"]),
            scoped("shared", &["rows.0", "values.0"]),
            scoped("by-value", &["values.0"]),
        ]));

        let outcome = controller
            .handle_multi_select(
                &[pivot_cell(PivotArea::Rows), pivot_cell(PivotArea::Values)],
                &NavigationContext::default(),
                ClickPosition::default(),
            )
            .unwrap();

        assert!(matches!(outcome, ClickOutcome::Navigated(_)));
        let presented = presenter.take();
        let [Presented::Modal(action)] = presented.as_slice() else {
            panic!("expected one modal, got {:?}", presented);
        };
        assert_eq!(
            action.content.destination,
            JtdDestination::DashboardId { id: "shared".to_string() }
        );
    }

    #[test]
    fn test_multi_select_unions_members_and_notifies_listener() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let (controller, presenter) = controller(JtdConfig::with_targets(vec![JtdTargetInner::new(
            JtdTarget::dashboard("d1", "Details"),
        )]));
        let controller = controller.with_listener(Arc::new(move |event: &NavigationEvent| {
            sink.lock().unwrap().push(event.clone());
        }));

        let outcome = controller
            .handle_multi_select(
                &[chart_point("Cardiology"), chart_point("Neurology")],
                &NavigationContext::default(),
                ClickPosition::default(),
            )
            .unwrap();

        assert!(matches!(outcome, ClickOutcome::Navigated(_)));
        let presented = presenter.take();
        let [Presented::Modal(action)] = presented.as_slice() else {
            panic!("expected one modal, got {:?}", presented);
        };
        assert_eq!(
            action.content.filters,
            vec![Filter::members(
                division(),
                vec!["Cardiology".to_string(), "Neurology".to_string()]
            )]
        );

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].caption, "Details");
        assert_eq!(events[0].filter_count, 1);
    }
}
