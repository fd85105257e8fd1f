// HTTP request handlers
use crate::application::actionability::{
    find_all_matching_targets, is_actionable, is_actionable_cell, Actionability,
};
use crate::application::drilldown_controller::DrilldownController;
use crate::application::error::NavigationError;
use crate::application::filter_pipeline::NavigationContext;
use crate::application::navigation::{ClickOutcome, ClickPosition, JumpController};
use crate::application::path_sync::{get_available_drilldown_paths, sync_drilldown_paths, PathSyncRequest};
use crate::domain::attribute::Attribute;
use crate::domain::data_point::WidgetPoint;
use crate::domain::drilldown::{Breadcrumb, DrilldownSelection};
use crate::domain::filter::Filter;
use crate::domain::jtd::{JtdConfig, JtdTargetInner};
use crate::presentation::app_state::AppState;
use crate::presentation::descriptor_presenter::{DescriptorPresenter, Presented};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unknown_widget(oid: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("widget {} has no jump to dashboard configuration", oid),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn navigation(err: &NavigationError, state: &AppState) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.translate(state.translator.as_ref()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

fn jtd_config<'a>(state: &'a AppState, oid: &str) -> Result<&'a JtdConfig, ApiError> {
    state
        .widgets
        .get(oid)
        .and_then(|w| w.jtd.as_ref())
        .ok_or_else(|| ApiError::unknown_widget(oid))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Normalized jump to dashboard configuration of a widget
pub async fn get_jtd_config(
    Path(oid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<JtdConfig>, ApiError> {
    Ok(Json(jtd_config(&state, &oid)?.clone()))
}

#[derive(Debug, Deserialize)]
pub struct ActionableRequest {
    #[serde(default)]
    pub dimension_id: Option<String>,
    #[serde(default)]
    pub point: Option<WidgetPoint>,
}

/// Cell styling: is this cell a hyperlink?
pub async fn check_actionable(
    Path(oid): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionableRequest>,
) -> Result<Json<Actionability>, ApiError> {
    let config = jtd_config(&state, &oid)?;

    let result = match (&request.dimension_id, &request.point) {
        (Some(id), _) => is_actionable_cell(config, id),
        (None, Some(point)) => is_actionable(config, point),
        (None, None) => return Err(ApiError::bad_request("expected `dimension_id` or `point`")),
    };
    Ok(Json(result))
}

/// All targets applying to a point, for right-click menus
pub async fn matching_targets(
    Path(oid): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(point): Json<WidgetPoint>,
) -> Result<Json<Vec<JtdTargetInner>>, ApiError> {
    let config = jtd_config(&state, &oid)?;
    let targets = find_all_matching_targets(config, &point)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(targets))
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Click,
    RightClick,
    MultiSelect,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub gesture: Gesture,
    pub points: Vec<WidgetPoint>,
    #[serde(default)]
    pub context: NavigationContext,
    #[serde(default)]
    pub position: ClickPosition,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub outcome: ClickOutcome,
    pub presented: Vec<Presented>,
}

/// Run an interaction and return the modal or menu the host should open
pub async fn jump_actions(
    Path(oid): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let config = jtd_config(&state, &oid)?.clone();
    let presenter = Arc::new(DescriptorPresenter::default());
    let controller = JumpController::new(config, presenter.clone(), state.translator.clone());

    let outcome = match (request.gesture, request.points.as_slice()) {
        (Gesture::MultiSelect, points) => {
            controller.handle_multi_select(points, &request.context, request.position)
        }
        (Gesture::Click, [point]) => controller.handle_click(point, &request.context, request.position),
        (Gesture::RightClick, [point]) => {
            controller.handle_right_click(point, &request.context, request.position)
        }
        (_, points) => {
            return Err(ApiError::bad_request(format!(
                "single-point gestures take exactly one point, got {}",
                points.len()
            )));
        }
    };

    let outcome = outcome.map_err(|e| ApiError::navigation(&e, &state))?;
    Ok(Json(ActionResponse {
        outcome,
        presented: presenter.take(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DrilldownStateRequest {
    pub initial_dimension: Attribute,
    #[serde(default)]
    pub selections: Vec<DrilldownSelection>,
    /// Breadcrumb slice to apply before answering
    #[serde(default)]
    pub slice: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DrilldownStateResponse {
    pub dimension: Attribute,
    pub depth: usize,
    pub selections: Vec<DrilldownSelection>,
    pub filters: Vec<Filter>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Derived drill values for a chain held by the host
pub async fn drilldown_state(Json(request): Json<DrilldownStateRequest>) -> Json<DrilldownStateResponse> {
    let mut drill = DrilldownController::with_selections(request.initial_dimension, request.selections);
    if let Some(index) = request.slice {
        drill.slice(index);
    }

    Json(DrilldownStateResponse {
        dimension: drill.drilldown_dimension().clone(),
        depth: drill.selections().len(),
        selections: drill.selections().to_vec(),
        filters: drill.drilldown_filters(),
        breadcrumbs: drill.breadcrumbs(),
    })
}

#[derive(Debug, Deserialize)]
pub struct DrilldownPathsRequest {
    #[serde(flatten)]
    pub request: PathSyncRequest,
    /// Widget whose configured drill paths apply
    #[serde(default)]
    pub widget_oid: Option<String>,
    /// Attributes already in the drill chain
    #[serde(default)]
    pub selected: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct DrilldownPathsResponse {
    pub paths: Vec<Attribute>,
}

/// Hierarchy levels the user may drill into next
pub async fn drilldown_paths(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DrilldownPathsRequest>,
) -> Json<DrilldownPathsResponse> {
    let mut request = body.request;
    if request.configured_paths.is_empty() {
        if let Some(widget) = body.widget_oid.as_deref().and_then(|oid| state.widgets.get(oid)) {
            request.configured_paths = widget.drilldown.drilldown_paths.clone();
        }
    }

    let all_paths = sync_drilldown_paths(state.hierarchy_repository.as_ref(), &request).await;
    let mut selected: Vec<&Attribute> = body.selected.iter().collect();
    selected.push(&request.attribute);

    Json(DrilldownPathsResponse {
        paths: get_available_drilldown_paths(&all_paths, &selected),
    })
}
