use axum::extract::State;
use axum::Json;
use webdam_core::{BreadcrumbTrail, EntityOwner, WidgetView};

use crate::dto::{BrowseRequest, BundleDto, BundlesResponse, SelectRequest, SelectResponse};
use crate::error::AppError;
use crate::state::AppState;

pub async fn browse(
    State(state): State<AppState>,
    Json(req): Json<BrowseRequest>,
) -> Result<Json<WidgetView>, AppError> {
    let prior = match req.trail {
        Some(entries) => BreadcrumbTrail::from_entries(entries)?,
        None => BreadcrumbTrail::new(),
    };

    let view = state.widget.build(&prior, &req.trigger).await?;
    Ok(Json(view))
}

pub async fn select(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    let cardinality = req
        .cardinality
        .unwrap_or(state.widget.config().cardinality);
    state
        .widget
        .validate(&req.trigger, &req.assets, cardinality)?;

    let owner = EntityOwner::new(req.uid, req.langcode);
    let entities = state
        .widget
        .submit(&req.trigger, &req.assets, &owner)
        .await?;
    Ok(Json(SelectResponse { entities }))
}

pub async fn bundles(State(state): State<AppState>) -> Json<BundlesResponse> {
    let bundles = state
        .widget
        .eligible_bundles()
        .into_iter()
        .map(BundleDto::from)
        .collect();
    Json(BundlesResponse {
        bundles,
        selected: state.widget.config().bundle.clone(),
    })
}
