use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Serialize;
use service::category::domain::{Category, CreateCategoryInput, UpdateCategoryInput};
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct AncestorPath {
    pub path: String,
}

#[utoipa::path(
    post, path = "/categories", tag = "categories",
    request_body = crate::openapi::CreateCategoryDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Parent Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Name Taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<(StatusCode, Json<Category>), JsonApiError> {
    let created = state.categories.create(input).await?;
    info!(id = created.id, event = "category_create", "created category");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    responses((status = 200, description = "List OK", body = [crate::openapi::CategoryDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, JsonApiError> {
    let all = state.categories.find_all().await?;
    info!(count = all.len(), "list categories");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Category>, JsonApiError> {
    Ok(Json(state.categories.find_one(id).await?))
}

#[utoipa::path(
    patch, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = crate::openapi::UpdateCategoryDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Self Or Descendant Parent", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Name Taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<Json<Category>, JsonApiError> {
    let updated = state.categories.update(id, input).await?;
    info!(id, event = "category_update", "updated category");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Deleted; children promoted to roots"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.categories.delete(id).await?;
    info!(id, event = "category_delete", "deleted category");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/categories/{id}/subcategories", tag = "categories",
    params(("id" = i32, Path, description = "Parent category ID")),
    responses((status = 200, description = "Direct children", body = [crate::openapi::CategoryDoc]))
)]
pub async fn subcategories(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.categories.subcategories(id).await?))
}

#[utoipa::path(
    get, path = "/categories/{id}/descendants", tag = "categories",
    params(("id" = i32, Path, description = "Parent category ID")),
    responses((status = 200, description = "Descendant ids, pre-order", body = [i32]))
)]
pub async fn descendants(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<i32>>, JsonApiError> {
    Ok(Json(state.categories.all_subcategory_ids(id).await?))
}

#[utoipa::path(
    get, path = "/categories/{id}/breadcrumbs", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "One path per reachable leaf", body = [String]),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn breadcrumbs(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<String>>, JsonApiError> {
    Ok(Json(state.categories.descendant_leaf_paths(id).await?))
}

#[utoipa::path(
    get, path = "/categories/{id}/path", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Root-to-category path", body = crate::openapi::AncestorPathDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn ancestor_path(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<AncestorPath>, JsonApiError> {
    let path = state.categories.ancestor_path(id).await?;
    Ok(Json(AncestorPath { path }))
}
