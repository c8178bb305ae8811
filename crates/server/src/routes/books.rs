use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use service::book::domain::{Book, BookDetail, BookWithBreadcrumbs, CreateBookInput, UpdateBookInput};
use service::pagination::Pagination;
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    post, path = "/books", tag = "books",
    request_body = crate::openapi::CreateBookDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BookDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Category Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Name Taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBookInput>,
) -> Result<(StatusCode, Json<Book>), JsonApiError> {
    let created = state.books.create(input).await?;
    info!(id = created.id, category_id = created.category_id, event = "book_create", "created book");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/books", tag = "books",
    responses((status = 200, description = "Books with resolved category", body = [crate::openapi::BookDetailDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BookDetail>>, JsonApiError> {
    let all = state.books.find_all().await?;
    info!(count = all.len(), "list books");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book with breadcrumbs", body = crate::openapi::BookWithBreadcrumbsDoc),
        (status = 404, description = "Book Or Category Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<BookWithBreadcrumbs>, JsonApiError> {
    Ok(Json(state.books.find_one_with_breadcrumbs(id).await?))
}

#[utoipa::path(
    patch, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = crate::openapi::UpdateBookDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BookDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Book Or Category Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Name Taken", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateBookInput>,
) -> Result<Json<Book>, JsonApiError> {
    let updated = state.books.update(id, input).await?;
    info!(id, event = "book_update", "updated book");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.books.delete(id).await?;
    info!(id, event = "book_delete", "deleted book");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/books/category/{categoryId}", tag = "books",
    params(
        ("categoryId" = i32, Path, description = "Category ID; descendants included"),
        ("skip" = Option<u64>, Query, description = "Rows to skip, default 0"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100")
    ),
    responses(
        (status = 200, description = "Page of books ordered by id", body = [crate::openapi::BookDoc]),
        (status = 400, description = "Invalid Pagination", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Category Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Book>>, JsonApiError> {
    Ok(Json(state.books.find_by_category_and_subcategories(category_id, page).await?))
}
