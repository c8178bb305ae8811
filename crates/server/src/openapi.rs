use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDoc { pub id: i32, pub name: String, pub parent_category_id: Option<i32> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDoc { pub name: String, pub parent_category_id: Option<i32> }

/// `parentCategoryId`: omit to keep, `null` to make a root, an id to re-parent.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDoc { pub name: Option<String>, pub parent_category_id: Option<i32> }

#[derive(Serialize, ToSchema)]
pub struct AncestorPathDoc { pub path: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDoc {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category_id: i32,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailDoc {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category_id: i32,
    pub description: Option<String>,
    pub category: Option<CategoryDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookWithBreadcrumbsDoc {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category_id: i32,
    pub description: Option<String>,
    pub breadcrumbs: Vec<String>,
    pub ancestor_path: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDoc {
    pub name: String,
    pub author: String,
    pub category_id: i32,
    pub description: Option<String>,
}

/// `description`: omit to keep, `null` to clear.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDoc {
    pub name: Option<String>,
    pub author: Option<String>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::categories::subcategories,
        crate::routes::categories::descendants,
        crate::routes::categories::breadcrumbs,
        crate::routes::categories::ancestor_path,
        crate::routes::books::create,
        crate::routes::books::list,
        crate::routes::books::get,
        crate::routes::books::update,
        crate::routes::books::delete,
        crate::routes::books::by_category,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            CategoryDoc,
            CreateCategoryDoc,
            UpdateCategoryDoc,
            AncestorPathDoc,
            BookDoc,
            BookDetailDoc,
            BookWithBreadcrumbsDoc,
            CreateBookDoc,
            UpdateBookDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "books")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/health", "/categories/{id}/breadcrumbs", "/books/category/{categoryId}"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
