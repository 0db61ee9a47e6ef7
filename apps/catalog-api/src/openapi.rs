//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "REST API for products and their categories",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/products",
            "/api/products/{id}",
            "/api/categories",
            "/api/categories/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }

    #[test]
    fn test_error_responses_are_documented() {
        let doc = ApiDoc::openapi();
        let responses = doc.components.expect("components").responses;

        assert!(responses.contains_key("NotFoundResponse"));
        assert!(responses.contains_key("ConflictResponse"));
    }
}
