//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, health_handler, user_handler};
use crate::domain::{NewUser, UserChanges, UserResponse};
use crate::errors::ErrorResponse;
use crate::types::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User CRUD API",
        version = "0.1.0",
        description = "User management backend with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        auth_handler::login,
        health_handler::health_check,
        health_handler::api_health,
    ),
    components(
        schemas(
            NewUser,
            UserChanges,
            UserResponse,
            ErrorResponse,
            PaginationMeta,
            auth_handler::LoginRequest,
            health_handler::HealthResponse,
            health_handler::ApiStatus,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Authentication", description = "Credential checks"),
        (name = "Health", description = "Liveness and database probes")
    )
)]
pub struct ApiDoc;
