use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use todo_core::{ErrorKind, ErrorResponse, SortDirection};
use todo_models::{CreateTodoDto, CreateTodoResponse, ListTodosResponse, Todo};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::todos::controller::list_todos,
        crate::modules::todos::controller::create_todo,
    ),
    components(
        schemas(
            Todo,
            CreateTodoDto,
            ListTodosResponse,
            CreateTodoResponse,
            ErrorResponse,
            ErrorKind,
            SortDirection,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Todos", description = "Listing and creating the caller's todos")
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "A minimal todo backend built with Rust, Axum, and PostgreSQL. Every route requires a bearer JWT whose subject is the caller's user id.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
