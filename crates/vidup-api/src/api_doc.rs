//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use vidup_core::models;

struct SessionTokenAuth;

impl Modify for SessionTokenAuth {
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
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vidup API",
        version = "0.1.0",
        description = "Upload videos to the media hosting service and list the stored records. Uploads require an identity provider session token (Bearer header or session cookie)."
    ),
    paths(
        handlers::video_upload::upload_video,
        handlers::videos::list_videos,
    ),
    components(schemas(
        models::VideoRecord,
        models::UploadVideoResponse,
        error::ErrorResponse,
    )),
    modifiers(&SessionTokenAuth),
    tags(
        (name = "videos", description = "Video upload and listing")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
