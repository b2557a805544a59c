pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "img2video-service",
        description = "Image-to-video proxy in front of the Novita AI API"
    ),
    paths(handlers::health_check, handlers::img2video::create_img2video),
    components(schemas(
        dtos::Img2VideoRequest,
        dtos::GenericTaskResponse,
        dtos::TaskStatus,
    )),
    tags(
        (name = "Image to Video", description = "Job submission and response normalization"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
