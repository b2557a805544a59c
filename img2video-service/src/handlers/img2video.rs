use axum::{extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{GenericTaskResponse, Img2VideoRequest};
use crate::startup::AppState;

/// Submit an image-to-video job to the vendor and return its normalized answer.
#[utoipa::path(
    post,
    path = "/v1/img2video",
    request_body = Img2VideoRequest,
    responses(
        (status = 200, description = "Vendor accepted the job", body = GenericTaskResponse),
        (status = 400, description = "No usable image or malformed data URL"),
        (status = 422, description = "Field validation failed"),
        (status = 500, description = "Vendor credential not configured"),
        (status = 502, description = "Vendor unreachable or returned an unparseable body"),
        (status = "4XX", description = "Vendor error status relayed with its body in `vendor_error`"),
    ),
    tag = "Image to Video"
)]
#[tracing::instrument(
    skip(state, request),
    fields(has_url = tracing::field::Empty, has_base64 = tracing::field::Empty)
)]
pub async fn create_img2video(
    State(state): State<AppState>,
    Json(request): Json<Img2VideoRequest>,
) -> Result<Json<GenericTaskResponse>, AppError> {
    request.validate()?;

    let span = tracing::Span::current();
    span.record("has_url", request.image_url.is_some());
    span.record("has_base64", request.image_base64.is_some());

    let result = state.novita.img2video(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "img2video request failed");
        AppError::from(e)
    })?;

    Ok(Json(result))
}
