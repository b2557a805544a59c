use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Inbound body of `POST /v1/img2video`.
///
/// Optional fields accept an explicit `null`, which means the same as leaving them out.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Img2VideoRequest {
    /// Public http(s) URL of the input image. Takes precedence over `image_base64`.
    #[validate(custom(function = "validate_http_url"))]
    #[serde(default)]
    #[schema(example = "https://images.example.com/portrait.jpg")]
    pub image_url: Option<String>,

    /// Base64-encoded image, raw or as a `data:` URL.
    #[serde(default)]
    pub image_base64: Option<String>,

    /// Generation prompt.
    #[schema(example = "cinematic portrait turning head, 4k, film look")]
    pub prompt: String,

    /// Negative prompt.
    #[serde(default)]
    pub negative_prompt: Option<String>,

    /// Duration in seconds (typically 2-5).
    #[serde(default = "default_duration", deserialize_with = "duration_or_default")]
    #[schema(nullable, default = 3.0)]
    pub duration: f64,

    /// Motion intensity, 0..1.
    #[validate(range(min = 0.0, max = 1.0, message = "motion_strength must be within 0..1"))]
    #[serde(
        default = "default_motion_strength",
        deserialize_with = "motion_strength_or_default"
    )]
    #[schema(nullable, default = 0.7, minimum = 0.0, maximum = 1.0)]
    pub motion_strength: f64,

    /// Random seed.
    #[serde(default)]
    pub seed: Option<i64>,

    /// Allow NSFW output.
    #[serde(default = "default_nsfw", deserialize_with = "nsfw_or_default")]
    #[schema(nullable, default = true)]
    pub nsfw: bool,

    /// Vendor parameters merged verbatim over the derived payload.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schema(value_type = Option<Object>)]
    pub extra: Map<String, Value>,
}

fn default_duration() -> f64 {
    3.0
}

fn default_motion_strength() -> f64 {
    0.7
}

fn default_nsfw() -> bool {
    true
}

fn duration_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_duration))
}

fn motion_strength_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<f64, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_motion_strength))
}

fn nsfw_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_nsfw))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Only absolute http(s) URLs with a host are forwarded to the vendor.
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let valid = Url::parse(value)
        .map(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        })
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("http_url");
        err.message = Some("image_url must be an absolute http(s) URL".into());
        Err(err)
    }
}

/// Outcome classification of a vendor reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Succeeded,
    Queued,
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Queued => "queued",
            TaskStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable response shape returned regardless of how the vendor structured its reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenericTaskResponse {
    pub status: TaskStatus,
    /// Vendor task id when the job was queued.
    pub task_id: Option<String>,
    /// Video URL when the vendor answered with a finished result.
    pub result_url: Option<String>,
    /// Untouched vendor reply.
    #[schema(value_type = Object)]
    pub vendor_raw: Value,
}
