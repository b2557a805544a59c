//! Request normalization: caller input to Novita payload.
//!
//! The payload is a plain string-keyed JSON object so caller-supplied `extra` fields can be
//! merged over the derived ones with last-write-wins semantics.

use crate::dtos::Img2VideoRequest;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Invalid data URL for image_base64: malformed data URL, expected a comma before the payload")]
    MalformedDataUrl,

    #[error("Provide image_url or image_base64: no image provided")]
    MissingImage,
}

/// The image reference that ends up in the vendor payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Base64(String),
}

impl ImageSource {
    fn key(&self) -> &'static str {
        match self {
            ImageSource::Url(_) => "image_url",
            ImageSource::Base64(_) => "image_base64",
        }
    }

    fn into_value(self) -> Value {
        match self {
            ImageSource::Url(v) | ImageSource::Base64(v) => Value::String(v),
        }
    }
}

/// JSON object sent to the vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VendorPayload(Map<String, Value>);

impl VendorPayload {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Apply `overrides` in iteration order; an override replaces any existing entry.
    pub fn merge<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        for (key, value) in overrides {
            if let Some(previous) = self.0.insert(key.clone(), value.clone()) {
                tracing::debug!(key = %key, previous = %previous, "extra field overrides derived payload field");
            }
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Pick the image reference: a URL wins; otherwise base64, unwrapping a data URL.
pub fn resolve_image(
    image_url: Option<&str>,
    image_base64: Option<&str>,
) -> Result<ImageSource, PayloadError> {
    if let Some(url) = image_url.filter(|u| !u.is_empty()) {
        return Ok(ImageSource::Url(url.to_string()));
    }

    let encoded = match image_base64.filter(|b| !b.is_empty()) {
        Some(raw) if raw.starts_with(DATA_URL_PREFIX) => raw
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or(PayloadError::MalformedDataUrl)?,
        Some(raw) => raw,
        None => return Err(PayloadError::MissingImage),
    };

    if encoded.is_empty() {
        return Err(PayloadError::MissingImage);
    }

    Ok(ImageSource::Base64(encoded.to_string()))
}

/// Derive the vendor payload from a caller request.
pub fn build_vendor_payload(request: &Img2VideoRequest) -> Result<VendorPayload, PayloadError> {
    let image = resolve_image(
        request.image_url.as_deref(),
        request.image_base64.as_deref(),
    )?;

    let mut payload = VendorPayload::default();
    payload.insert("prompt", Value::String(request.prompt.clone()));
    payload.insert(
        "negative_prompt",
        Value::String(request.negative_prompt.clone().unwrap_or_default()),
    );
    payload.insert("duration", Value::from(request.duration));
    payload.insert("motion_strength", Value::from(request.motion_strength));
    payload.insert(
        "seed",
        request.seed.map(Value::from).unwrap_or(Value::Null),
    );
    payload.insert("nsfw", Value::Bool(request.nsfw));
    payload.insert(image.key(), image.into_value());

    payload.merge(&request.extra);

    Ok(payload)
}
