//! Shared request-payload pieces: the image envelope and form descriptors.
//!
//! The `GET` form routes answer a descriptor of the fields the matching
//! `POST` accepts, so clients that would have received a rendered form get a
//! machine-readable equivalent instead.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ImageUpload};

/// Base64-encoded image attached to a JSON request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadRequest {
    /// Original file name, used for the stored extension.
    #[schema(example = "cat.png")]
    pub file_name: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl TryFrom<ImageUploadRequest> for ImageUpload {
    type Error = Error;

    fn try_from(value: ImageUploadRequest) -> Result<Self, Self::Error> {
        ImageUpload::from_base64(value.file_name, &value.data).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "code": "invalid_image" }))
        })
    }
}

/// One submittable field of a form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormField {
    /// Field name as expected in the JSON body.
    pub name: String,
    /// Whether the field must be present and non-empty.
    pub required: bool,
}

impl FormField {
    fn new(name: &str, required: bool) -> Self {
        Self {
            name: name.to_owned(),
            required,
        }
    }
}

/// Machine-readable description of a form's fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormDescriptor {
    /// Route the form submits to.
    pub submit_to: String,
    /// Fields the submission accepts.
    pub fields: Vec<FormField>,
}

impl FormDescriptor {
    fn new(submit_to: &str, fields: Vec<FormField>) -> Self {
        Self {
            submit_to: submit_to.to_owned(),
            fields,
        }
    }

    /// Descriptor for `POST /api/v1/signup`.
    #[must_use]
    pub fn signup() -> Self {
        Self::new(
            "/api/v1/signup",
            vec![
                FormField::new("username", true),
                FormField::new("email", true),
                FormField::new("password", true),
                FormField::new("image", false),
            ],
        )
    }

    /// Descriptor for `POST /api/v1/login`.
    #[must_use]
    pub fn login() -> Self {
        Self::new(
            "/api/v1/login",
            vec![
                FormField::new("email", true),
                FormField::new("password", true),
            ],
        )
    }

    /// Descriptor for `POST /api/v1/posts/create`.
    #[must_use]
    pub fn post() -> Self {
        Self::new(
            "/api/v1/posts/create",
            vec![
                FormField::new("content", true),
                FormField::new("picName", false),
                FormField::new("image", false),
            ],
        )
    }
}
