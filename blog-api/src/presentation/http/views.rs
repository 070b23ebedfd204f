use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::app_error::AppError;

/// A page to render: the template name plus the values bound into it.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct View {
    pub(crate) view: String,
    #[schema(value_type = Object)]
    pub(crate) model: Map<String, Value>,
}

impl View {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            view: name.to_string(),
            model: Map::new(),
        }
    }

    pub(crate) fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, AppError> {
        let value = serde_json::to_value(value).map_err(|err| AppError::Internal(err.into()))?;
        self.model.insert(key.to_string(), value);
        Ok(self)
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
