//! Business inquiry handler.
//!
//! Inquiries are logged for follow-up; nothing is stored.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use shinewell_core::validation::parse_line_item;

/// Contact form body. Every field is optional; the handler only logs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub products: Option<Value>,
}

impl ContactSubmission {
    /// Line items that name a product and ask for at least one unit.
    fn requested_items(&self) -> usize {
        self.products
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, |items| {
                items.iter().filter_map(parse_line_item).count()
            })
    }
}

/// POST /api/contact - log a business inquiry.
#[instrument(skip_all)]
pub async fn submit(payload: Result<Json<ContactSubmission>, JsonRejection>) -> Response {
    let Ok(Json(inquiry)) = payload else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to send message" })),
        )
            .into_response();
    };

    tracing::info!(
        name = inquiry.name.as_deref().unwrap_or_default(),
        company = inquiry.company_name.as_deref().unwrap_or_default(),
        company_address = inquiry.company_address.as_deref().unwrap_or_default(),
        address = inquiry.address.as_deref().unwrap_or_default(),
        phone = inquiry.phone.as_deref().unwrap_or_default(),
        email = inquiry.email.as_deref().unwrap_or_default(),
        message = inquiry.message.as_deref().unwrap_or_default(),
        requested_items = inquiry.requested_items(),
        "Contact inquiry received"
    );

    Json(json!({
        "success": true,
        "message": "Message sent successfully!",
    }))
    .into_response()
}
