//! Pix payment page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use sacola_core::Price;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};

/// Pix page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PixQuery {
    pub valor: Option<String>,
}

/// Pix payment page template.
#[derive(Template, WebTemplate)]
#[template(path = "pix.html")]
pub struct PixTemplate {
    /// Formatted amount, e.g. "R$ 37,50".
    pub amount: String,
}

/// Show the amount to pay.
#[instrument]
pub async fn pix(Query(query): Query<PixQuery>) -> Result<PixTemplate> {
    let raw = query
        .valor
        .ok_or_else(|| AppError::BadRequest("missing valor".to_string()))?;
    let amount: Price = raw
        .parse()
        .map_err(|e: sacola_core::PriceError| AppError::BadRequest(e.to_string()))?;
    Ok(PixTemplate {
        amount: amount.display(),
    })
}
