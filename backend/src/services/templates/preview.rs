use actix_web::{web, HttpResponse, Responder};
use common::requests::{PreviewRequest, SampleValuesRequest};
use common::template_utils::{get_sample_value, render_preview};
use serde_json::json;
use std::collections::BTreeMap;

/// Handler for `POST /api/templates/preview`: the unsaved HTML filled with
/// sample values, every link neutralized.
pub async fn process(payload: web::Json<PreviewRequest>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "html": render_preview(&payload.html) }))
}

/// Handler for `POST /api/templates/sample-values`.
pub async fn sample_values(payload: web::Json<SampleValuesRequest>) -> impl Responder {
    let samples: BTreeMap<&str, String> = payload
        .placeholders
        .iter()
        .map(|name| (name.as_str(), get_sample_value(name)))
        .collect();
    HttpResponse::Ok().json(samples)
}
