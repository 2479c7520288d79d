use actix_web::{web, HttpResponse, Responder};
use common::requests::ValidatePlaceholdersRequest;
use common::template_utils::validate_placeholders;

/// Handler for `POST /api/templates/validate`.
///
/// Always `200 OK`: violations are data, and the caller decides whether they
/// block anything.
pub async fn process(payload: web::Json<ValidatePlaceholdersRequest>) -> impl Responder {
    let messages = validate_placeholders(&payload.html, &payload.placeholders);
    HttpResponse::Ok().json(messages)
}
