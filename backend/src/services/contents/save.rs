//! # Content Saving
//!
//! Backs `POST /api/contents/save`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: a blank name is rejected. The referenced template and
//!     URL template must exist, otherwise the request ends in `404`.
//! 2.  **Value check**: the values are compared with the placeholders the
//!     HTML template and the URL template use. Missing and unexpected values
//!     are returned as warnings; the record is saved either way.
//! 3.  **Persistence**: the record is upserted into the `contents` table.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::content::Content;
use common::model::template::Template;
use common::model::url_template::UrlTemplate;
use common::requests::SaveResponse;
use common::template_utils::extract_placeholders;
use log::{error, info};

/// Actix web handler for `POST /api/contents/save`.
///
/// # Arguments
/// * `config` - Application settings; only the database path is used.
/// * `payload` - The content record. A blank id creates a new one.
///
/// # Returns
/// - `200 OK` with a `SaveResponse` (id and warnings).
/// - `400 Bad Request` for a blank name, `404 Not Found` for an unknown
///   template or URL template.
pub async fn process(config: web::Data<AppConfig>, payload: web::Json<Content>) -> impl Responder {
    match save_content(&config, payload.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Error saving content: {e}");
            e.error_response()
        }
    }
}

/// Compares a content's values with the placeholders its template and its
/// URL template (if any) use.
pub fn content_warnings(
    template: &Template,
    url_template: Option<&UrlTemplate>,
    content: &Content,
) -> Vec<String> {
    let mut used = extract_placeholders(&template.html);
    if let Some(url_template) = url_template {
        for name in extract_placeholders(&url_template.url_template) {
            if !used.contains(&name) {
                used.push(name);
            }
        }
    }
    let mut warnings = Vec::new();

    let missing: Vec<&str> = used
        .iter()
        .map(String::as_str)
        .filter(|name| !content.data.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        warnings.push(format!("Missing values for placeholders: {}", missing.join(", ")));
    }

    let unknown: Vec<&str> = content
        .data
        .keys()
        .map(String::as_str)
        .filter(|key| !used.iter().any(|name| name == key))
        .collect();
    if !unknown.is_empty() {
        warnings.push(format!(
            "Values for placeholders the template does not use: {}",
            unknown.join(", ")
        ));
    }

    warnings
}

pub fn save_content(config: &AppConfig, content: Content) -> Result<SaveResponse, ServiceError> {
    if content.name.trim().is_empty() {
        return Err(ServiceError::Invalid("Content name must not be empty".to_string()));
    }

    let conn = db::open(&config.database_path)?;
    let template = db::templates::find_template(&conn, &content.template_id)?;
    let url_template = content
        .url_template_id
        .as_deref()
        .map(|id| db::url_templates::find_url_template(&conn, id))
        .transpose()?;

    let content = Content {
        id: if content.id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            content.id
        },
        ..content
    };
    let warnings = content_warnings(&template, url_template.as_ref(), &content);

    db::contents::upsert_content(&conn, &content)?;
    info!("Content {} saved for template {}", content.id, template.id);

    Ok(SaveResponse {
        id: content.id,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        let conn = db::open(&config.database_path).unwrap();
        db::templates::upsert_template(
            &conn,
            &Template {
                id: "t1".into(),
                name: "Card".into(),
                html: r#"<a href="{{linkUrl}}">{{title}}</a>"#.into(),
                placeholders: vec!["linkUrl".into(), "title".into()],
            },
        )
        .unwrap();
        (dir, config)
    }

    fn content(template_id: &str, data: serde_json::Value) -> Content {
        Content {
            id: String::new(),
            name: "Spring sale".into(),
            template_id: template_id.into(),
            url_template_id: None,
            data: data.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn saves_and_reports_value_drift() {
        let (_dir, config) = setup();
        let saved = save_content(&config, content("t1", json!({"title": "x", "price": "1"}))).unwrap();
        assert_eq!(
            saved.warnings,
            vec![
                "Missing values for placeholders: linkUrl".to_string(),
                "Values for placeholders the template does not use: price".to_string(),
            ]
        );

        let conn = db::open(&config.database_path).unwrap();
        assert_eq!(db::contents::find_content(&conn, &saved.id).unwrap().name, "Spring sale");
    }

    #[test]
    fn url_template_values_are_not_flagged() {
        let (_dir, config) = setup();
        let conn = db::open(&config.database_path).unwrap();
        db::url_templates::upsert_url_template(
            &conn,
            &UrlTemplate {
                id: "u1".into(),
                name: "Tracking".into(),
                url_template: "https://track.example.com/?c={{campaignId}}".into(),
                placeholders: vec!["campaignId".into()],
            },
        )
        .unwrap();

        let mut linked = content(
            "t1",
            json!({"linkUrl": "/", "title": "x", "campaignId": "42"}),
        );
        linked.url_template_id = Some("u1".into());
        assert!(save_content(&config, linked).unwrap().warnings.is_empty());

        let mut missing = content("t1", json!({"linkUrl": "/", "title": "x"}));
        missing.url_template_id = Some("u1".into());
        assert_eq!(
            save_content(&config, missing).unwrap().warnings,
            vec!["Missing values for placeholders: campaignId".to_string()]
        );
    }

    #[test]
    fn unknown_url_template_is_rejected() {
        let (_dir, config) = setup();
        let mut linked = content("t1", json!({}));
        linked.url_template_id = Some("u9".into());
        assert!(matches!(
            save_content(&config, linked),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let (_dir, config) = setup();
        assert!(matches!(
            save_content(&config, content("t9", json!({}))),
            Err(ServiceError::NotFound(_))
        ));
    }
}
