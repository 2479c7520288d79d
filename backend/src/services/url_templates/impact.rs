use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use crate::services::dependents::{as_dependents, strip_removed_values, used_by_template};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::impact::ImpactReport;
use common::requests::TemplateChangeRequest;
use common::template_utils::{analyze_changes, extract_placeholders};
use log::{error, info};

/// Handler for `POST /api/url_templates/{url_template_id}/impact`.
pub async fn process(
    config: web::Data<AppConfig>,
    url_template_id: web::Path<String>,
    payload: web::Json<TemplateChangeRequest>,
) -> impl Responder {
    match analyze_url_template_change(&config, &url_template_id, &payload.new_value) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            error!("Error analyzing change of URL template {url_template_id}: {e}");
            e.error_response()
        }
    }
}

/// Handler for `POST /api/url_templates/{url_template_id}/apply`.
pub async fn apply(
    config: web::Data<AppConfig>,
    url_template_id: web::Path<String>,
    payload: web::Json<TemplateChangeRequest>,
) -> impl Responder {
    match apply_url_template_change(&config, &url_template_id, &payload.new_value) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            error!("Error applying change of URL template {url_template_id}: {e}");
            e.error_response()
        }
    }
}

pub fn analyze_url_template_change(
    config: &AppConfig,
    url_template_id: &str,
    new_url: &str,
) -> Result<ImpactReport, ServiceError> {
    let conn = db::open(&config.database_path)?;
    let url_template = db::url_templates::find_url_template(&conn, url_template_id)?;
    let contents = db::contents::contents_for_url_template(&conn, url_template_id)?;
    Ok(analyze_changes(
        &url_template.url_template,
        new_url,
        &as_dependents(&contents),
    ))
}

pub fn apply_url_template_change(
    config: &AppConfig,
    url_template_id: &str,
    new_url: &str,
) -> Result<ImpactReport, ServiceError> {
    let new_url = new_url.trim();
    if new_url.is_empty() {
        return Err(ServiceError::Invalid("URL template must not be empty".to_string()));
    }

    let mut conn = db::open(&config.database_path)?;
    let tx = conn.transaction()?;

    let mut url_template = db::url_templates::find_url_template(&tx, url_template_id)?;
    let contents = db::contents::contents_for_url_template(&tx, url_template_id)?;
    let report = analyze_changes(&url_template.url_template, new_url, &as_dependents(&contents));

    let updated =
        strip_removed_values(&tx, contents, &report, |content| used_by_template(&tx, content))?;
    url_template.url_template = new_url.to_string();
    url_template.placeholders = extract_placeholders(new_url);
    db::url_templates::upsert_url_template(&tx, &url_template)?;
    tx.commit()?;

    info!("URL template {url_template_id} updated, {updated} contents cleaned");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::content::Content;
    use common::model::template::Template;
    use common::model::url_template::UrlTemplate;
    use serde_json::json;

    #[test]
    fn apply_cleans_contents_linked_through_the_url_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        let conn = db::open(&config.database_path).unwrap();
        db::templates::upsert_template(
            &conn,
            &Template {
                id: "t1".into(),
                name: "Card".into(),
                html: "<a href=\"{{linkUrl}}\">{{title}}</a>".into(),
                placeholders: vec!["linkUrl".into(), "title".into()],
            },
        )
        .unwrap();
        db::url_templates::upsert_url_template(
            &conn,
            &UrlTemplate {
                id: "u1".into(),
                name: "Tracking".into(),
                url_template: "https://t.example.com/?c={{campaignId}}&a={{affiliateId}}".into(),
                placeholders: vec!["affiliateId".into(), "campaignId".into()],
            },
        )
        .unwrap();
        db::contents::upsert_content(
            &conn,
            &Content {
                id: "c1".into(),
                name: "Spring sale".into(),
                template_id: "t1".into(),
                url_template_id: Some("u1".into()),
                data: json!({"campaignId": "42", "affiliateId": "7", "title": "x"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            },
        )
        .unwrap();

        let preview =
            analyze_url_template_change(&config, "u1", "https://t.example.com/?c={{campaignId}}&m={{medium}}")
                .unwrap();
        assert_eq!(preview.removed_placeholders, vec!["affiliateId"]);
        assert_eq!(preview.added_placeholders, vec!["medium"]);

        let report =
            apply_url_template_change(&config, "u1", "https://t.example.com/?c={{campaignId}}&m={{medium}}")
                .unwrap();
        assert_eq!(report, preview);

        let content = db::contents::find_content(&conn, "c1").unwrap();
        assert!(!content.data.contains_key("affiliateId"));
        assert_eq!(content.data.len(), 2);
        let stored = db::url_templates::find_url_template(&conn, "u1").unwrap();
        assert_eq!(stored.placeholders, vec!["campaignId", "medium"]);
    }
}
