//! Template edits and their effect on existing contents.
//!
//! `impact` only reports. `apply` runs the same analysis inside one SQLite
//! transaction, strips values of removed placeholders from the affected
//! contents, then stores the new HTML; either everything is written or
//! nothing is. A value the content's URL template still uses is kept.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use crate::services::dependents::{
    as_dependents, strip_removed_values, update_declared, used_by_url_template,
};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::impact::ImpactReport;
use common::requests::TemplateChangeRequest;
use common::template_utils::analyze_changes;
use log::{error, info};

/// Handler for `POST /api/templates/{template_id}/impact`.
pub async fn process(
    config: web::Data<AppConfig>,
    template_id: web::Path<String>,
    payload: web::Json<TemplateChangeRequest>,
) -> impl Responder {
    match analyze_template_change(&config, &template_id, &payload.new_value) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            error!("Error analyzing change of template {template_id}: {e}");
            e.error_response()
        }
    }
}

/// Handler for `POST /api/templates/{template_id}/apply`.
pub async fn apply(
    config: web::Data<AppConfig>,
    template_id: web::Path<String>,
    payload: web::Json<TemplateChangeRequest>,
) -> impl Responder {
    match apply_template_change(&config, &template_id, &payload.new_value) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            error!("Error applying change of template {template_id}: {e}");
            e.error_response()
        }
    }
}

pub fn analyze_template_change(
    config: &AppConfig,
    template_id: &str,
    new_html: &str,
) -> Result<ImpactReport, ServiceError> {
    let conn = db::open(&config.database_path)?;
    let template = db::templates::find_template(&conn, template_id)?;
    let contents = db::contents::contents_for_template(&conn, template_id)?;
    Ok(analyze_changes(
        &template.html,
        new_html,
        &as_dependents(&contents),
    ))
}

pub fn apply_template_change(
    config: &AppConfig,
    template_id: &str,
    new_html: &str,
) -> Result<ImpactReport, ServiceError> {
    let mut conn = db::open(&config.database_path)?;
    let tx = conn.transaction()?;

    let mut template = db::templates::find_template(&tx, template_id)?;
    let contents = db::contents::contents_for_template(&tx, template_id)?;
    let report = analyze_changes(&template.html, new_html, &as_dependents(&contents));

    let updated =
        strip_removed_values(&tx, contents, &report, |content| used_by_url_template(&tx, content))?;
    template.placeholders = update_declared(template.placeholders, &report);
    template.html = new_html.to_string();
    db::templates::upsert_template(&tx, &template)?;
    tx.commit()?;

    info!(
        "Template {template_id} updated: -[{}] +[{}], {updated} contents cleaned",
        report.removed_placeholders.join(", "),
        report.added_placeholders.join(", ")
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::templates::configure_routes;
    use actix_web::{test as actix_test, App};
    use common::model::content::Content;
    use common::model::template::Template;
    use common::model::url_template::UrlTemplate;
    use serde_json::json;

    fn seed(config: &AppConfig) {
        let conn = db::open(&config.database_path).unwrap();
        db::templates::upsert_template(
            &conn,
            &Template {
                id: "t1".into(),
                name: "Card".into(),
                html: "{{title}}{{image}}".into(),
                placeholders: vec!["title".into(), "image".into()],
            },
        )
        .unwrap();
        for (id, data) in [
            ("c1", json!({"title": "x", "image": "y"})),
            ("c2", json!({"title": "x"})),
        ] {
            db::contents::upsert_content(
                &conn,
                &Content {
                    id: id.into(),
                    name: id.into(),
                    template_id: "t1".into(),
                    url_template_id: None,
                    data: data.as_object().cloned().unwrap(),
                },
            )
            .unwrap();
        }
    }

    #[actix_web::test]
    async fn impact_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        seed(&config);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(config.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/templates/t1/impact")
            .set_json(TemplateChangeRequest {
                new_value: "{{title}}{{price}}".into(),
            })
            .to_request();
        let report: ImpactReport = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(report.removed_placeholders, vec!["image"]);
        assert_eq!(report.added_placeholders, vec!["price"]);
        assert_eq!(report.affected_contents.len(), 2);
        assert_eq!(report.affected_contents[0].removed, vec!["image"]);
        assert!(report.affected_contents[1].removed.is_empty());
        assert_eq!(report.affected_contents[1].added, vec!["price"]);

        let conn = db::open(&config.database_path).unwrap();
        let c1 = db::contents::find_content(&conn, "c1").unwrap();
        assert!(c1.data.contains_key("image"));
    }

    #[test]
    fn apply_strips_values_and_saves_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        seed(&config);

        let report = apply_template_change(&config, "t1", "{{title}}{{price}}").unwrap();
        assert_eq!(report.removed_placeholders, vec!["image"]);

        let conn = db::open(&config.database_path).unwrap();
        let template = db::templates::find_template(&conn, "t1").unwrap();
        assert_eq!(template.html, "{{title}}{{price}}");
        assert_eq!(template.placeholders, vec!["title", "price"]);
        let c1 = db::contents::find_content(&conn, "c1").unwrap();
        assert!(!c1.data.contains_key("image"));
        assert!(c1.data.contains_key("title"));
    }

    #[test]
    fn apply_keeps_values_the_url_template_uses() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        seed(&config);
        let conn = db::open(&config.database_path).unwrap();
        db::url_templates::upsert_url_template(
            &conn,
            &UrlTemplate {
                id: "u1".into(),
                name: "Tracking".into(),
                url_template: "https://t.example.com/?img={{image}}".into(),
                placeholders: vec!["image".into()],
            },
        )
        .unwrap();
        let mut c1 = db::contents::find_content(&conn, "c1").unwrap();
        c1.url_template_id = Some("u1".into());
        db::contents::upsert_content(&conn, &c1).unwrap();

        let report = apply_template_change(&config, "t1", "{{title}}").unwrap();
        assert_eq!(report.removed_placeholders, vec!["image"]);
        assert!(db::contents::find_content(&conn, "c1").unwrap().data.contains_key("image"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database(dir.path().join("ads.sqlite"));
        assert!(matches!(
            analyze_template_change(&config, "nope", ""),
            Err(ServiceError::NotFound(_))
        ));
    }
}
