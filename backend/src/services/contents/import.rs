//! # CSV Content Import
//!
//! `POST /api/contents/import` turns the rows of a CSV into content records
//! for one template. The request returns a `job_id` right away; the work runs
//! on a blocking thread and reports progress through the shared
//! [`JobsState`], which clients poll via `/import/status/{job_id}`.
//!
//! ## CSV layout
//!
//! - The header row names placeholders. Cells are trimmed.
//! - An optional `content_name` column names each record; otherwise records
//!   are called `<template name> #<row>`.
//! - Every other column must be a placeholder the template declares or uses,
//!   or one the linked URL template uses. An unknown column fails the job
//!   before anything is written.
//! - Empty cells are skipped, so the value counts as missing.
//!
//! All rows are inserted in a single transaction.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use crate::job_controller::state::{JobUpdate, JobsState};
use actix_web::{web, HttpResponse, Responder};
use common::jobs::JobStatus;
use common::model::content::Content;
use common::model::template::Template;
use common::model::url_template::UrlTemplate;
use common::requests::ImportContentsRequest;
use common::template_utils::extract_placeholders;
use log::{error, info};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Column holding the record name instead of a placeholder value.
const NAME_COLUMN: &str = "content_name";

pub(crate) async fn process(
    config: web::Data<AppConfig>,
    jobs_state: web::Data<JobsState>,
    payload: web::Json<ImportContentsRequest>,
) -> impl Responder {
    let job_id = schedule_import_job(
        &jobs_state,
        config.database_path.clone(),
        payload.into_inner(),
    )
    .await;
    HttpResponse::Ok().json(serde_json::json!({ "job_id": job_id }))
}

/// Registers a `Pending` job and spawns the import. Returns the job id.
async fn schedule_import_job(
    jobs_state: &JobsState,
    database_path: PathBuf,
    request: ImportContentsRequest,
) -> String {
    let job_id = uuid::Uuid::new_v4().to_string();
    jobs_state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);

    let tx = jobs_state.tx.clone();
    let job_id_for_task = job_id.clone();

    tokio::spawn(async move {
        let tx_block = tx.clone();
        let job_id_for_blocking = job_id_for_task.clone();
        let handle = tokio::task::spawn_blocking(move || {
            import_contents_blocking(&tx_block, &job_id_for_blocking, &database_path, &request)
        });

        let status = match handle.await {
            Ok(Ok(count)) => {
                info!("Import job {job_id_for_task} finished: {count} contents");
                JobStatus::Completed(format!("{count} contents imported"))
            }
            Ok(Err(e)) => {
                error!("Import job {job_id_for_task} failed: {e}");
                JobStatus::Failed(e.to_string())
            }
            Err(join_err) => {
                error!("Import job {job_id_for_task} panicked: {join_err}");
                JobStatus::Failed(format!("join error: {join_err}"))
            }
        };
        let _ = tx
            .send(JobUpdate {
                job_id: job_id_for_task,
                status,
            })
            .await;
    });

    job_id
}

/// Runs the whole import synchronously. Returns the number of records created.
///
/// Must not be called from inside the async runtime (it uses `blocking_send`).
fn import_contents_blocking(
    tx: &mpsc::Sender<JobUpdate>,
    job_id: &str,
    database_path: &Path,
    request: &ImportContentsRequest,
) -> Result<usize, ServiceError> {
    let report = |status: JobStatus| {
        let _ = tx.blocking_send(JobUpdate {
            job_id: job_id.to_string(),
            status,
        });
    };
    report(JobStatus::InProgress(0));

    let mut conn = db::open(database_path)?;
    let template = db::templates::find_template(&conn, &request.template_id)?;
    let url_template = request
        .url_template_id
        .as_deref()
        .map(|id| db::url_templates::find_url_template(&conn, id))
        .transpose()?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(request.csv.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    check_headers(&headers, &known_placeholders(&template, url_template.as_ref()))?;

    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    let total = records.len();

    let db_tx = conn.transaction()?;
    let mut last_percent = 0;
    for (index, record) in records.iter().enumerate() {
        let mut data = Map::new();
        let mut name = None;
        for (header, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() {
                continue;
            }
            if header == NAME_COLUMN {
                name = Some(cell.to_string());
            } else {
                data.insert(header.clone(), Value::String(cell.to_string()));
            }
        }

        let content = Content {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.unwrap_or_else(|| format!("{} #{}", template.name, index + 1)),
            template_id: template.id.clone(),
            url_template_id: request.url_template_id.clone(),
            data,
        };
        db::contents::upsert_content(&db_tx, &content)?;

        let percent = ((index + 1) * 100 / total) as u32;
        if percent != last_percent {
            last_percent = percent;
            report(JobStatus::InProgress(percent));
        }
    }
    db_tx.commit()?;

    Ok(total)
}

/// Names a CSV column may carry: the template's declared placeholders, the
/// ones its HTML actually uses and the ones the URL template uses.
fn known_placeholders(template: &Template, url_template: Option<&UrlTemplate>) -> Vec<String> {
    let mut known = extract_placeholders(&template.html);
    let url_names = url_template
        .map(|u| extract_placeholders(&u.url_template))
        .unwrap_or_default();
    for name in template.placeholders.iter().chain(&url_names) {
        if !known.contains(name) {
            known.push(name.clone());
        }
    }
    known
}

fn check_headers(headers: &[String], known: &[String]) -> Result<(), ServiceError> {
    if headers.iter().any(|h| h.is_empty()) {
        return Err(ServiceError::Invalid("CSV header cells must not be empty".to_string()));
    }
    let unknown: Vec<&str> = headers
        .iter()
        .map(String::as_str)
        .filter(|h| *h != NAME_COLUMN && !known.iter().any(|k| k == h))
        .collect();
    if !unknown.is_empty() {
        return Err(ServiceError::Invalid(format!(
            "CSV columns are not placeholders of the template: {}",
            unknown.join(", ")
        )));
    }
    Ok(())
}
