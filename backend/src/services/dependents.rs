//! Glue between stored contents and the impact analyzer, shared by the
//! template and URL template services.

use crate::db;
use crate::error::ServiceError;
use common::model::content::{Content, DependentRecord};
use common::model::impact::ImpactReport;
use common::template_utils::{extract_placeholders, strip_removed_placeholders};
use log::info;
use rusqlite::Connection;

pub fn as_dependents(contents: &[Content]) -> Vec<DependentRecord> {
    contents.iter().cloned().map(DependentRecord::from).collect()
}

/// Deletes the values of removed placeholders from every affected content
/// and persists the ones that changed. Returns how many were updated.
///
/// `still_used` names the placeholders the content's other template keeps
/// using; those values survive even when this edit removed the placeholder.
pub fn strip_removed_values<F>(
    conn: &Connection,
    contents: Vec<Content>,
    report: &ImpactReport,
    mut still_used: F,
) -> Result<usize, ServiceError>
where
    F: FnMut(&Content) -> Result<Vec<String>, ServiceError>,
{
    let mut updated = 0;
    for mut content in contents {
        let Some(affected) = report
            .affected_contents
            .iter()
            .find(|affected| affected.id == content.id && !affected.removed.is_empty())
        else {
            continue;
        };
        let kept = still_used(&content)?;
        let removed: Vec<String> = affected
            .removed
            .iter()
            .filter(|name| !kept.contains(name))
            .cloned()
            .collect();
        if strip_removed_placeholders(&mut content.data, &removed) {
            db::contents::update_content_data(conn, &content.id, &content.data)?;
            info!(
                "Removed values for {} from content {}",
                removed.join(", "),
                content.id
            );
            updated += 1;
        }
    }
    Ok(updated)
}

/// Placeholders used by the content's URL template, if it has one.
pub fn used_by_url_template(conn: &Connection, content: &Content) -> Result<Vec<String>, ServiceError> {
    match &content.url_template_id {
        Some(id) => {
            let url_template = db::url_templates::find_url_template(conn, id)?;
            Ok(extract_placeholders(&url_template.url_template))
        }
        None => Ok(Vec::new()),
    }
}

/// Placeholders used by the content's HTML template.
pub fn used_by_template(conn: &Connection, content: &Content) -> Result<Vec<String>, ServiceError> {
    let template = db::templates::find_template(conn, &content.template_id)?;
    Ok(extract_placeholders(&template.html))
}

/// Declared placeholder list after an applied edit: removed names dropped,
/// added names appended, everything else kept in its original order.
pub fn update_declared(mut declared: Vec<String>, report: &ImpactReport) -> Vec<String> {
    declared.retain(|name| !report.removed_placeholders.contains(name));
    for added in &report.added_placeholders {
        if !declared.contains(added) {
            declared.push(added.clone());
        }
    }
    declared
}
