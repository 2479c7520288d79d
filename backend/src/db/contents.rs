use crate::error::ServiceError;
use common::model::content::Content;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};

const SELECT_CONTENT: &str =
    "SELECT id, name, template_id, url_template_id, data FROM contents";

type ContentRow = (String, String, String, Option<String>, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<ContentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn into_content(
    (id, name, template_id, url_template_id, data): ContentRow,
) -> Result<Content, ServiceError> {
    Ok(Content {
        id,
        name,
        template_id,
        url_template_id,
        data: serde_json::from_str(&data)?,
    })
}

pub fn upsert_content(conn: &Connection, content: &Content) -> Result<(), ServiceError> {
    let data = serde_json::to_string(&content.data)?;
    conn.execute(
        "INSERT INTO contents (id, name, template_id, url_template_id, data)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            template_id = excluded.template_id,
            url_template_id = excluded.url_template_id,
            data = excluded.data,
            updated_at = CURRENT_TIMESTAMP",
        params![
            &content.id,
            &content.name,
            &content.template_id,
            &content.url_template_id,
            data
        ],
    )?;
    Ok(())
}

pub fn find_content(conn: &Connection, content_id: &str) -> Result<Content, ServiceError> {
    let row = conn
        .query_row(
            &format!("{SELECT_CONTENT} WHERE id = ?1"),
            params![content_id],
            read_row,
        )
        .optional()?
        .ok_or_else(|| ServiceError::NotFound(format!("Content {content_id}")))?;
    into_content(row)
}

fn contents_where(conn: &Connection, column: &str, id: &str) -> Result<Vec<Content>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_CONTENT} WHERE {column} = ?1 ORDER BY name, id"
    ))?;
    let rows = stmt
        .query_map(params![id], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(into_content).collect()
}

/// Contents rendered with the given ad template.
pub fn contents_for_template(
    conn: &Connection,
    template_id: &str,
) -> Result<Vec<Content>, ServiceError> {
    contents_where(conn, "template_id", template_id)
}

/// Contents whose link is built from the given URL template.
pub fn contents_for_url_template(
    conn: &Connection,
    url_template_id: &str,
) -> Result<Vec<Content>, ServiceError> {
    contents_where(conn, "url_template_id", url_template_id)
}

/// Replaces a content's data and marks it updated.
pub fn update_content_data(
    conn: &Connection,
    content_id: &str,
    data: &Map<String, Value>,
) -> Result<(), ServiceError> {
    let changed = conn.execute(
        "UPDATE contents SET data = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
        params![serde_json::to_string(data)?, content_id],
    )?;
    if changed == 0 {
        return Err(ServiceError::NotFound(format!("Content {content_id}")));
    }
    Ok(())
}
