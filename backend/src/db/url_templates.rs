use crate::error::ServiceError;
use common::model::url_template::UrlTemplate;
use rusqlite::{params, Connection, OptionalExtension};

pub fn upsert_url_template(conn: &Connection, url_template: &UrlTemplate) -> Result<(), ServiceError> {
    let placeholders = serde_json::to_string(&url_template.placeholders)?;
    conn.execute(
        "INSERT INTO url_templates (id, name, url_template, placeholders) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            url_template = excluded.url_template,
            placeholders = excluded.placeholders,
            updated_at = CURRENT_TIMESTAMP",
        params![
            &url_template.id,
            &url_template.name,
            &url_template.url_template,
            placeholders
        ],
    )?;
    Ok(())
}

pub fn find_url_template(conn: &Connection, id: &str) -> Result<UrlTemplate, ServiceError> {
    let row = conn
        .query_row(
            "SELECT id, name, url_template, placeholders FROM url_templates WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let (id, name, url_template, placeholders) =
        row.ok_or_else(|| ServiceError::NotFound(format!("URL template {id}")))?;
    Ok(UrlTemplate {
        id,
        name,
        url_template,
        placeholders: serde_json::from_str(&placeholders)?,
    })
}
