use crate::error::ServiceError;
use common::model::template::Template;
use rusqlite::{params, Connection, OptionalExtension};

/// Inserts the template or replaces the stored version, bumping `updated_at`.
pub fn upsert_template(conn: &Connection, template: &Template) -> Result<(), ServiceError> {
    let placeholders = serde_json::to_string(&template.placeholders)?;
    conn.execute(
        "INSERT INTO templates (id, name, html, placeholders) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            html = excluded.html,
            placeholders = excluded.placeholders,
            updated_at = CURRENT_TIMESTAMP",
        params![&template.id, &template.name, &template.html, placeholders],
    )?;
    Ok(())
}

pub fn find_template(conn: &Connection, template_id: &str) -> Result<Template, ServiceError> {
    let row = conn
        .query_row(
            "SELECT id, name, html, placeholders FROM templates WHERE id = ?1",
            params![template_id],
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

    let (id, name, html, placeholders) =
        row.ok_or_else(|| ServiceError::NotFound(format!("Template {template_id}")))?;
    Ok(Template {
        id,
        name,
        html,
        placeholders: serde_json::from_str(&placeholders)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn banner() -> Template {
        Template {
            id: "t1".into(),
            name: "Banner".into(),
            html: r#"<a href="{{linkUrl}}">{{title}}</a>"#.into(),
            placeholders: vec!["linkUrl".into(), "title".into()],
        }
    }

    #[test]
    fn stores_and_reads_back() {
        let conn = open_in_memory();
        upsert_template(&conn, &banner()).unwrap();
        assert_eq!(find_template(&conn, "t1").unwrap(), banner());
    }

    #[test]
    fn upsert_replaces_existing_row() {
        let conn = open_in_memory();
        upsert_template(&conn, &banner()).unwrap();
        let mut edited = banner();
        edited.html = "{{linkUrl}}".into();
        edited.placeholders = vec!["linkUrl".into()];
        upsert_template(&conn, &edited).unwrap();
        assert_eq!(find_template(&conn, "t1").unwrap(), edited);
    }

    #[test]
    fn missing_template_is_not_found() {
        let conn = open_in_memory();
        assert!(matches!(
            find_template(&conn, "nope"),
            Err(ServiceError::NotFound(_))
        ));
    }
}
