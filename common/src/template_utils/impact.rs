use super::placeholders::extract_placeholders;
use crate::model::content::DependentRecord;
use crate::model::impact::{AffectedContent, ImpactReport};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Diffs the placeholders of two versions of a template string and reports
/// which dependent records the edit touches.
///
/// Removals are reported per record only when the record actually stores a
/// value under that name. Additions are reported for every record, since
/// each one now needs a value from an editor. Records touched by neither are
/// left out. This function never writes anything; see
/// [`strip_removed_placeholders`] for the data cleanup the caller may persist.
pub fn analyze_changes(old: &str, new: &str, dependents: &[DependentRecord]) -> ImpactReport {
    let old_tokens: BTreeSet<String> = extract_placeholders(old).into_iter().collect();
    let new_tokens: BTreeSet<String> = extract_placeholders(new).into_iter().collect();

    let removed: Vec<String> = old_tokens.difference(&new_tokens).cloned().collect();
    let added: Vec<String> = new_tokens.difference(&old_tokens).cloned().collect();

    let affected_contents = dependents
        .iter()
        .filter_map(|record| {
            let removed_here: Vec<String> = removed
                .iter()
                .filter(|token| record.data.contains_key(token.as_str()))
                .cloned()
                .collect();
            if removed_here.is_empty() && added.is_empty() {
                return None;
            }
            Some(AffectedContent {
                id: record.id.clone(),
                name: record.name.clone(),
                removed: removed_here,
                added: added.clone(),
            })
        })
        .collect();

    ImpactReport {
        removed_placeholders: removed,
        added_placeholders: added,
        affected_contents,
    }
}

/// Drops the values of `removed` placeholders from a record's data.
/// Returns true when at least one key was present.
pub fn strip_removed_placeholders(data: &mut Map<String, Value>, removed: &[String]) -> bool {
    removed
        .iter()
        .fold(false, |changed, token| data.remove(token).is_some() || changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, data: Value) -> DependentRecord {
        DependentRecord {
            id: id.to_string(),
            name: format!("content {id}"),
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn reports_removed_and_added_per_record() {
        let dependents = vec![
            record("1", json!({"title": "x", "image": "y"})),
            record("2", json!({"title": "x"})),
        ];
        let report = analyze_changes("{{title}}{{image}}", "{{title}}{{price}}", &dependents);

        assert_eq!(report.removed_placeholders, vec!["image".to_string()]);
        assert_eq!(report.added_placeholders, vec!["price".to_string()]);
        assert_eq!(report.affected_contents.len(), 2);

        assert_eq!(report.affected_contents[0].id, "1");
        assert_eq!(report.affected_contents[0].removed, vec!["image".to_string()]);
        assert_eq!(report.affected_contents[0].added, vec!["price".to_string()]);

        assert_eq!(report.affected_contents[1].id, "2");
        assert!(report.affected_contents[1].removed.is_empty());
        assert_eq!(report.affected_contents[1].added, vec!["price".to_string()]);
    }

    #[test]
    fn records_untouched_by_a_pure_removal_are_skipped() {
        let dependents = vec![
            record("1", json!({"image": "y"})),
            record("2", json!({"title": "x"})),
        ];
        let report = analyze_changes("{{title}}{{image}}", "{{title}}", &dependents);
        assert_eq!(report.affected_contents.len(), 1);
        assert_eq!(report.affected_contents[0].id, "1");
    }

    #[test]
    fn no_dependents_means_no_affected_contents() {
        let report = analyze_changes("{{a}}", "{{b}}", &[]);
        assert!(report.affected_contents.is_empty());
        assert!(!report.is_unchanged());
    }

    #[test]
    fn whitespace_only_edits_change_nothing() {
        let report = analyze_changes("{{ title }}", "<b>{{title}}</b>", &[record("1", json!({}))]);
        assert!(report.is_unchanged());
        assert!(report.affected_contents.is_empty());
    }

    #[test]
    fn serializes_in_camel_case() {
        let report = analyze_changes("{{a}}", "{{b}}", &[]);
        let value = serde_json::to_value(&report).unwrap_or_default();
        assert_eq!(value["removedPlaceholders"], json!(["a"]));
        assert_eq!(value["addedPlaceholders"], json!(["b"]));
        assert_eq!(value["affectedContents"], json!([]));
    }

    #[test]
    fn strips_only_present_keys() {
        let mut data = json!({"title": "x", "image": "y"})
            .as_object()
            .cloned()
            .unwrap_or_default();
        assert!(strip_removed_placeholders(
            &mut data,
            &["image".to_string(), "logo".to_string()]
        ));
        assert!(!data.contains_key("image"));
        assert!(data.contains_key("title"));
        assert!(!strip_removed_placeholders(&mut data, &["logo".to_string()]));
    }
}
