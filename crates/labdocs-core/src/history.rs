//! Append-only change ledger for template content
//!
//! Each write compares two JSON snapshots and stores one row per top-level field
//! whose value differs. Rows are only ever inserted.

use std::collections::BTreeSet;

use chrono::Utc;
use labdocs_db::entities::template_change_history::{self, ChangeContext};
use labdocs_db::entities::template_version;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};
use serde_json::{json, Value};
use uuid::Uuid;

/// Field name used when a snapshot is not a JSON object
pub const ROOT_FIELD: &str = "$root";

/// One changed field between two snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Top-level differences between `old` and `new`
///
/// Missing keys and explicit `null` are treated alike. Fields are returned in
/// key order.
pub fn diff_fields(old: Option<&Value>, new: Option<&Value>) -> Vec<FieldChange> {
    let old = non_null(old);
    let new = non_null(new);

    match (old, new) {
        (None | Some(Value::Object(_)), Some(Value::Object(new_map))) => {
            let empty = serde_json::Map::new();
            let old_map = match old {
                Some(Value::Object(map)) => map,
                _ => &empty,
            };

            let keys: BTreeSet<&String> = old_map.keys().chain(new_map.keys()).collect();
            keys.into_iter()
                .filter_map(|key| {
                    let before = non_null(old_map.get(key));
                    let after = non_null(new_map.get(key));
                    (before != after).then(|| FieldChange {
                        field: key.clone(),
                        old: before.cloned(),
                        new: after.cloned(),
                    })
                })
                .collect()
        }
        (before, after) if before != after => vec![FieldChange {
            field: ROOT_FIELD.to_string(),
            old: before.cloned(),
            new: after.cloned(),
        }],
        _ => Vec::new(),
    }
}

/// Snapshot of the ledger-tracked fields of a template version
pub fn version_snapshot(version: &template_version::Model) -> Value {
    json!({
        "version": version.full_version,
        "is_current": version.is_current,
        "change_type": version.change_type,
        "message": version.message,
        "content": version.content,
        "form_fields": version.form_fields,
    })
}

/// Write ledger rows for the differences between `old` and `new`
pub(crate) async fn record_changes<C: ConnectionTrait>(
    conn: &C,
    template_id: Uuid,
    template_version_id: Uuid,
    context: ChangeContext,
    old: Option<&Value>,
    new: &Value,
    actor: Uuid,
) -> Result<Vec<template_change_history::Model>, DbErr> {
    let now = Utc::now();
    let mut rows = Vec::new();

    for change in diff_fields(old, Some(new)) {
        let row = template_change_history::ActiveModel {
            template_id: Set(template_id),
            template_version_id: Set(template_version_id),
            change_context: Set(context),
            field_name: Set(change.field),
            old_value: Set(change.old),
            new_value: Set(change.new),
            changed_by: Set(actor),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_reports_only_changed_fields() {
        let old = json!({"title": "Scope", "pages": 3, "owner": "QA"});
        let new = json!({"title": "Scope", "pages": 4, "reviewer": "QC"});

        let changes = diff_fields(Some(&old), Some(&new));
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["owner", "pages", "reviewer"]);

        let pages = &changes[1];
        assert_eq!(pages.old, Some(json!(3)));
        assert_eq!(pages.new, Some(json!(4)));

        let owner = &changes[0];
        assert_eq!(owner.new, None);
    }

    #[test]
    fn test_diff_against_nothing_lists_every_set_field() {
        let new = json!({"content": {"a": 1}, "message": null, "version": "1.0"});
        let changes = diff_fields(None, Some(&new));
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["content", "version"]);
        assert!(changes.iter().all(|c| c.old.is_none()));
    }

    #[test]
    fn test_diff_of_scalars_uses_root_field() {
        let changes = diff_fields(Some(&json!("v1")), Some(&json!("v2")));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, ROOT_FIELD);

        assert!(diff_fields(Some(&json!(5)), Some(&json!(5))).is_empty());
    }

    #[test]
    fn test_identical_snapshots_produce_no_rows() {
        let snap = json!({"content": [1, 2, 3]});
        assert!(diff_fields(Some(&snap), Some(&snap)).is_empty());
    }
}
