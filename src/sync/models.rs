use serde::{Deserialize, Serialize};

/// One logical document under synchronization.
///
/// Field names match the relational store's column names; callers round-trip
/// rows from that store straight into sync batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocDescriptor {
    /// Classification keys forming part of the archive path.
    pub entity: String,
    pub workgroup: String,
    /// Stable identifier of the source document; also the artifact base name.
    pub google_id: String,
    /// Most recent working copy, if one has been made.
    #[serde(default)]
    pub latest_copy_g_id: Option<String>,
    /// Up to three working-copy identifiers, oldest first.
    #[serde(default)]
    pub all_copy_ids: Vec<String>,
}

/// An artifact committed to the archive during this batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommittedDoc {
    pub google_id: String,
    /// Repo-relative path of the committed artifact.
    pub path: String,
}

/// A working copy created during this batch, with the rotated history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CopiedDoc {
    pub google_id: String,
    pub new_copy_id: String,
    pub all_copy_ids: Vec<String>,
}

/// A row from the relational store's document listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRow {
    pub google_id: String,
    #[serde(default)]
    pub sharing_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_deserializes_full_row() {
        let json = r#"{
            "entity": "treasury-guild",
            "workgroup": "ops",
            "google_id": "1AbC",
            "latest_copy_g_id": "copy-3",
            "all_copy_ids": ["copy-1", "copy-2", "copy-3"]
        }"#;
        let doc: DocDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(doc.entity, "treasury-guild");
        assert_eq!(doc.workgroup, "ops");
        assert_eq!(doc.google_id, "1AbC");
        assert_eq!(doc.latest_copy_g_id.as_deref(), Some("copy-3"));
        assert_eq!(doc.all_copy_ids.len(), 3);
    }

    #[test]
    fn descriptor_copy_fields_default_when_absent() {
        let json = r#"{"entity": "e", "workgroup": "w", "google_id": "g"}"#;
        let doc: DocDescriptor = serde_json::from_str(json).unwrap();
        assert!(doc.latest_copy_g_id.is_none());
        assert!(doc.all_copy_ids.is_empty());
    }

    #[test]
    fn copied_doc_serializes_history() {
        let copied = CopiedDoc {
            google_id: "g".to_string(),
            new_copy_id: "c3".to_string(),
            all_copy_ids: vec!["c1".to_string(), "c2".to_string(), "c3".to_string()],
        };
        let value = serde_json::to_value(&copied).unwrap();
        assert_eq!(value["new_copy_id"], "c3");
        assert_eq!(value["all_copy_ids"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn doc_row_tolerates_null_sharing_status() {
        let row: DocRow =
            serde_json::from_str(r#"{"google_id": "g", "sharing_status": null}"#).unwrap();
        assert!(row.sharing_status.is_none());
    }
}
