//! core::definition::meta
//!
//! JSON transport shape for a definition's schema.
//!
//! [`DefinitionMeta`] carries the same frames and fields as the descriptor
//! file, in camelCase JSON suitable for clients:
//!
//! ```json
//! {
//!   "frames": [{"name": "f1", "options": {"rowLabel": "id", "cacheType": "ranked", "cacheSize": 1000}}],
//!   "fields": [{"name": "age", "actions": [{"frame": "f1", "valueDestination": "rowID", "rowID": 5}]}]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::model::{Field, Frame};

/// Frames and fields of a definition, without its identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionMeta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl DefinitionMeta {
    pub fn new(frames: Vec<Frame>, fields: Vec<Field>) -> Self {
        Self { frames, fields }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.fields.is_empty()
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Names of frames targeted by an action but not defined here.
    ///
    /// Dangling targets are legal; this is for reporting only.
    pub fn dangling_frames(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .fields
            .iter()
            .flat_map(|f| f.actions.iter())
            .map(|a| a.frame.as_str())
            .filter(|target| !self.frames.iter().any(|fr| fr.name == *target))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::model::{Action, FrameOptions, ValueSource};
    use crate::core::types::CacheType;

    fn sample() -> DefinitionMeta {
        DefinitionMeta::new(
            vec![Frame::new(
                "f1",
                FrameOptions::default()
                    .row_label("id")
                    .cache_type(CacheType::Ranked)
                    .cache_size(1000),
            )],
            vec![
                Field::new("age").with_action(Action::fixed_row("f1", 5)),
                Field::new("bucket").with_action(Action::mapped("f1", [("young", 1), ("old", 2)])),
            ],
        )
    }

    #[test]
    fn json_roundtrip() {
        let meta = sample();
        let json = meta.to_json_pretty().unwrap();
        let parsed = DefinitionMeta::from_json(&json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn parses_client_json() {
        let json = r#"{
            "frames": [
                {"name": "f1", "options": {"rowLabel": "id", "cacheType": "lru", "cacheSize": 1000, "timeQuantum": "YMD"}}
            ],
            "fields": [
                {"name": "id", "primaryKey": true},
                {"name": "age", "actions": [{"frame": "f1", "rowID": 5}]},
                {"name": "bucket", "actions": [
                    {"frame": "f1", "valueDestination": "valueMap", "valueMap": {"young": 1, "old": 2}}
                ]}
            ]
        }"#;

        let meta = DefinitionMeta::from_json(json).unwrap();
        assert_eq!(meta.frames[0].options.cache_type, CacheType::Lru);
        assert!(meta.frames[0].options.time_quantum.has_day());
        assert!(meta.fields[0].primary_key);
        assert_eq!(
            meta.fields[1].actions[0].source(),
            Some(ValueSource::FixedRow(5))
        );
        assert!(meta.fields[1].actions[0].value_destination.is_empty());
        assert_eq!(meta.fields[2].actions[0].row_for("old"), Some(2));
    }

    #[test]
    fn both_identifiers_survive_json() {
        let json = r#"{"fields": [{"name": "bucket", "actions": [
            {"frame": "f1", "valueDestination": "valueMap", "valueMap": {"young": 1}, "rowID": 42}
        ]}]}"#;

        let meta = DefinitionMeta::from_json(json).unwrap();
        let action = &meta.fields[0].actions[0];
        assert_eq!(action.row_id, 42);
        assert_eq!(action.value_map.get("young"), Some(&1));

        let again = DefinitionMeta::from_json(&meta.to_json_pretty().unwrap()).unwrap();
        assert_eq!(again, meta);
    }

    #[test]
    fn rejects_invalid_options() {
        let json = r#"{"frames": [{"name": "f1", "options": {"timeQuantum": "DY"}}]}"#;
        assert!(DefinitionMeta::from_json(json).is_err());

        let json = r#"{"frames": [{"name": "f1", "options": {"cacheType": "fifo"}}]}"#;
        assert!(DefinitionMeta::from_json(json).is_err());
    }

    #[test]
    fn empty_meta_serializes_to_empty_object() {
        let json = serde_json::to_string(&DefinitionMeta::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(DefinitionMeta::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn dangling_frames_reported() {
        let mut meta = sample();
        meta.fields
            .push(Field::new("x").with_action(Action::fixed_row("ghost", 1)));
        meta.fields
            .push(Field::new("y").with_action(Action::fixed_row("ghost", 2)));

        assert_eq!(meta.dangling_frames(), vec!["ghost"]);
    }
}
