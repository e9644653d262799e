//! core::definition::model
//!
//! In-memory metadata model: frames, fields and actions.
//!
//! # Value Sources
//!
//! An [`Action`] writes a field's value into a frame either at a fixed row
//! ([`ValueSource::FixedRow`]) or at a row looked up from a value table
//! ([`ValueSource::MappedValue`]). An action keeps its string destination
//! tag and both identifier sources exactly as stored;
//! [`Action::source`] picks the one the tag names.
//!
//! # Example
//!
//! ```
//! use framedef::core::definition::model::{Action, Field, Frame, FrameOptions, ValueSource};
//!
//! let frame = Frame::new("f1", FrameOptions::default());
//! let field = Field::new("age").with_action(Action::fixed_row("f1", 5));
//!
//! assert_eq!(field.actions[0].frame, frame.name);
//! assert_eq!(field.actions[0].source(), Some(ValueSource::FixedRow(5)));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{CacheType, TimeQuantum};

/// Stored destination tag for [`ValueSource::FixedRow`].
pub const DEST_ROW_ID: &str = "rowID";

/// Stored destination tag for [`ValueSource::MappedValue`].
pub const DEST_VALUE_MAP: &str = "valueMap";

/// Row label used when none is configured.
pub const DEFAULT_ROW_LABEL: &str = "rowID";

/// Cache size used when none is configured.
pub const DEFAULT_CACHE_SIZE: u32 = 50_000;

/// A named index structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,

    #[serde(default)]
    pub options: FrameOptions,
}

impl Frame {
    pub fn new(name: impl Into<String>, options: FrameOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// This frame with only the persisted options kept.
    pub fn persisted(&self) -> Frame {
        Frame {
            name: self.name.clone(),
            options: self.options.persisted(),
        }
    }
}

/// Frame options.
///
/// `row_label`, `inverse_enabled`, `cache_type`, `cache_size` and
/// `time_quantum` are written to the descriptor file. `range_enabled`
/// belongs to the frame's runtime configuration and is reset on reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameOptions {
    pub row_label: String,

    #[serde(skip_serializing_if = "is_false")]
    pub inverse_enabled: bool,

    pub cache_type: CacheType,

    pub cache_size: u32,

    #[serde(skip_serializing_if = "TimeQuantum::is_empty")]
    pub time_quantum: TimeQuantum,

    #[serde(skip)]
    pub range_enabled: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            row_label: DEFAULT_ROW_LABEL.to_string(),
            inverse_enabled: false,
            cache_type: CacheType::default(),
            cache_size: DEFAULT_CACHE_SIZE,
            time_quantum: TimeQuantum::empty(),
            range_enabled: false,
        }
    }
}

impl FrameOptions {
    pub fn row_label(mut self, label: impl Into<String>) -> Self {
        self.row_label = label.into();
        self
    }

    pub fn inverse_enabled(mut self, enabled: bool) -> Self {
        self.inverse_enabled = enabled;
        self
    }

    pub fn cache_type(mut self, cache_type: CacheType) -> Self {
        self.cache_type = cache_type;
        self
    }

    pub fn cache_size(mut self, size: u32) -> Self {
        self.cache_size = size;
        self
    }

    pub fn time_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.time_quantum = quantum;
        self
    }

    pub fn range_enabled(mut self, enabled: bool) -> Self {
        self.range_enabled = enabled;
        self
    }

    /// Copy of these options with non-persisted values reset to defaults.
    pub fn persisted(&self) -> FrameOptions {
        FrameOptions {
            range_enabled: false,
            ..self.clone()
        }
    }
}

/// A named input column and the actions applied to its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub primary_key: bool,

    /// Applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
            actions: Vec::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Where an action takes its row identifier from, as selected by its
/// destination tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource<'a> {
    /// Always write to this row.
    FixedRow(u64),
    /// Look the field's value up in this table to get the row.
    MappedValue(&'a BTreeMap<String, u64>),
}

impl ValueSource<'_> {
    /// The stored destination tag.
    pub fn destination(&self) -> &'static str {
        match self {
            ValueSource::FixedRow(_) => DEST_ROW_ID,
            ValueSource::MappedValue(_) => DEST_VALUE_MAP,
        }
    }

    /// Resolve the row for a raw field value.
    ///
    /// Fixed rows ignore the value; mapped sources return `None` for
    /// values missing from the table.
    pub fn row_for(&self, value: &str) -> Option<u64> {
        match self {
            ValueSource::FixedRow(row) => Some(*row),
            ValueSource::MappedValue(table) => table.get(value).copied(),
        }
    }
}

/// A field-to-frame translation rule.
///
/// Stored as written: the destination tag is an opaque string and both
/// identifier sources are kept even when the tag only uses one of them.
/// [`Action::source`] interprets the tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Action {
    /// Target frame name. Not checked against the definition's frames.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub frame: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_destination: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub value_map: BTreeMap<String, u64>,

    #[serde(rename = "rowID", skip_serializing_if = "is_zero")]
    pub row_id: u64,
}

impl Action {
    pub fn fixed_row(frame: impl Into<String>, row: u64) -> Self {
        Self {
            frame: frame.into(),
            value_destination: DEST_ROW_ID.to_string(),
            row_id: row,
            ..Default::default()
        }
    }

    pub fn mapped<K, I>(frame: impl Into<String>, table: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, u64)>,
    {
        Self {
            frame: frame.into(),
            value_destination: DEST_VALUE_MAP.to_string(),
            value_map: table.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    /// Set the row identifier without touching the destination tag.
    pub fn with_row_id(mut self, row: u64) -> Self {
        self.row_id = row;
        self
    }

    /// Interpret the destination tag.
    ///
    /// `"valueMap"` selects the table, `"rowID"` or an empty tag selects the
    /// row. Any other tag has no built-in meaning and yields `None`.
    pub fn source(&self) -> Option<ValueSource<'_>> {
        match self.value_destination.as_str() {
            DEST_VALUE_MAP => Some(ValueSource::MappedValue(&self.value_map)),
            DEST_ROW_ID | "" => Some(ValueSource::FixedRow(self.row_id)),
            _ => None,
        }
    }

    /// Resolve the row for a raw field value through [`Action::source`].
    pub fn row_for(&self, value: &str) -> Option<u64> {
        self.source()?.row_for(value)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    mod action {
        use super::*;

        #[test]
        fn constructors_set_tags() {
            let fixed = Action::fixed_row("f1", 5);
            assert_eq!(fixed.value_destination, DEST_ROW_ID);
            assert_eq!(fixed.source(), Some(ValueSource::FixedRow(5)));

            let mapped = Action::mapped("f1", [("young", 1), ("old", 2)]);
            assert_eq!(mapped.value_destination, DEST_VALUE_MAP);
            assert_eq!(mapped.source().map(|s| s.destination()), Some(DEST_VALUE_MAP));
        }

        #[test]
        fn empty_destination_means_fixed_row() {
            let action = Action {
                frame: "f1".into(),
                row_id: 9,
                ..Default::default()
            };

            assert_eq!(action.source(), Some(ValueSource::FixedRow(9)));
            assert!(action.value_destination.is_empty());
        }

        #[test]
        fn value_map_keeps_stray_row_id() {
            let action = Action::mapped("f1", [("young", 1)]).with_row_id(7);

            assert_eq!(action.row_id, 7);
            assert_eq!(action.row_for("young"), Some(1));
            assert_eq!(action.row_for("old"), None);
        }

        #[test]
        fn unknown_destination_is_kept_uninterpreted() {
            let action = Action {
                frame: "f1".into(),
                value_destination: "bitmap".into(),
                row_id: 3,
                ..Default::default()
            };

            assert_eq!(action.source(), None);
            assert_eq!(action.row_for("anything"), None);
            assert_eq!(action.value_destination, "bitmap");
        }

        #[test]
        fn row_for() {
            let fixed = ValueSource::FixedRow(3);
            assert_eq!(fixed.row_for("anything"), Some(3));

            let action = Action::mapped("f", [("young", 1)]);
            let mapped = action.source().unwrap();
            assert_eq!(mapped.row_for("young"), Some(1));
            assert_eq!(mapped.row_for("old"), None);
        }

        #[test]
        fn json_shape() {
            let json = serde_json::to_value(Action::fixed_row("f1", 5)).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"frame": "f1", "valueDestination": "rowID", "rowID": 5})
            );

            let json = serde_json::to_value(Action::mapped("f1", [("a", 1)]).with_row_id(4)).unwrap();
            assert_eq!(
                json,
                serde_json::json!({"frame": "f1", "valueDestination": "valueMap", "valueMap": {"a": 1}, "rowID": 4})
            );
        }

        #[test]
        fn json_keeps_unknown_destination() {
            let action: Action =
                serde_json::from_str(r#"{"frame":"f","valueDestination":"mapping","rowID":2}"#)
                    .unwrap();
            assert_eq!(action.value_destination, "mapping");
            assert_eq!(action.row_id, 2);
        }
    }

    mod frame_options {
        use super::*;

        #[test]
        fn defaults() {
            let options = FrameOptions::default();
            assert_eq!(options.row_label, DEFAULT_ROW_LABEL);
            assert_eq!(options.cache_type, CacheType::Ranked);
            assert_eq!(options.cache_size, DEFAULT_CACHE_SIZE);
            assert!(options.time_quantum.is_empty());
        }

        #[test]
        fn persisted_resets_runtime_options() {
            let options = FrameOptions::default().range_enabled(true).cache_size(10);
            let persisted = options.persisted();

            assert!(!persisted.range_enabled);
            assert_eq!(persisted.cache_size, 10);
        }

        #[test]
        fn json_omits_runtime_options() {
            let options = FrameOptions::default().range_enabled(true);
            let json = serde_json::to_value(&options).unwrap();

            assert!(json.get("rangeEnabled").is_none());
            assert!(json.get("inverseEnabled").is_none());
            assert_eq!(json["cacheType"], "ranked");
        }

        #[test]
        fn json_missing_keys_use_defaults() {
            let options: FrameOptions = serde_json::from_str(r#"{"rowLabel":"id"}"#).unwrap();
            assert_eq!(options.row_label, "id");
            assert_eq!(options.cache_size, DEFAULT_CACHE_SIZE);
        }
    }

    #[test]
    fn field_builder() {
        let field = Field::new("id")
            .primary_key()
            .with_action(Action::fixed_row("f1", 1))
            .with_action(Action::fixed_row("f2", 2));

        assert!(field.primary_key);
        assert_eq!(field.actions.len(), 2);
        assert_eq!(field.actions[1].frame, "f2");
    }
}
