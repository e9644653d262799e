//! core::definition::wire
//!
//! Protobuf records stored in the descriptor file payload.
//!
//! These are the raw on-disk shapes. They keep every stored field, including
//! an action carrying both a row ID and a value map; the typed model in
//! [`super::model`] resolves that through the destination tag.

use std::collections::BTreeMap;

/// Top-level descriptor message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DescriptorRecord {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub frames: Vec<FrameRecord>,
    #[prost(message, repeated, tag = "3")]
    pub fields: Vec<FieldRecord>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameRecord {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub meta: Option<FrameMetaRecord>,
}

/// Persisted frame options.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameMetaRecord {
    #[prost(string, tag = "1")]
    pub row_label: String,
    #[prost(bool, tag = "2")]
    pub inverse_enabled: bool,
    #[prost(string, tag = "3")]
    pub cache_type: String,
    #[prost(uint32, tag = "4")]
    pub cache_size: u32,
    #[prost(string, tag = "5")]
    pub time_quantum: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldRecord {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bool, tag = "2")]
    pub primary_key: bool,
    #[prost(message, repeated, tag = "3")]
    pub actions: Vec<ActionRecord>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionRecord {
    #[prost(string, tag = "1")]
    pub frame: String,
    #[prost(string, tag = "2")]
    pub value_destination: String,
    #[prost(btree_map = "string, uint64", tag = "3")]
    pub value_map: BTreeMap<String, u64>,
    #[prost(uint64, tag = "4")]
    pub row_id: u64,
}
