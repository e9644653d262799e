//! core::definition::codec
//!
//! Conversion between the in-memory model and descriptor file bytes.
//!
//! # File Format
//!
//! ```text
//! +--------+---------+-------------+------------------+-------------------+
//! | "FDEF" | version | payload_len | sha256(payload)  | payload           |
//! | 4 B    | 1 B     | u32 LE      | 32 B             | protobuf record   |
//! +--------+---------+-------------+------------------+-------------------+
//! ```
//!
//! The payload is a [`DescriptorRecord`]. Length and checksum are verified
//! before the payload is parsed.
//!
//! # Layers
//!
//! - [`encode_record`] / [`decode_record`] work on raw wire records and keep
//!   every stored field.
//! - [`encode`] / [`decode`] work on the typed [`Descriptor`]. Frames keep
//!   only their persisted options and frame options are validated; actions
//!   are carried field for field.
//!
//! Decoding is all-or-nothing: the first error aborts and nothing is
//! returned.

use std::path::{Component, Path};

use prost::Message;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::model::{Action, Field, Frame, FrameOptions};
use super::wire::{ActionRecord, DescriptorRecord, FieldRecord, FrameMetaRecord, FrameRecord};
use crate::core::types::{CacheType, TimeQuantum, TypeError};

/// File magic.
pub const MAGIC: &[u8; 4] = b"FDEF";

/// Current envelope version.
pub const FORMAT_VERSION: u8 = 1;

const CHECKSUM_LEN: usize = 32;
// magic + version + payload_len + checksum
const HEADER_LEN: usize = 4 + 1 + 4 + CHECKSUM_LEN;

/// Errors from encoding or decoding a descriptor.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("descriptor truncated: {len} bytes is shorter than the {} byte header", HEADER_LEN)]
    Truncated { len: usize },

    #[error("not a descriptor file (bad magic)")]
    BadMagic,

    #[error("unsupported descriptor format version {0}, supported: {}", FORMAT_VERSION)]
    UnsupportedVersion(u8),

    #[error("descriptor payload length mismatch: header says {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("descriptor checksum mismatch")]
    ChecksumMismatch,

    #[error("descriptor payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("malformed descriptor payload: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("frame '{frame}' has no options")]
    MissingFrameMeta { frame: String },

    #[error("stored name '{name}' is not a plain file name")]
    UnsafeName { name: String },

    #[error("invalid descriptor value: {0}")]
    InvalidValue(#[from] TypeError),
}

/// A decoded descriptor: the stored name plus ordered frames and fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub frames: Vec<Frame>,
    pub fields: Vec<Field>,
}

/// Encode a typed descriptor into file bytes.
pub fn encode(descriptor: &Descriptor) -> Result<Vec<u8>, CodecError> {
    encode_record(&to_record(descriptor))
}

/// Decode file bytes into a typed descriptor.
pub fn decode(bytes: &[u8]) -> Result<Descriptor, CodecError> {
    from_record(decode_record(bytes)?)
}

/// Encode a raw record into file bytes.
pub fn encode_record(record: &DescriptorRecord) -> Result<Vec<u8>, CodecError> {
    seal(&record.encode_to_vec())
}

/// Decode file bytes into a raw record.
pub fn decode_record(bytes: &[u8]) -> Result<DescriptorRecord, CodecError> {
    let payload = unseal(bytes)?;
    Ok(DescriptorRecord::decode(payload)?)
}

/// Hex SHA-256 of the payload recorded in a file's header.
///
/// Only the header is inspected; use [`decode`] to verify it.
pub fn stored_checksum(bytes: &[u8]) -> Result<String, CodecError> {
    check_header(bytes)?;
    let start = HEADER_LEN - CHECKSUM_LEN;
    Ok(hex::encode(&bytes[start..HEADER_LEN]))
}

/// Project a typed descriptor onto wire records.
pub fn to_record(descriptor: &Descriptor) -> DescriptorRecord {
    DescriptorRecord {
        name: descriptor.name.clone(),
        frames: descriptor.frames.iter().map(frame_to_record).collect(),
        fields: descriptor.fields.iter().map(field_to_record).collect(),
    }
}

/// Build a typed descriptor from wire records.
///
/// The stored name becomes the definition's file name, so it must be a
/// single path component.
pub fn from_record(record: DescriptorRecord) -> Result<Descriptor, CodecError> {
    if !is_plain_file_name(&record.name) {
        return Err(CodecError::UnsafeName { name: record.name });
    }

    let frames = record
        .frames
        .into_iter()
        .map(frame_from_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Descriptor {
        name: record.name,
        frames,
        fields: record.fields.into_iter().map(field_from_record).collect(),
    })
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

fn frame_to_record(frame: &Frame) -> FrameRecord {
    let options = &frame.options;
    FrameRecord {
        name: frame.name.clone(),
        meta: Some(FrameMetaRecord {
            row_label: options.row_label.clone(),
            inverse_enabled: options.inverse_enabled,
            cache_type: options.cache_type.as_str().to_string(),
            cache_size: options.cache_size,
            time_quantum: options.time_quantum.as_str().to_string(),
        }),
    }
}

fn frame_from_record(record: FrameRecord) -> Result<Frame, CodecError> {
    let meta = record.meta.ok_or_else(|| CodecError::MissingFrameMeta {
        frame: record.name.clone(),
    })?;

    // An empty cache type means the writer left it unset.
    let cache_type = if meta.cache_type.is_empty() {
        CacheType::default()
    } else {
        meta.cache_type.parse()?
    };

    let options = FrameOptions::default()
        .row_label(meta.row_label)
        .inverse_enabled(meta.inverse_enabled)
        .cache_type(cache_type)
        .cache_size(meta.cache_size)
        .time_quantum(TimeQuantum::new(meta.time_quantum)?);

    Ok(Frame::new(record.name, options))
}

fn field_to_record(field: &Field) -> FieldRecord {
    FieldRecord {
        name: field.name.clone(),
        primary_key: field.primary_key,
        actions: field
            .actions
            .iter()
            .map(|action| ActionRecord {
                frame: action.frame.clone(),
                value_destination: action.value_destination.clone(),
                value_map: action.value_map.clone(),
                row_id: action.row_id,
            })
            .collect(),
    }
}

fn field_from_record(record: FieldRecord) -> Field {
    let actions = record
        .actions
        .into_iter()
        .map(|a| Action {
            frame: a.frame,
            value_destination: a.value_destination,
            value_map: a.value_map,
            row_id: a.row_id,
        })
        .collect();

    Field {
        name: record.name,
        primary_key: record.primary_key,
        actions,
    }
}

fn seal(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| CodecError::PayloadTooLarge(payload.len()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&Sha256::digest(payload));
    out.extend_from_slice(payload);
    Ok(out)
}

fn check_header(bytes: &[u8]) -> Result<usize, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated { len: bytes.len() });
    }
    if &bytes[..4] != MAGIC {
        return Err(CodecError::BadMagic);
    }
    if bytes[4] != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(bytes[4]));
    }

    let len_bytes: [u8; 4] = [bytes[5], bytes[6], bytes[7], bytes[8]];
    Ok(u32::from_le_bytes(len_bytes) as usize)
}

fn unseal(bytes: &[u8]) -> Result<&[u8], CodecError> {
    let expected = check_header(bytes)?;
    let payload = &bytes[HEADER_LEN..];

    if payload.len() != expected {
        return Err(CodecError::LengthMismatch {
            expected,
            found: payload.len(),
        });
    }

    let stored = &bytes[HEADER_LEN - CHECKSUM_LEN..HEADER_LEN];
    if Sha256::digest(payload).as_slice() != stored {
        return Err(CodecError::ChecksumMismatch);
    }

    Ok(payload)
}
