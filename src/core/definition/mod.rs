//! core::definition
//!
//! Input definitions: named schemas mapping incoming data onto frames and
//! fields, persisted as one descriptor file.
//!
//! # Modules
//!
//! - [`model`] - Frames, fields and actions
//! - [`meta`] - JSON transport shape
//! - [`wire`] - Protobuf records stored on disk
//! - [`codec`] - Model <-> file bytes
//!
//! # Storage
//!
//! A definition named `name` lives at `<path>/<name>`. The directory is
//! created on [`Definition::open`]; the file is replaced atomically on
//! [`Definition::save`].
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --open()--> Ready   (frames/fields loaded)
//!               \--open()--> Failed  (io, missing file, decode error)
//! Ready         --open()--> Ready | Failed   (reload)
//! Failed        terminal: discard and construct a new Definition
//! ```
//!
//! # Example
//!
//! ```no_run
//! use framedef::core::definition::Definition;
//! use framedef::core::definition::model::{Action, Field, Frame, FrameOptions};
//!
//! let mut def = Definition::new("/var/lib/framedef/idx", "idx", "default").unwrap();
//! def.open_or_init().unwrap();
//!
//! def.set_frames(vec![Frame::new("f1", FrameOptions::default().row_label("id"))]);
//! def.set_fields(vec![Field::new("age").with_action(Action::fixed_row("f1", 5))]);
//! def.save().unwrap();
//! ```

pub mod codec;
pub mod meta;
pub mod model;
pub mod wire;

pub use codec::{CodecError, Descriptor};
pub use meta::DefinitionMeta;
pub use model::{Action, Field, Frame, FrameOptions, ValueSource};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::naming::{DefaultNamePolicy, NameError, NamePolicy};

/// Errors from definition operations.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid definition name: {0}")]
    InvalidName(#[from] NameError),

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("descriptor not found: {path}")]
    NotFound { path: PathBuf },

    #[error("cannot decode descriptor '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("cannot encode definition '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: CodecError,
    },

    #[error("definition '{name}' failed to open and must be recreated")]
    Failed { name: String },
}

impl DefinitionError {
    /// Whether this error means the descriptor file does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DefinitionError::NotFound { .. })
    }
}

/// Where a definition is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionState {
    /// Constructed, nothing loaded yet.
    Uninitialized,
    /// Loaded (or initialized empty) and usable.
    Ready,
    /// A load failed; the instance must be discarded.
    Failed,
}

/// A named input definition bound to a storage directory.
///
/// Not synchronized. Callers owning a `Definition` serialize access to it,
/// and at most one process writes a given descriptor file.
#[derive(Debug)]
pub struct Definition {
    name: String,
    path: PathBuf,
    index: String,
    frames: Vec<Frame>,
    fields: Vec<Field>,
    state: DefinitionState,
    loaded_from: Option<PathBuf>,
}

impl Definition {
    /// Create a definition, validating `name` with [`DefaultNamePolicy`].
    ///
    /// No I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::InvalidName` if the name is rejected.
    pub fn new(
        path: impl Into<PathBuf>,
        index: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DefinitionError> {
        Self::with_policy(path, index, name, &DefaultNamePolicy)
    }

    /// Create a definition, validating `name` with `policy`.
    pub fn with_policy(
        path: impl Into<PathBuf>,
        index: impl Into<String>,
        name: impl Into<String>,
        policy: &dyn NamePolicy,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        policy.validate(&name)?;

        Ok(Self {
            name,
            path: path.into(),
            index: index.into(),
            frames: Vec::new(),
            fields: Vec::new(),
            state: DefinitionState::Uninitialized,
            loaded_from: None,
        })
    }

    /// Name of the definition.
    ///
    /// After a successful [`open`](Self::open) this is the name stored in
    /// the descriptor file, which may differ from the constructed one.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Directory holding the descriptor file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full path of the descriptor file, `<path>/<name>`.
    ///
    /// This is where [`save`](Self::save) writes. After a load that adopted
    /// a different stored name it is not the file that was read; see
    /// [`loaded_from`](Self::loaded_from).
    pub fn file_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }

    /// File the current frames and fields were read from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    pub fn state(&self) -> DefinitionState {
        self.state
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a frame by name.
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name == name)
    }

    /// Replace all frames.
    pub fn set_frames(&mut self, frames: Vec<Frame>) {
        self.frames = frames;
    }

    /// Replace all fields.
    pub fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    /// Frames and fields in transport shape.
    pub fn meta(&self) -> DefinitionMeta {
        DefinitionMeta::new(self.frames.clone(), self.fields.clone())
    }

    /// Replace frames and fields from a transport shape.
    pub fn apply_meta(&mut self, meta: DefinitionMeta) {
        self.frames = meta.frames;
        self.fields = meta.fields;
    }

    /// Snapshot of what [`save`](Self::save) would write.
    pub fn descriptor(&self) -> Descriptor {
        Descriptor {
            name: self.name.clone(),
            frames: self.frames.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Ensure the storage directory exists and load the descriptor file.
    ///
    /// On success frames, fields and name are replaced by the file's
    /// content. A stored name that is not a plain file name is rejected as
    /// a decode error. On failure frames and fields are left empty and the
    /// definition becomes [`DefinitionState::Failed`].
    ///
    /// # Errors
    ///
    /// - `Io` if the directory cannot be created or the file cannot be read
    /// - `NotFound` if the descriptor file does not exist
    /// - `Decode` if the file is not a valid descriptor
    /// - `Failed` if this definition already failed
    pub fn open(&mut self) -> Result<(), DefinitionError> {
        self.open_inner(false)
    }

    /// Like [`open`](Self::open), but a missing descriptor file yields an
    /// empty ready definition instead of `NotFound`. Nothing is written.
    pub fn open_or_init(&mut self) -> Result<(), DefinitionError> {
        self.open_inner(true)
    }

    fn open_inner(&mut self, allow_missing: bool) -> Result<(), DefinitionError> {
        self.check_usable()?;

        let file = self.file_path();
        let loaded = self.ensure_dir().and_then(|()| self.load(&file));
        match loaded {
            Ok(descriptor) => {
                if descriptor.name != self.name {
                    warn!(
                        constructed = %self.name,
                        stored = %descriptor.name,
                        "descriptor name differs from definition name"
                    );
                }
                debug!(
                    name = %descriptor.name,
                    index = %self.index,
                    frames = descriptor.frames.len(),
                    fields = descriptor.fields.len(),
                    "loaded definition"
                );
                self.name = descriptor.name;
                self.frames = descriptor.frames;
                self.fields = descriptor.fields;
                self.state = DefinitionState::Ready;
                self.loaded_from = Some(file);
                Ok(())
            }
            Err(err) if allow_missing && err.is_not_found() => {
                debug!(name = %self.name, index = %self.index, "initialized empty definition");
                self.frames.clear();
                self.fields.clear();
                self.state = DefinitionState::Ready;
                self.loaded_from = None;
                Ok(())
            }
            Err(err) => {
                self.frames.clear();
                self.fields.clear();
                self.state = DefinitionState::Failed;
                self.loaded_from = None;
                Err(err)
            }
        }
    }

    /// Write the descriptor file, replacing any previous content.
    ///
    /// The bytes go to `<name>.tmp` first and are renamed over `<name>`
    /// after an fsync, so readers see either the old or the new file.
    ///
    /// # Errors
    ///
    /// - `Io` on any filesystem failure
    /// - `Encode` if the descriptor cannot be encoded
    /// - `Failed` if this definition already failed
    pub fn save(&self) -> Result<(), DefinitionError> {
        self.check_usable()?;
        self.ensure_dir()?;

        let target = self.file_path();
        let bytes = codec::encode(&self.descriptor()).map_err(|source| DefinitionError::Encode {
            name: self.name.clone(),
            source,
        })?;

        // Same directory as the target so the rename stays on one filesystem.
        let temp = self.path.join(format!("{}.tmp", self.name));
        {
            let mut file = File::create(&temp).map_err(io_error(&temp))?;
            file.write_all(&bytes).map_err(io_error(&temp))?;
            file.sync_all().map_err(io_error(&temp))?;
        }
        fs::rename(&temp, &target).map_err(io_error(&target))?;

        debug!(
            name = %self.name,
            index = %self.index,
            bytes = bytes.len(),
            "saved definition"
        );
        Ok(())
    }

    fn check_usable(&self) -> Result<(), DefinitionError> {
        if self.state == DefinitionState::Failed {
            return Err(DefinitionError::Failed {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    fn ensure_dir(&self) -> Result<(), DefinitionError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }

        builder.create(&self.path).map_err(io_error(&self.path))
    }

    fn load(&self, file: &Path) -> Result<Descriptor, DefinitionError> {
        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DefinitionError::NotFound {
                    path: file.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(DefinitionError::Io {
                    path: file.to_path_buf(),
                    source,
                })
            }
        };

        codec::decode(&bytes).map_err(|source| DefinitionError::Decode {
            path: file.to_path_buf(),
            source,
        })
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> DefinitionError {
    let path = path.to_path_buf();
    move |source| DefinitionError::Io { path, source }
}
