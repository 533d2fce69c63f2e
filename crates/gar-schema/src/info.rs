//! Validation and persistence shared by every schema object.
//!
//! [`SchemaInfo`] is implemented by [`VertexInfo`](crate::VertexInfo),
//! [`EdgeInfo`](crate::EdgeInfo) and [`GraphInfo`](crate::GraphInfo). Encoding
//! is delegated to `serde_yaml` through a per-type document struct; bytes go
//! through a [`FileSystem`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SaveOptions;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, LocalFileSystem};

/// Validation and persistence protocol for schema objects.
pub trait SchemaInfo: Sized {
    /// Serialized document shape.
    type Document: Serialize + DeserializeOwned;

    /// Human-readable kind used in logs ("vertex", "edge", "graph").
    const KIND: &'static str;

    /// Identifier used in logs and errors.
    fn ident(&self) -> String;

    /// Checks every local structural invariant, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    fn validate(&self) -> Result<()>;

    /// Converts to the serialized document shape.
    fn to_document(&self) -> Self::Document;

    /// Rebuilds from a decoded document.
    ///
    /// Decoding does not validate: a structurally complete but invalid
    /// document loads and reports `is_validated() == false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be represented.
    fn from_document(doc: Self::Document) -> Result<Self>;

    /// Returns true if [`validate`](Self::validate) passes.
    fn is_validated(&self) -> bool {
        self.validate().is_ok()
    }

    /// Encodes to the textual (YAML) schema format.
    ///
    /// # Errors
    ///
    /// Returns `Encoding` if serialization fails.
    fn dump(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_document())?)
    }

    /// Decodes from the textual (YAML) schema format.
    ///
    /// # Errors
    ///
    /// Returns `Encoding` for malformed input.
    fn from_yaml(text: &str) -> Result<Self> {
        let doc: Self::Document = serde_yaml::from_str(text)?;
        Self::from_document(doc)
    }

    /// Writes the encoded schema through `fs`.
    ///
    /// # Errors
    ///
    /// `NotValidated` when `options.require_validated` is set and validation
    /// fails, `Encoding` or `Io` otherwise.
    fn save_with(&self, fs: &dyn FileSystem, path: &str, options: &SaveOptions) -> Result<()> {
        if options.require_validated {
            if let Err(err) = self.validate() {
                warn!(kind = Self::KIND, key = %self.ident(), error = %err, "refusing to save");
                return Err(Error::NotValidated(format!("{}: {err}", self.ident())));
            }
        }
        let text = self.dump()?;
        fs.write(path, text.as_bytes())?;
        debug!(kind = Self::KIND, key = %self.ident(), path, "saved schema");
        Ok(())
    }

    /// Writes the encoded schema to the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns `Encoding` or `Io` on failure.
    fn save(&self, path: &str) -> Result<()> {
        self.save_with(&LocalFileSystem, path, &SaveOptions::default())
    }

    /// Reads and decodes a schema through `fs`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the read fails, `Encoding` for malformed content.
    fn load_with(fs: &dyn FileSystem, path: &str) -> Result<Self> {
        let text = read_text(fs, path)?;
        let info = Self::from_yaml(&text)?;
        if let Err(err) = info.validate() {
            warn!(kind = Self::KIND, path, error = %err, "loaded schema does not validate");
        }
        Ok(info)
    }

    /// Reads and decodes a schema from the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the read fails, `Encoding` for malformed content.
    fn load(path: &str) -> Result<Self> {
        Self::load_with(&LocalFileSystem, path)
    }
}

pub(crate) fn read_text(fs: &dyn FileSystem, path: &str) -> Result<String> {
    let bytes = fs.read(path)?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("{path}: {e}")))
}
