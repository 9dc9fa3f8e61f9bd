use crate::{ClientError, Result};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves query template names to XQuery text.
///
/// Implementations fail with [`ClientError::TemplateNotFound`] when no template has the given name.
pub trait QueryTemplates {
    /// Returns the text of the named template.
    fn load(&self, name: &str) -> Result<String>;
}

impl<T: QueryTemplates + ?Sized> QueryTemplates for &T {
    fn load(&self, name: &str) -> Result<String> {
        (**self).load(name)
    }
}

impl<T: QueryTemplates + ?Sized> QueryTemplates for Arc<T> {
    fn load(&self, name: &str) -> Result<String> {
        (**self).load(name)
    }
}

/// Templates held in memory.
///
/// # Example
/// ```
/// use basex_rest::{MemoryTemplates, QueryTemplates};
///
/// let templates = MemoryTemplates::new().with("IdExists", "exists(db:get($dbname)//*[@xml:id = $xmlId])");
/// assert!(templates.load("IdExists").is_ok());
/// assert!(templates.load("GetBook").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    templates: HashMap<String, String>,
}

impl MemoryTemplates {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template and returns the store back, for chaining.
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    /// Registers a template, replacing any previous one of the same name.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }
}

impl QueryTemplates for MemoryTemplates {
    fn load(&self, name: &str) -> Result<String> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::TemplateNotFound { name: name.to_owned() })
    }
}

/// Templates stored as files named `{name}.xquery` in a directory.
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
    root: PathBuf,
    extension: String,
}

impl TemplateDirectory {
    /// Default extension of template files.
    pub const EXTENSION: &'static str = "xquery";

    /// Looks templates up in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: Self::EXTENSION.to_owned(),
        }
    }

    /// Uses another file extension, given without the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The directory templates are looked up in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the named template.
    ///
    /// Names that would step outside the directory resolve to nothing.
    pub(crate) fn path_of(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ClientError::TemplateNotFound { name: name.to_owned() });
        }
        Ok(self.root.join(format!("{}.{}", name, self.extension)))
    }
}

/// Maps a failed template read to [`ClientError::TemplateNotFound`] or [`ClientError::Template`].
pub(crate) fn read_error(name: &str, error: io::Error) -> ClientError {
    match error.kind() {
        io::ErrorKind::NotFound => ClientError::TemplateNotFound { name: name.to_owned() },
        _ => ClientError::Template(error),
    }
}

impl QueryTemplates for TemplateDirectory {
    fn load(&self, name: &str) -> Result<String> {
        let path = self.path_of(name)?;
        std::fs::read_to_string(&path).map_err(|e| read_error(name, e))
    }
}
