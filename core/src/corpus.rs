use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// A source of text that can be indexed. Two documents are the same document
/// iff their identifiers are equal.
pub trait Document: Send + Sync {
    /// Stable, human-readable identifier, e.g. `parent/name`.
    fn id(&self) -> &str;
    /// Open the text content for line-by-line reading.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// A document backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    id: String,
}

impl FileDocument {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => format!("{}/{}", parent.display(), name),
            None => name,
        };
        Self { path, id }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl Document for FileDocument {
    fn id(&self) -> &str { &self.id }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let f = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(f)))
    }
}

/// An in-memory document, handy for tests and for callers that already hold the text.
#[derive(Debug, Clone)]
pub struct TextDocument {
    id: String,
    text: String,
}

impl TextDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

impl Document for TextDocument {
    fn id(&self) -> &str { &self.id }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}
