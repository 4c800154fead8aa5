use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::error::ValidateError;
use crate::probe::ImageSource;

#[derive(Clone, Debug)]
enum Source {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A creative handed over for validation: name, MIME type, byte length and
/// where to read its bytes from.
#[derive(Clone, Debug)]
pub struct CreativeFile {
    name: String,
    mime: String,
    size: u64,
    source: Source,
}

impl CreativeFile {
    /// Stats `path` and guesses the MIME type from its extension. Bytes are
    /// read later, and only if a check needs them.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ValidateError> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|source| ValidateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string();
        Ok(Self {
            name,
            mime,
            size: meta.len(),
            source: Source::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            source: Source::Memory(bytes),
        }
    }

    /// Overrides the guessed MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime.starts_with("video/")
    }

    /// Uppercased text after the last dot of the file name.
    pub fn extension(&self) -> Option<String> {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext.to_ascii_uppercase()),
            _ => None,
        }
    }

    /// Opens the creative for streaming reads; files on disk are buffered,
    /// never loaded whole.
    pub fn reader(&self) -> Result<Box<dyn ImageSource + '_>, ValidateError> {
        match &self.source {
            Source::Memory(b) => Ok(Box::new(Cursor::new(b.as_slice()))),
            Source::Path(p) => {
                let file = std::fs::File::open(p).map_err(|source| ValidateError::Io { path: p.clone(), source })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_uppercased_last_segment() {
        let f = CreativeFile::from_bytes("summer.sale.jpg", "image/jpeg", vec![]);
        assert_eq!(f.extension().as_deref(), Some("JPG"));
    }

    #[test]
    fn extension_missing() {
        assert_eq!(CreativeFile::from_bytes("banner", "image/png", vec![]).extension(), None);
        assert_eq!(CreativeFile::from_bytes("banner.", "image/png", vec![]).extension(), None);
    }

    #[test]
    fn mime_families() {
        let f = CreativeFile::from_bytes("a.mp4", "video/mp4", vec![1, 2, 3]);
        assert!(f.is_video());
        assert!(!f.is_image());
        assert_eq!(f.size(), 3);
        let f = f.with_mime("image/gif");
        assert!(f.is_image());
    }

    #[test]
    fn open_guesses_mime_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.MP4");
        std::fs::write(&path, [0u8; 42]).unwrap();
        let f = CreativeFile::open(&path).unwrap();
        assert_eq!(f.name(), "clip.MP4");
        assert_eq!(f.mime(), "video/mp4");
        assert_eq!(f.size(), 42);
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut f.reader().unwrap(), &mut buf).unwrap();
        assert_eq!(buf.len(), 42);
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CreativeFile::open(dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, ValidateError::Io { .. }));
    }
}
