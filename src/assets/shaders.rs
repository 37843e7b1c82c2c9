use log::{debug, warn};
use std::ffi::CStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Owned shader source bytes, always terminated by exactly one appended NUL so the buffer can
/// be handed to `glShaderSource` as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    bytes: Vec<u8>,
}

impl SourceText {
    pub fn from_bytes(mut contents: Vec<u8>) -> Self {
        contents.push(0);
        Self { bytes: contents }
    }

    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// The source bytes without the terminator.
    pub fn contents(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len_with_nul(&self) -> usize {
        self.bytes.len()
    }

    /// True when only the terminator is present.
    pub fn has_no_contents(&self) -> bool {
        self.contents().is_empty()
    }

    /// The text GL will see: everything up to the first NUL.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes).unwrap_or_default()
    }
}

impl From<&str> for SourceText {
    fn from(source: &str) -> Self {
        Self::from_bytes(source.as_bytes().to_vec())
    }
}

/// Reads a whole file as raw bytes and appends a NUL terminator.
///
/// Returns `None` when the file cannot be opened or read.
pub fn load_text<P: AsRef<Path>>(path: P) -> Option<SourceText> {
    let path = path.as_ref();
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Could not open {}: {}", path.display(), e);
            return None;
        }
    };

    let mut contents = Vec::new();
    if let Err(e) = file.read_to_end(&mut contents) {
        warn!("Could not read {}: {}", path.display(), e);
        return None;
    }

    let text = SourceText::from_bytes(contents);
    debug!(
        "Loaded {} bytes (with terminator) from {}",
        text.len_with_nul(),
        path.display()
    );
    Some(text)
}

/// Where one shader stage's text comes from.
#[derive(Debug, Clone, Copy)]
pub enum ShaderSource<'a> {
    Inline(&'a str),
    File(&'a Path),
}

impl ShaderSource<'_> {
    pub fn load(&self) -> Option<SourceText> {
        match self {
            ShaderSource::Inline(source) => Some(SourceText::from(*source)),
            ShaderSource::File(path) => load_text(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ShaderSource::Inline(_) => "inline source".to_string(),
            ShaderSource::File(path) => path.display().to_string(),
        }
    }
}
