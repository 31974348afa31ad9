//! File import dispatch: routes files to the matching importer by extension.

use std::path::Path;
use wave_core::Surface;

/// Importable file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Svg,
    Obj,
    Text,
    Unknown,
}

impl FileType {
    /// Detect file type from extension string (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "svg" => FileType::Svg,
            "obj" => FileType::Obj,
            "txt" | "text" => FileType::Text,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

/// Import a file given its raw data and file extension.
///
/// The extension should not include the leading dot.
pub fn parse_file(data: &[u8], extension: &str) -> Result<Surface, String> {
    parse_file_typed(data, FileType::from_extension(extension))
}

/// Import a file given its raw data and known file type.
pub fn parse_file_typed(data: &[u8], file_type: FileType) -> Result<Surface, String> {
    match file_type {
        FileType::Svg => crate::svg::parse_svg(data),
        FileType::Obj => crate::obj::parse_obj(data),
        FileType::Text => {
            let text = std::str::from_utf8(data).map_err(|e| format!("invalid UTF-8: {e}"))?;
            crate::text::parse_text(text, &crate::text::TextConfig::default())
        }
        FileType::Unknown => Err("unknown file type".to_string()),
    }
}

/// Read and import a file from disk.
pub fn load_file(path: &Path) -> Result<Surface, String> {
    let data = std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_file_typed(&data, FileType::from_path(path))
}
