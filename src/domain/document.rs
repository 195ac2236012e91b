use std::path::Path;

/// A file handed over by the user, alive for one interaction only.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: ContentType,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Jpeg,
    Png,
}

impl ContentType {
    pub const ACCEPTED_EXTENSIONS: [&'static str; 4] = ["pdf", "jpg", "jpeg", "png"];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl UploadedDocument {
    pub fn new(filename: String, content_type: ContentType, data: Vec<u8>) -> Self {
        Self {
            filename,
            content_type,
            data,
        }
    }

    /// Builds a document when the file name carries an accepted extension.
    pub fn from_upload(filename: String, data: Vec<u8>) -> Option<Self> {
        let content_type = ContentType::from_filename(&filename)?;
        Some(Self::new(filename, content_type, data))
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}
