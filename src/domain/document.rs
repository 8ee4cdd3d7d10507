#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub declared_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Tiff,
    Bmp,
    Webp,
}

impl ImageFormat {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Tiff => "image/tiff",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Tiff => "tif",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Image(ImageFormat),
    Text,
    Unknown,
}

impl ContentType {
    /// Maps a declared media type; parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" | "application/x-pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Image(ImageFormat::Png)),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Image(ImageFormat::Jpeg)),
            "image/gif" => Some(Self::Image(ImageFormat::Gif)),
            "image/tiff" => Some(Self::Image(ImageFormat::Tiff)),
            "image/bmp" | "image/x-ms-bmp" => Some(Self::Image(ImageFormat::Bmp)),
            "image/webp" => Some(Self::Image(ImageFormat::Webp)),
            "text/plain" | "text/markdown" => Some(Self::Text),
            _ => None,
        }
    }

    /// Detects the format from leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const SIGNATURES: &[(&[u8], ContentType)] = &[
            (b"\x89PNG\r\n\x1a\n", ContentType::Image(ImageFormat::Png)),
            (b"\xff\xd8\xff", ContentType::Image(ImageFormat::Jpeg)),
            (b"GIF87a", ContentType::Image(ImageFormat::Gif)),
            (b"GIF89a", ContentType::Image(ImageFormat::Gif)),
            (b"II*\x00", ContentType::Image(ImageFormat::Tiff)),
            (b"MM\x00*", ContentType::Image(ImageFormat::Tiff)),
            (b"BM", ContentType::Image(ImageFormat::Bmp)),
        ];

        // PDF writers may put junk before the header, readers scan the first KiB.
        let head = &bytes[..bytes.len().min(1024)];
        if head.windows(5).any(|w| w == b"%PDF-") {
            return Some(Self::Pdf);
        }

        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(Self::Image(ImageFormat::Webp));
        }

        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|(_, content_type)| *content_type)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Image(format) => format.as_mime(),
            Self::Text => "text/plain",
            Self::Unknown => "application/octet-stream",
        }
    }
}

impl UploadedDocument {
    pub fn new(bytes: Vec<u8>, media_type: String, declared_name: String) -> Self {
        Self {
            bytes,
            media_type,
            declared_name,
        }
    }

    /// Declared media type wins; generic or missing declarations fall back to sniffing.
    pub fn content_type(&self) -> ContentType {
        ContentType::from_mime(&self.media_type)
            .or_else(|| ContentType::sniff(&self.bytes))
            .unwrap_or(ContentType::Unknown)
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}
