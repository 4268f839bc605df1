//! Report — human-readable one-line descriptions of filesystem paths.

use std::io::Read;
use std::path::Path;

/// Content kind sniffed from a file's leading bytes.
///
/// Detectors run in order, most specific first; UTF-8 text is the
/// next-to-last resort and opaque binary the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Gzip,
    Zip,
    Png,
    Jpeg,
    Pdf,
    Elf,
    Text,
    Binary,
}

impl PathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathKind::Gzip => "gzip data",
            PathKind::Zip => "zip archive",
            PathKind::Png => "PNG image",
            PathKind::Jpeg => "JPEG image",
            PathKind::Pdf => "PDF document",
            PathKind::Elf => "ELF binary",
            PathKind::Text => "text",
            PathKind::Binary => "binary",
        }
    }

    fn sniff(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            PathKind::Gzip
        } else if prefix.starts_with(b"PK\x03\x04") {
            PathKind::Zip
        } else if prefix.starts_with(&[0x89, b'P', b'N', b'G']) {
            PathKind::Png
        } else if prefix.starts_with(&[0xff, 0xd8, 0xff]) {
            PathKind::Jpeg
        } else if prefix.starts_with(b"%PDF") {
            PathKind::Pdf
        } else if prefix.starts_with(&[0x7f, b'E', b'L', b'F']) {
            PathKind::Elf
        } else if std::str::from_utf8(prefix).is_ok() {
            PathKind::Text
        } else {
            PathKind::Binary
        }
    }
}

/// Format a file size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Build a one-line report on a path: size, sniffed content kind, and a
/// caller-supplied message, e.g. `wrote manifest (1.2 KB, text): '/tmp/m.json'`.
pub fn describe_path(path: impl AsRef<Path>, message: &str) -> Result<String, std::io::Error> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();

    // 2 KiB is enough for every magic-byte prefix and a fair text sample.
    let mut prefix = vec![0u8; 2048];
    let mut file = std::fs::File::open(path)?;
    let read = file.read(&mut prefix)?;
    prefix.truncate(read);

    let kind = PathKind::sniff(&prefix);

    Ok(format!(
        "{} ({}, {}): '{}'",
        message,
        format_size(size),
        kind.as_str(),
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── format_size ──────────────────────────────────────────────

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
        assert_eq!(format_size(1073741824), "1.0 GB");
        assert_eq!(format_size(1099511627776), "1.0 TB");
    }

    // ── PathKind sniffing ────────────────────────────────────────

    #[test]
    fn test_sniff_gzip() {
        assert_eq!(PathKind::sniff(&[0x1f, 0x8b, 0x08, 0x00]), PathKind::Gzip);
    }

    #[test]
    fn test_sniff_pdf() {
        assert_eq!(PathKind::sniff(b"%PDF-1.7"), PathKind::Pdf);
    }

    #[test]
    fn test_sniff_text() {
        assert_eq!(PathKind::sniff(b"hello, world\n"), PathKind::Text);
    }

    #[test]
    fn test_sniff_binary_fallback() {
        assert_eq!(PathKind::sniff(&[0x00, 0xfe, 0xfa, 0x99]), PathKind::Binary);
    }

    #[test]
    fn test_sniff_empty_is_text() {
        // An empty prefix is valid UTF-8; empty files read as text.
        assert_eq!(PathKind::sniff(&[]), PathKind::Text);
    }

    // ── describe_path ────────────────────────────────────────────

    #[test]
    fn test_describe_path_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"five!")
            .unwrap();

        let report = describe_path(&path, "wrote report").unwrap();
        assert_eq!(
            report,
            format!("wrote report (5 B, text): '{}'", path.display())
        );
    }

    #[test]
    fn test_describe_path_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(describe_path(&missing, "x").is_err());
    }
}
