//! Capture-tag decoders for images
//!
//! Every decoder answers one question: "does this file carry a capture
//! date tag, and what is its raw value?". Any failure (unsupported
//! format, corrupt data, missing tag) is reported uniformly as `None`.

use exif::{In, Reader, Tag, Value};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// EXIF tags to try for date extraction, in priority order
const DATE_TAGS: &[Tag] = &[
    Tag::DateTimeOriginal,    // When the original image was taken
    Tag::DateTimeDigitized,   // When the image was created/digitized
    Tag::DateTime,            // Generic date/time
];

/// Something that can pull a raw capture-date tag out of a file
pub trait CaptureTagDecoder {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Return the raw tag value, or `None` on any failure
    fn read_capture_tag(&self, path: &Path) -> Option<String>;
}

/// EXIF reader for every container kamadak-exif understands
/// (JPEG, TIFF, PNG, WebP, HEIF/HEIC)
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifContainerDecoder;

impl CaptureTagDecoder for ExifContainerDecoder {
    fn name(&self) -> &'static str {
        "exif"
    }

    fn read_capture_tag(&self, path: &Path) -> Option<String> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                trace!(?path, error = %e, "Cannot open file for EXIF");
                return None;
            }
        };
        let mut reader = BufReader::new(file);

        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(e) => {
                trace!(?path, error = %e, "No readable EXIF data");
                return None;
            }
        };

        for tag in DATE_TAGS {
            let Some(field) = exif.get_field(*tag, In::PRIMARY) else {
                continue;
            };
            if let Some(value) = first_ascii(&field.value) {
                trace!(?path, ?tag, %value, "Found EXIF date tag");
                return Some(value);
            }
        }

        None
    }
}

/// First non-empty ASCII component of a tag value
fn first_ascii(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    parts
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes).trim_matches(['\0', ' ']).to_string())
        .find(|s| !s.is_empty())
}

/// Ordered set of decoders, tried first to last
pub struct DecoderSet {
    decoders: Vec<Box<dyn CaptureTagDecoder + Send + Sync>>,
}

impl DecoderSet {
    /// A set with no decoders; every lookup falls through
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// The decoders this tool ships with
    pub fn standard() -> Self {
        Self::empty().with(ExifContainerDecoder)
    }

    /// Append a decoder at the lowest priority
    pub fn with<D>(mut self, decoder: D) -> Self
    where
        D: CaptureTagDecoder + Send + Sync + 'static,
    {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Decoder names in priority order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.iter().map(|d| d.name())
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Ask each decoder in turn; the first hit wins
    pub fn try_read_capture_tag(&self, path: &Path) -> Option<(&'static str, String)> {
        self.decoders
            .iter()
            .find_map(|d| d.read_capture_tag(path).map(|value| (d.name(), value)))
    }
}

impl Default for DecoderSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for DecoderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Fixtures for building images with EXIF date tags
#[cfg(test)]
pub(crate) mod test_support {
    use exif::experimental::Writer;
    use exif::{Field, In, Tag, Value};
    use std::io::Cursor;

    /// Serialize the given ASCII tags into a bare TIFF/EXIF blob
    pub fn tiff_with_tags(tags: &[(Tag, &str)]) -> Vec<u8> {
        let fields: Vec<Field> = tags
            .iter()
            .map(|(tag, value)| Field {
                tag: *tag,
                ifd_num: In::PRIMARY,
                value: Value::Ascii(vec![value.as_bytes().to_vec()]),
            })
            .collect();

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();
        buf.into_inner()
    }

    /// Wrap the tags in a minimal JPEG (SOI, APP1 Exif, EOI)
    pub fn jpeg_with_tags(tags: &[(Tag, &str)]) -> Vec<u8> {
        let tiff = tiff_with_tags(tags);
        let len = u16::try_from(2 + 6 + tiff.len()).unwrap();

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{jpeg_with_tags, tiff_with_tags};
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct Fixed(&'static str, Option<&'static str>);

    impl CaptureTagDecoder for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn read_capture_tag(&self, _path: &Path) -> Option<String> {
            self.1.map(str::to_string)
        }
    }

    #[test]
    fn test_original_date_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(
            &path,
            jpeg_with_tags(&[
                (Tag::DateTime, "2024:12:31 23:59:59"),
                (Tag::DateTimeDigitized, "2023:06:01 08:00:00"),
                (Tag::DateTimeOriginal, "2023:05:10 14:22:01"),
            ]),
        )
        .unwrap();

        let value = ExifContainerDecoder.read_capture_tag(&path);
        assert_eq!(value.as_deref(), Some("2023:05:10 14:22:01"));
    }

    #[test]
    fn test_tag_priority_fallthrough() {
        let dir = tempdir().unwrap();

        let digitized = dir.path().join("digitized.jpg");
        fs::write(
            &digitized,
            jpeg_with_tags(&[
                (Tag::DateTime, "2024:12:31 23:59:59"),
                (Tag::DateTimeDigitized, "2023:06:01 08:00:00"),
            ]),
        )
        .unwrap();
        assert_eq!(
            ExifContainerDecoder.read_capture_tag(&digitized).as_deref(),
            Some("2023:06:01 08:00:00")
        );

        let generic = dir.path().join("generic.tiff");
        fs::write(&generic, tiff_with_tags(&[(Tag::DateTime, "2021:02:03 04:05:06")])).unwrap();
        assert_eq!(
            ExifContainerDecoder.read_capture_tag(&generic).as_deref(),
            Some("2021:02:03 04:05:06")
        );
    }

    #[test]
    fn test_unreadable_files() {
        let dir = tempdir().unwrap();

        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"\x00\x00\x00\x18ftypmp42not really a movie").unwrap();
        assert!(ExifContainerDecoder.read_capture_tag(&video).is_none());

        let no_dates = dir.path().join("plain.jpg");
        fs::write(&no_dates, jpeg_with_tags(&[(Tag::Make, "Camera")])).unwrap();
        assert!(ExifContainerDecoder.read_capture_tag(&no_dates).is_none());

        let blank = dir.path().join("blank.jpg");
        fs::write(&blank, jpeg_with_tags(&[(Tag::DateTimeOriginal, "")])).unwrap();
        assert!(ExifContainerDecoder.read_capture_tag(&blank).is_none());

        assert!(ExifContainerDecoder.read_capture_tag(&dir.path().join("gone.jpg")).is_none());
    }

    #[test]
    fn test_decoder_set_order() {
        let path = Path::new("unused.jpg");

        let set = DecoderSet::empty()
            .with(Fixed("none", None))
            .with(Fixed("first", Some("2020:01:01 00:00:00")))
            .with(Fixed("second", Some("2019:01:01 00:00:00")));

        assert_eq!(set.names().collect::<Vec<_>>(), vec!["none", "first", "second"]);
        assert_eq!(
            set.try_read_capture_tag(path),
            Some(("first", "2020:01:01 00:00:00".to_string()))
        );

        assert!(DecoderSet::empty().try_read_capture_tag(path).is_none());
        assert_eq!(format!("{:?}", DecoderSet::standard()), "[\"exif\"]");
    }
}
