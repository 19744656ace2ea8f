//! Version and container detection.
//!
//! Probes run in a fixed order and the first match wins:
//!
//! 1. OLE compound document holding a known index or presentation stream
//! 2. zip package holding `index.apxl`
//! 3. gzip/zlib compressed XML, sniffed after inflating
//! 4. bare XML, sniffed from the root element
//!
//! The input stream is re-sought to its start afterwards, so detection never
//! invalidates it for the real parse.

mod sniff;
mod version;

use std::io::SeekFrom;

use crate::common::{Error, ParseOptions, Result};
#[cfg(feature = "ole")]
use crate::stream::OleStream;
#[cfg(feature = "ole")]
use crate::stream::ole::is_ole_file;
#[cfg(feature = "zip")]
use crate::stream::ZipStream;
use crate::stream::inflate::Compression;
use crate::stream::{InflateStream, InputStream, MemoryStream};

pub use sniff::sniff_version;
pub use version::Version;

/// Name of the document stream in modern packages.
pub const INDEX_MEMBER: &str = "index.apxl";
/// Name of the document stream in legacy packages.
pub const PRESENTATION_MEMBER: &str = "presentation.apxl";

/// OLE package members, in probing order, with the version each implies.
pub const OLE_MEMBERS: [(&str, Version); 4] = [
    ("index.apxl.gz", Version::NEWEST),
    ("index.apxl", Version::NEWEST),
    ("presentation.apxl.gz", Version::OLDEST),
    ("presentation.apxl", Version::OLDEST),
];

/// How the document is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Bare XML document
    Xml,
    /// gzip or zlib compressed XML document
    CompressedXml,
    /// OLE compound document holding the XML as a named stream
    OlePackage,
    /// Zip archive holding the XML as a named entry
    ZipPackage,
}

/// Outcome of a successful detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub version: Version,
    pub container: ContainerKind,
    /// Package member holding the document, for packaged containers
    pub member: Option<String>,
}

/// A detected document, decoded and ready for parsing.
pub struct OpenedDocument {
    pub detection: Detection,
    /// The decoded XML document
    pub xml: MemoryStream,
    /// The package, for resolving embedded data by member name
    pub container: Option<Box<dyn InputStream>>,
}

impl std::fmt::Debug for OpenedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedDocument")
            .field("detection", &self.detection)
            .field("len", &self.xml.len())
            .field("container", &self.container.is_some())
            .finish()
    }
}

enum Source {
    Xml(MemoryStream),
    #[cfg(feature = "ole")]
    Ole(OleStream),
    #[cfg(feature = "zip")]
    Zip(ZipStream),
}

/// Classify `stream` without decoding package members.
pub fn detect(stream: &mut dyn InputStream, options: &ParseOptions) -> Result<Detection> {
    Ok(classify(stream, options)?.0)
}

/// Classify `stream` and decode the document it holds.
pub fn open(stream: &mut dyn InputStream, options: &ParseOptions) -> Result<OpenedDocument> {
    let (detection, source) = classify(stream, options)?;
    let limit = options.max_stream_size;

    let (xml, container): (MemoryStream, Option<Box<dyn InputStream>>) = match source {
        Source::Xml(xml) => (xml, None),
        #[cfg(feature = "ole")]
        Source::Ole(mut ole) => {
            let xml = open_member(&mut ole, detection.member.as_deref(), limit)?;
            (xml, Some(Box::new(ole)))
        },
        #[cfg(feature = "zip")]
        Source::Zip(mut zip) => {
            let xml = open_member(&mut zip, detection.member.as_deref(), limit)?;
            (xml, Some(Box::new(zip)))
        },
    };

    tracing::debug!(
        version = detection.version.number(),
        container = ?detection.container,
        bytes = xml.len(),
        "opened document"
    );

    Ok(OpenedDocument {
        detection,
        xml,
        container,
    })
}

#[cfg(any(feature = "ole", feature = "zip"))]
fn open_member(container: &mut dyn InputStream, member: Option<&str>, limit: usize) -> Result<MemoryStream> {
    let name = member.ok_or_else(|| Error::ComponentNotFound("document member".to_string()))?;
    let data = container
        .open_member(name)?
        .ok_or_else(|| Error::ComponentNotFound(name.to_string()))?;
    if name.ends_with(".gz") {
        Ok(InflateStream::new(data.bytes(), limit)?.into_inner())
    } else {
        Ok(data)
    }
}

fn classify(stream: &mut dyn InputStream, options: &ParseOptions) -> Result<(Detection, Source)> {
    let limit = options.max_stream_size;
    stream.seek(SeekFrom::Start(0))?;
    let raw = stream.read_to_vec(limit);
    stream.seek(SeekFrom::Start(0))?;
    let raw = MemoryStream::new(raw?);

    #[cfg(feature = "ole")]
    if is_ole_file(raw.bytes()) {
        match OleStream::new(raw.rewound(), limit) {
            Ok(ole) => {
                if let Some((name, version)) = OLE_MEMBERS.iter().find(|(name, _)| ole.contains(name)) {
                    let detection = Detection {
                        version: *version,
                        container: ContainerKind::OlePackage,
                        member: Some(name.to_string()),
                    };
                    return Ok((detection, Source::Ole(ole)));
                }
                tracing::debug!("OLE document without a presentation stream");
            },
            Err(e) => tracing::debug!(error = %e, "not an OLE package"),
        }
    }

    #[cfg(feature = "zip")]
    if ZipStream::looks_like_zip(raw.bytes()) {
        match ZipStream::new(raw.rewound(), limit) {
            Ok(zip) if zip.contains(INDEX_MEMBER) => {
                let detection = Detection {
                    version: Version::NEWEST,
                    container: ContainerKind::ZipPackage,
                    member: Some(INDEX_MEMBER.to_string()),
                };
                return Ok((detection, Source::Zip(zip)));
            },
            Ok(_) => tracing::debug!("zip package without {}", INDEX_MEMBER),
            Err(e) => tracing::debug!(error = %e, "not a zip package"),
        }
    }

    if Compression::sniff(raw.bytes()).is_some() {
        match InflateStream::new(raw.bytes(), limit) {
            Ok(inflated) => {
                let xml = inflated.into_inner();
                let version = sniff_version(&xml)?;
                let detection = Detection {
                    version,
                    container: ContainerKind::CompressedXml,
                    member: None,
                };
                return Ok((detection, Source::Xml(xml)));
            },
            Err(Error::StreamTooLarge(n)) => return Err(Error::StreamTooLarge(n)),
            Err(e) => tracing::debug!(error = %e, "not compressed"),
        }
    }

    let version = sniff_version(&raw)?;
    let detection = Detection {
        version,
        container: ContainerKind::Xml,
        member: None,
    };
    Ok((detection, Source::Xml(raw)))
}
