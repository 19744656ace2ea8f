use super::Version;
use crate::common::{Error, Result};
use crate::stream::MemoryStream;
use crate::token::key1::APXL_NS;
use crate::token::key2::{KEY_NS, KEY2_TOKENS};
use crate::xml::XmlReader;

/// Determine the format version from the root element of an XML document.
///
/// Fails with [`Error::NotSupported`] for anything that is not a
/// presentation, and with [`Error::UnsupportedVersion`] for an unknown
/// version stamp.
pub fn sniff_version(xml: &MemoryStream) -> Result<Version> {
    if memchr::memchr(b'<', xml.bytes()).is_none() {
        return Err(Error::NotSupported);
    }
    let mut reader = XmlReader::new(xml.rewound(), &KEY2_TOKENS);
    let root = match reader.root() {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!(error = %e, "no XML root element");
            return Err(Error::NotSupported);
        },
    };

    if root.local_name() != "presentation" {
        return Err(Error::NotSupported);
    }

    match root.namespace() {
        Some(APXL_NS) => Ok(Version::V1),
        Some(KEY_NS) => {
            let stamp = root
                .attributes()
                .find(|a| a.namespace() == Some(KEY_NS) && a.local_name() == "version")
                .map(|a| a.value().to_string());
            match stamp {
                None => Ok(Version::V2),
                Some(stamp) => Version::from_stamp(&stamp).ok_or(Error::UnsupportedVersion(stamp)),
            }
        },
        _ => Err(Error::NotSupported),
    }
}
