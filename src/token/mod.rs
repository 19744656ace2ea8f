//! Token resolution for element and attribute names.
//!
//! Each grammar family has its own vocabulary: a compile-time perfect hash
//! from local names to small integers, plus a table of namespace URIs.
//! Namespace tokens occupy the high 16 bits and name tokens the low 16 bits,
//! so a qualified name is matched as a `(namespace, name)` pair.

pub mod key1;
pub mod key2;

/// Small integer standing for a namespace or a local name.
pub type Token = u32;

/// Sentinel for names and namespaces missing from the vocabulary.
pub const INVALID_TOKEN: Token = 0;

/// Namespace token of names without a namespace (unprefixed attributes).
pub const NO_NAMESPACE: Token = 0x7FFF << 16;

/// Build a namespace token from its ordinal.
pub const fn namespace_token(ordinal: u16) -> Token {
    (ordinal as Token) << 16
}

/// Maps namespace URIs and local names to tokens.
///
/// Implementations are stateless lookups: resolving the same string twice
/// always yields the same token.
pub trait TokenResolver: Send + Sync {
    /// Token of a local name, or [`INVALID_TOKEN`].
    fn name(&self, local: &str) -> Token;

    /// Token of a namespace URI, or [`INVALID_TOKEN`].
    fn namespace(&self, uri: &str) -> Token;

    /// Resolve an optional namespace; `None` maps to [`NO_NAMESPACE`].
    fn resolve_namespace(&self, uri: Option<&str>) -> Token {
        match uri {
            Some(uri) => self.namespace(uri),
            None => NO_NAMESPACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_token_layout() {
        assert_eq!(namespace_token(1), 0x1_0000);
        assert_eq!(namespace_token(1) & 0xFFFF, 0);
        assert_ne!(NO_NAMESPACE, INVALID_TOKEN);
    }

    #[test]
    fn test_resolution_is_stable() {
        let resolver: &dyn TokenResolver = &key2::KEY2_TOKENS;
        let first = resolver.name("drawable-shape");
        assert_ne!(first, INVALID_TOKEN);
        assert_eq!(first, resolver.name("drawable-shape"));
        assert_eq!(resolver.name("no-such-element"), INVALID_TOKEN);
        assert_eq!(resolver.namespace("urn:nowhere"), INVALID_TOKEN);
        assert_eq!(resolver.resolve_namespace(None), NO_NAMESPACE);
    }

    #[test]
    fn test_vocabularies_are_distinct() {
        let key1: &dyn TokenResolver = &key1::KEY1_TOKENS;
        assert_ne!(key1.namespace(key1::APXL_NS), INVALID_TOKEN);
        assert_eq!(key1.namespace(key2::KEY_NS), INVALID_TOKEN);
        assert_eq!(key1.name("drawable-shape"), INVALID_TOKEN);
        assert_eq!(key1.name("textbox"), key1::TEXTBOX);
    }
}
