//! Object handles naming one configuration instance on the service
use anyhow::{anyhow, Result};
use std::fmt;

/// Path-like identifier of a configuration object.
/// Parsed up front so malformed input never reaches the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    /// Parse a handle, enforcing object path syntax: absolute, elements
    /// of `[A-Za-z0-9_]`, no empty elements
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(anyhow!("object path is empty"));
        }
        if !s.starts_with('/') {
            return Err(anyhow!("object path must start with '/'"));
        }
        if s != "/" {
            for element in s[1..].split('/') {
                if element.is_empty() {
                    return Err(anyhow!("object path contains an empty element"));
                }
                if !element.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(anyhow!("invalid character in object path element '{element}'"));
                }
            }
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -- Tests --
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_paths() {
        assert!(ObjectHandle::parse("/net/confbus/configuration/vpn1").is_ok());
        assert!(ObjectHandle::parse("/").is_ok());
        assert!(ObjectHandle::parse("/a_b/c9").is_ok());
    }

    #[test]
    fn rejects_empty_and_relative_paths() {
        assert!(ObjectHandle::parse("").is_err());
        assert!(ObjectHandle::parse("vpn1").is_err());
        assert!(ObjectHandle::parse("net/confbus").is_err());
    }

    #[test]
    fn rejects_empty_elements_and_bad_characters() {
        assert!(ObjectHandle::parse("//").is_err());
        assert!(ObjectHandle::parse("/net//vpn1").is_err());
        assert!(ObjectHandle::parse("/net/vpn-1").is_err());
        assert!(ObjectHandle::parse("/net/vpn1/").is_err());
    }

    #[test]
    fn displays_as_the_original_path() {
        let handle = ObjectHandle::parse("/net/confbus/configuration/vpn1").unwrap();
        assert_eq!(handle.to_string(), "/net/confbus/configuration/vpn1");
        assert_eq!(handle.as_str(), "/net/confbus/configuration/vpn1");
    }
}
