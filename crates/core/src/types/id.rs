//! Newtype IDs for content store documents.
//!
//! Documents in the content store are addressed by opaque string IDs
//! (`_id`). Use the `define_document_id!` macro to create type-safe wrappers
//! that prevent mixing IDs from different document types.

use thiserror::Error;

/// Error returned when parsing an empty document ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document id must not be empty")]
pub struct EmptyIdError;

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` rejecting empty or whitespace-only input
/// - `as_str()`, `Display`, and `From<&str>`/`From<String>`
///
/// # Example
///
/// ```rust
/// # use orderdesk_core::define_document_id;
/// define_document_id!(InvoiceId);
///
/// let id = InvoiceId::parse("invoice-1").unwrap();
/// assert_eq!(id.as_str(), "invoice-1");
/// assert!(InvoiceId::parse("  ").is_err());
/// ```
#[macro_export]
macro_rules! define_document_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns `EmptyIdError` if the trimmed input is empty.
            pub fn parse(id: &str) -> Result<Self, $crate::EmptyIdError> {
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err($crate::EmptyIdError);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_document_id!(OrderId);
define_document_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = OrderId::parse("  order-1 ").unwrap();
        assert_eq!(id.as_str(), "order-1");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(OrderId::parse(""), Err(EmptyIdError));
        assert_eq!(OrderId::parse("   "), Err(EmptyIdError));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: OrderId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id, OrderId::from("abc123"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
