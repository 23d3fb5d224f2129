//! Destination table identifier.

use derive_more::Display;

use crate::StoreError;

/// Validated destination table name.
///
/// The destination is caller-supplied and gets spliced into DDL, so only
/// `[A-Za-z_][A-Za-z0-9_]*` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct TableName(String);

impl TableName {
    /// Validate a caller-supplied table name.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidTableName`] for anything outside the
    /// accepted identifier shape.
    pub fn new(name: impl Into<String>) -> Result<Self, StoreError> {
        let name = name.into();
        if is_safe_ident(&name) {
            Ok(Self(name))
        } else {
            Err(StoreError::InvalidTableName(name))
        }
    }

    /// Table name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for use in SQL statements.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

/// Whether `name` is a plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_safe_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("milestone1_cleaned_dataset")]
    #[case("_staging")]
    #[case("t2")]
    fn accepts_plain_identifiers(#[case] name: &str) {
        let table = TableName::new(name).unwrap();
        assert_eq!(table.as_str(), name);
        assert_eq!(table.quoted(), format!("\"{name}\""));
    }

    #[rstest]
    #[case("")]
    #[case("1table")]
    #[case("trades; drop table users")]
    #[case("ta\"ble")]
    #[case("sch.table")]
    fn rejects_unsafe_identifiers(#[case] name: &str) {
        assert!(matches!(TableName::new(name), Err(StoreError::InvalidTableName(_))));
    }
}
