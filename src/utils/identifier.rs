// autobackup/src/utils/identifier.rs
use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{AppError, Result};

/// PostgreSQL truncates identifiers longer than this (NAMEDATALEN - 1).
pub const MAX_IDENTIFIER_BYTES: usize = 63;

static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

/// Checks that a configured backup prefix is a plain identifier fragment.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if !PREFIX_PATTERN.is_match(prefix) {
        return Err(AppError::InvalidIdentifier {
            name: prefix.to_string(),
            reason: "prefix must match [A-Za-z_][A-Za-z0-9_]*",
        });
    }
    // Leave room for "_", at least one name character, "_" and the 8 date characters.
    if prefix.len() + 11 > MAX_IDENTIFIER_BYTES {
        return Err(AppError::InvalidIdentifier {
            name: prefix.to_string(),
            reason: "prefix leaves no room for a backup table name",
        });
    }
    Ok(())
}

/// Quotes a table name for interpolation into DDL.
///
/// Catalog names can contain anything PostgreSQL accepts, so the name is
/// always wrapped in double quotes with embedded quotes doubled. Names that
/// the server would truncate or reject are refused up front.
pub fn quote_ident(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(AppError::InvalidIdentifier {
            name: name.to_string(),
            reason: "identifier is empty",
        });
    }
    if name.contains('\0') {
        return Err(AppError::InvalidIdentifier {
            name: name.to_string(),
            reason: "identifier contains a NUL byte",
        });
    }
    if name.len() > MAX_IDENTIFIER_BYTES {
        return Err(AppError::InvalidIdentifier {
            name: name.to_string(),
            reason: "identifier exceeds 63 bytes and would be truncated",
        });
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
