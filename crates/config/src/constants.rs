//! Centralized constants for the envload workspace.
//!
//! This module contains default values shared by the library and the CLI.

// =============================================================================
// Source Defaults
// =============================================================================

/// File name of the default environment source, resolved against the
/// current working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

// =============================================================================
// Line Syntax
// =============================================================================

/// Marker that starts a whole-line comment.
pub const COMMENT_MARKER: char = '#';

/// Separator between key and value. Only the first occurrence splits.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Characters stripped (one each side) from the outer boundary of a value.
pub const QUOTE_CHARS: [char; 2] = ['"', '\''];
