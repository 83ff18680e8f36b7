//! Input validation utilities
//!
//! Raw checks applied to client input before it is parsed any further.

/// Longest virtual path accepted from a client, in bytes.
pub const MAX_PATH_LENGTH: usize = 4096;

/// Validate that input is not oversized and carries no control characters
pub fn is_valid_input(input: &str) -> bool {
    input.len() <= MAX_PATH_LENGTH && !input.chars().any(char::is_control)
}
