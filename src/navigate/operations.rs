//! Navigation operations implementation

use std::path::{Component, Path};

use log::debug;

use super::ConfinedPath;
use crate::error::PathError;
use crate::utils::validation::is_valid_input;

pub const ROOT_SEPARATOR: char = '/';
pub const PARENT_SEGMENT: &str = "..";
const CURRENT_SEGMENT: &str = ".";

/// Segments after the leading separator. Empty and `.` segments carry no
/// movement and are skipped.
fn split_segments(virtual_path: &str) -> impl Iterator<Item = &str> {
    virtual_path
        .split(ROOT_SEPARATOR)
        .skip(1)
        .filter(|segment| !segment.is_empty() && *segment != CURRENT_SEGMENT)
}

fn check_shape(virtual_path: &str) -> Result<(), PathError> {
    if !is_valid_input(virtual_path) {
        return Err(PathError::Malformed);
    }
    if virtual_path.starts_with(ROOT_SEPARATOR) {
        Ok(())
    } else {
        Err(PathError::MissingRoot(virtual_path.to_string()))
    }
}

/// Cheap pre-check on a virtual path.
///
/// Rejects paths without a leading `/`, and paths with more than one segment
/// where `..` makes up more than half of them. This is an upper bound and may
/// reject paths that would normalize safely; `normalize` is the exact check.
pub fn validate(virtual_path: &str) -> Result<(), PathError> {
    check_shape(virtual_path)?;

    let mut total = 0usize;
    let mut back_count = 0usize;
    for segment in split_segments(virtual_path) {
        total += 1;
        if segment == PARENT_SEGMENT {
            back_count += 1;
        }
    }

    if total > 1 && back_count > total / 2 {
        return Err(PathError::ExceedsScope(virtual_path.to_string()));
    }

    Ok(())
}

/// Walks the path left to right, popping on `..`, and fails the moment a
/// `..` would climb above the root.
pub fn normalize(virtual_path: &str) -> Result<ConfinedPath, PathError> {
    check_shape(virtual_path)?;

    let mut stack: Vec<String> = Vec::new();
    for segment in split_segments(virtual_path) {
        if segment == PARENT_SEGMENT {
            if stack.pop().is_none() {
                return Err(PathError::EscapesRoot(virtual_path.to_string()));
            }
            continue;
        }

        if !is_plain_segment(segment) {
            return Err(PathError::InvalidSegment(segment.to_string()));
        }

        stack.push(segment.to_string());
    }

    Ok(ConfinedPath::from_segments(stack))
}

/// True when `segment` is exactly one ordinary path component on this
/// platform. Drive prefixes and embedded separators (`C:` or `a\b` on
/// Windows) fail, since joining them would not stay below the root.
pub fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Whether a directory entry named `name` inside `parent` can be requested
/// back through the resolver.
pub fn is_addressable(parent: &ConfinedPath, name: &str) -> bool {
    name != PARENT_SEGMENT
        && name != CURRENT_SEGMENT
        && is_plain_segment(name)
        && is_valid_input(&parent.child(name))
}

/// Validate then normalize; the listing entry point.
pub fn resolve(virtual_path: &str) -> Result<ConfinedPath, PathError> {
    validate(virtual_path)?;
    let confined = normalize(virtual_path)?;
    debug!("Resolved virtual path {virtual_path:?} to {confined}");
    Ok(confined)
}

/// Download requests may omit the leading separator, so any leading `/` run
/// is replaced by exactly one before normalizing.
pub fn resolve_download(raw_path: &str) -> Result<ConfinedPath, PathError> {
    let relative = raw_path.trim_start_matches(ROOT_SEPARATOR);
    let confined = normalize(&format!("{ROOT_SEPARATOR}{relative}"))?;
    debug!("Resolved download path {raw_path:?} to {confined}");
    Ok(confined)
}
