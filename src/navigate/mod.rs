//! Navigate module
//!
//! Resolves client-supplied virtual paths into confined, root-relative
//! paths. Nothing in here touches the filesystem.

mod operations;
mod results;

pub use operations::{
    PARENT_SEGMENT, ROOT_SEPARATOR, is_addressable, is_plain_segment, normalize, resolve,
    resolve_download, validate,
};
pub use results::ConfinedPath;
