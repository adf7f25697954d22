//! Static PNG and animated MP4/WebM exports.

pub(crate) mod animation;
pub(crate) mod still;
