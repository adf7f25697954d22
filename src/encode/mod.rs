//! Output encoders.
//!
//! Sinks consume rendered frames in timeline order; PNG covers the static export.

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;
