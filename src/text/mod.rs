pub(crate) mod typeset;
pub(crate) mod wrap;
