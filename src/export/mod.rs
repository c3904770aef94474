pub(crate) mod namer;
pub(crate) mod png;
pub(crate) mod sink;
