pub(crate) mod cover;
pub(crate) mod template;
