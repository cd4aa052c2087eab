pub(crate) mod compose;
pub(crate) mod prepare;
pub(crate) mod view;
