pub(crate) mod ops;
pub(crate) mod state;
