pub(crate) mod descriptor;
pub(crate) mod drag;
pub(crate) mod grid;
