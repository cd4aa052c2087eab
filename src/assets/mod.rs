pub(crate) mod decode;
pub(crate) mod normalize;
pub(crate) mod picker;
