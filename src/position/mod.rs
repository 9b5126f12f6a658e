pub(crate) mod model;
pub(crate) mod store;
pub(crate) mod zone;
