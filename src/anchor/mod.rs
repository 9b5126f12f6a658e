pub(crate) mod tracker;
