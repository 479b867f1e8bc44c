pub(crate) mod fatal;
