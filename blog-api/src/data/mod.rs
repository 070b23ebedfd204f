pub(crate) mod repositories;
pub(crate) mod repository;
