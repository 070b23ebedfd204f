pub(crate) mod blogs;
pub(crate) mod comments;
pub(crate) mod posts;
