pub(crate) mod blog_service;
pub(crate) mod comment_service;
pub(crate) mod crud_service;
