mod common;
mod summary;
