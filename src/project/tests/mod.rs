#![allow(clippy::unwrap_used, clippy::expect_used)]

mod memory_fs;
mod tests_import_resolver;
