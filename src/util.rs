//! Shared utility modules used across typofinder components.

pub mod text_file;
