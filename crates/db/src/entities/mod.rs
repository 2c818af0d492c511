//! `SeaORM` entity definitions.

pub mod files;
