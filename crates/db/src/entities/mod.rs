//! `SeaORM` entity definitions.

pub mod songs;
