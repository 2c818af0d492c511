//! Repository implementations over the `SeaORM` entities.

mod file_record;

pub use file_record::FileRecordRepository;
