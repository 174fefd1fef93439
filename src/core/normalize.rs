use crate::domain::model::{EntryType, FileMetadata, ObjectInfo};

/// `putTime` ticks per second (the service reports 100 ns units).
pub const PUT_TIME_TICKS_PER_SECOND: i64 = 10_000_000;

/// Maps a raw service record onto the consumer's metadata shape.
pub fn normalize_file_info(info: &ObjectInfo) -> FileMetadata {
    FileMetadata {
        entry_type: EntryType::File,
        path: info.key.clone(),
        timestamp: Some(info.put_time.div_euclid(PUT_TIME_TICKS_PER_SECOND)),
        size: Some(info.fsize),
    }
}
