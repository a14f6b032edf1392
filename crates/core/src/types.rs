/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// 1-based confirmed-performance position; doubles as the performance order.
pub type Slot = u32;

/// Cell rendering used for timestamps in stored rows and outbound messages.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
