/// Seconds of quiet after the last media arrival before a batch settles.
pub const DEBOUNCE_SECS: u64 = 2;

/// Maximum number of items in one album delivery (platform limit).
pub const ALBUM_MAX_ITEMS: usize = 10;

/// Minimum number of items the platform accepts in one album.
pub const ALBUM_MIN_ITEMS: usize = 2;

/// Separator inserted between an original caption and appended or
/// prepended text.
pub const CAPTION_SEPARATOR: &str = "\n";

/// Default long-poll timeout for fetching platform updates.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
