//! Canonical schema constants for structured logging and events
//!
//! These constants keep log field names consistent between the engine,
//! the logging macros and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Surface identifiers
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_MEMBER_KEY: &str = "member_key";
pub const FIELD_CATEGORY: &str = "category";

// Collection sizes
pub const FIELD_TYPE_COUNT: &str = "type_count";
pub const FIELD_CHANGE_COUNT: &str = "change_count";
pub const FIELD_BREAKING_COUNT: &str = "breaking_count";
pub const FIELD_RELEASE_COUNT: &str = "release_count";

// Release identifiers
pub const FIELD_RELEASE_VERSION: &str = "release_version";
pub const FIELD_RELEASE_INDEX: &str = "release_index";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
