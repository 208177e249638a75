// =============================================================================
// BACKING-STORE TABLE NAMES
// =============================================================================

/// Main ticket table
pub const TICKETS_TABLE: &str = "sheet1";

/// User account reference table
pub const USERS_TABLE: &str = "users";

/// Model -> product name catalog
pub const MODEL_CATALOG_TABLE: &str = "model_mat";

/// Dropdown option tables (single-column option lists)
pub const DEFECT_TYPES_TABLE: &str = "defect_dropdowns";
pub const ACTIONS_TABLE: &str = "action_dropdowns";
pub const CLASSIFICATIONS_TABLE: &str = "classification_dropdowns";
pub const STATIONS_TABLE: &str = "station_dropdowns";

// =============================================================================
// IMAGE ARTIFACT ENCODING
// =============================================================================

/// Maximum width/height after thumbnailing, in pixels
pub const THUMBNAIL_MAX_PX: u32 = 400;

/// JPEG re-encode quality for evidence images
pub const JPEG_QUALITY: u8 = 40;

/// Cumulative budget for one ticket's packed artifact payload, in encoded
/// characters. Conservative guard below the backing store's 50k cell limit.
pub const ARTIFACT_BUDGET_CHARS: usize = 48_000;

/// Separator between packed base64 images; not part of the base64 alphabet
pub const ARTIFACT_DELIMITER: char = '|';

// =============================================================================
// LIFECYCLE / NOTIFICATION
// =============================================================================

/// Minimum elapsed time between re-notify events for the same ticket
pub const RENOTIFY_COOLDOWN_SECS: i64 = 10 * 60;

/// Placeholder entry shown first in every dropdown; never a valid selection
pub const PLACEHOLDER_OPTION: &str = "-- Select --";

/// Timestamp format used in ticket cells (store holds plain strings)
pub const CELL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
