use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::sheets::SheetRow;
use crate::shared::constants::CELL_TIME_FORMAT;

/// What the defective unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Pcba,
    Machine,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Pcba => "PCBA",
            TicketCategory::Machine => "Machine",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pcba" => Some(TicketCategory::Pcba),
            "machine" => Some(TicketCategory::Machine),
            _ => None,
        }
    }
}

/// Ticket lifecycle status.
///
/// `Completed` and `Scrapped` are absorbing: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TicketStatus {
    Pending,
    InProgress,
    WaitPart,
    Completed,
    Scrapped,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::WaitPart => "Wait Part",
            TicketStatus::Completed => "Completed",
            TicketStatus::Scrapped => "Scrapped",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(TicketStatus::Pending),
            "in progress" => Some(TicketStatus::InProgress),
            "wait part" => Some(TicketStatus::WaitPart),
            "completed" => Some(TicketStatus::Completed),
            // Legacy rows spelled it "Scrap"
            "scrapped" | "scrap" => Some(TicketStatus::Scrapped),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Completed | TicketStatus::Scrapped)
    }

    /// A technician may move any non-terminal ticket to any non-initial
    /// status; nothing leaves a terminal status.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        !self.is_terminal() && next != TicketStatus::Pending
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed column order of the ticket table.
///
/// The append path writes cells in this order and `update_range` addresses
/// columns by these indices, while reads key cells by the same header names:
/// both paths stay in lock-step through this one constant.
pub const TICKET_COLUMNS: [&str; 21] = [
    "category",      // 0
    "wo",            // 1
    "sn",            // 2
    "model",         // 3
    "product",       // 4
    "station",       // 5
    "failure",       // 6
    "user_id",       // 7
    "user_time",     // 8
    "status",        // 9
    "root_cause",    // 10
    "defect_type",   // 11
    "action_taken",  // 12
    "classification",// 13
    "remark",        // 14
    "tech_id",       // 15
    "tech_time",     // 16
    "img_user",      // 17
    "img_tech",      // 18
    "last_notified", // 19
    "version",       // 20
];

pub const COL_STATUS: usize = 9;
pub const COL_ROOT_CAUSE: usize = 10;
pub const COL_TECH_ID: usize = 15;
pub const COL_IMG_TECH: usize = 18;
pub const COL_LAST_NOTIFIED: usize = 19;
pub const COL_VERSION: usize = 20;

/// One repair ticket, one row in the store.
#[derive(Debug, Clone)]
pub struct RepairTicket {
    /// Stable 1-based creation-order index; the only handle for later
    /// row-addressed mutation
    pub position: u32,
    pub category: TicketCategory,
    pub work_order: String,
    pub serial_number: String,
    pub model: String,
    pub product_name: String,
    pub station: String,
    pub failure_description: String,
    pub reporter_id: String,
    pub submitted_at: String,
    pub status: TicketStatus,
    pub root_cause: String,
    pub defect_type: String,
    pub action_taken: String,
    pub classification: String,
    pub remark: String,
    pub technician_id: String,
    pub resolved_at: String,
    pub reporter_image: String,
    pub technician_images: String,
    pub last_notified_at: String,
    pub version: u32,
}

impl RepairTicket {
    /// Rebuild a ticket from a header-keyed row. Tolerant of legacy data:
    /// unknown status reads as Pending, unknown category as PCBA, missing
    /// version as 1.
    pub fn from_row(row: &SheetRow) -> Self {
        Self {
            position: row.position,
            category: TicketCategory::parse(row.get("category")).unwrap_or(TicketCategory::Pcba),
            work_order: row.get("wo").to_string(),
            serial_number: row.get("sn").to_string(),
            model: row.get("model").to_string(),
            product_name: row.get("product").to_string(),
            station: row.get("station").to_string(),
            failure_description: row.get("failure").to_string(),
            reporter_id: row.get("user_id").to_string(),
            submitted_at: row.get("user_time").to_string(),
            status: TicketStatus::parse(row.get("status")).unwrap_or(TicketStatus::Pending),
            root_cause: row.get("root_cause").to_string(),
            defect_type: row.get("defect_type").to_string(),
            action_taken: row.get("action_taken").to_string(),
            classification: row.get("classification").to_string(),
            remark: row.get("remark").to_string(),
            technician_id: row.get("tech_id").to_string(),
            resolved_at: row.get("tech_time").to_string(),
            reporter_image: row.get("img_user").to_string(),
            technician_images: row.get("img_tech").to_string(),
            last_notified_at: row.get("last_notified").to_string(),
            version: row.get("version").trim().parse().unwrap_or(1),
        }
    }

    /// Serialize into the fixed column order for the append path.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.category.as_str().to_string(),
            self.work_order.clone(),
            self.serial_number.clone(),
            self.model.clone(),
            self.product_name.clone(),
            self.station.clone(),
            self.failure_description.clone(),
            self.reporter_id.clone(),
            self.submitted_at.clone(),
            self.status.as_str().to_string(),
            self.root_cause.clone(),
            self.defect_type.clone(),
            self.action_taken.clone(),
            self.classification.clone(),
            self.remark.clone(),
            self.technician_id.clone(),
            self.resolved_at.clone(),
            self.reporter_image.clone(),
            self.technician_images.clone(),
            self.last_notified_at.clone(),
            self.version.to_string(),
        ]
    }

    pub fn submitted_time(&self) -> Option<DateTime<Utc>> {
        parse_cell_time(&self.submitted_at)
    }

    pub fn resolved_time(&self) -> Option<DateTime<Utc>> {
        parse_cell_time(&self.resolved_at)
    }

    pub fn last_notified_time(&self) -> Option<DateTime<Utc>> {
        parse_cell_time(&self.last_notified_at)
    }
}

/// Parse a stored cell timestamp; empty or malformed cells read as `None`.
pub fn parse_cell_time(cell: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(cell.trim(), CELL_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way ticket cells store it.
pub fn format_cell_time(time: DateTime<Utc>) -> String {
    time.format(CELL_TIME_FORMAT).to_string()
}
