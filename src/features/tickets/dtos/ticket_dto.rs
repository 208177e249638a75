use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::tickets::models::{RepairTicket, TicketCategory, TicketStatus};
use crate::modules::imaging::split_payload;

/// New repair request, submitted by a reporter.
///
/// Arrives as multipart form fields alongside an optional evidence image.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTicketDto {
    pub category: TicketCategory,

    #[validate(length(min = 1, max = 100, message = "Work order is required"))]
    pub work_order: String,

    #[validate(length(min = 1, max = 100, message = "Serial number is required"))]
    pub serial_number: String,

    /// Required for PCBA tickets; must exist in the model catalog
    #[serde(default)]
    pub model: String,

    #[validate(length(min = 1, max = 2000, message = "Failure description is required"))]
    pub failure_description: String,
}

/// Technician lifecycle update, applied to a ticket by position.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTicketDto {
    pub status: TicketStatus,

    #[serde(default)]
    pub root_cause: String,
    #[serde(default)]
    pub defect_type: String,
    #[serde(default)]
    pub action_taken: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub remark: String,

    /// Version the technician saw; a stale value is rejected so concurrent
    /// edits are not silently lost
    pub expected_version: u32,
}

/// Full ticket view (image payloads reduced to counts).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponseDto {
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
    pub has_reporter_image: bool,
    pub technician_image_count: usize,
    pub last_notified_at: String,
    pub version: u32,
}

impl From<&RepairTicket> for TicketResponseDto {
    fn from(ticket: &RepairTicket) -> Self {
        Self {
            position: ticket.position,
            category: ticket.category,
            work_order: ticket.work_order.clone(),
            serial_number: ticket.serial_number.clone(),
            model: ticket.model.clone(),
            product_name: ticket.product_name.clone(),
            station: ticket.station.clone(),
            failure_description: ticket.failure_description.clone(),
            reporter_id: ticket.reporter_id.clone(),
            submitted_at: ticket.submitted_at.clone(),
            status: ticket.status,
            root_cause: ticket.root_cause.clone(),
            defect_type: ticket.defect_type.clone(),
            action_taken: ticket.action_taken.clone(),
            classification: ticket.classification.clone(),
            remark: ticket.remark.clone(),
            technician_id: ticket.technician_id.clone(),
            resolved_at: ticket.resolved_at.clone(),
            has_reporter_image: !ticket.reporter_image.is_empty(),
            technician_image_count: split_payload(&ticket.technician_images).len(),
            last_notified_at: ticket.last_notified_at.clone(),
            version: ticket.version,
        }
    }
}

/// Public tracking view: status only, no repair details, no images.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponseDto {
    pub serial_number: String,
    pub work_order: String,
    pub model: String,
    pub status: TicketStatus,
    pub last_update: String,
}

impl From<&RepairTicket> for TrackingResponseDto {
    fn from(ticket: &RepairTicket) -> Self {
        let last_update = if ticket.resolved_at.is_empty() {
            ticket.submitted_at.clone()
        } else {
            ticket.resolved_at.clone()
        };
        Self {
            serial_number: ticket.serial_number.clone(),
            work_order: ticket.work_order.clone(),
            model: ticket.model.clone(),
            status: ticket.status,
            last_update,
        }
    }
}

/// Re-notify outcome. `delivered == false` means the channel refused the
/// push; the ticket itself is untouched either way.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReNotifyResultDto {
    pub delivered: bool,
}

/// Substring search over SN / WO (and model for the admin view)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TicketSearchQuery {
    pub q: Option<String>,
}

/// Public tracking query: SN/WO substring and model substring
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TrackQuery {
    pub q: Option<String>,
    pub model: Option<String>,
}

/// Technician lookup by exact serial number
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SerialQuery {
    pub sn: String,
}
