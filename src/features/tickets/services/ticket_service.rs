use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::ActorContext;
use crate::features::catalogs::CatalogService;
use crate::features::tickets::dtos::{
    ReNotifyResultDto, ResolveTicketDto, SubmitTicketDto, TicketResponseDto, TrackingResponseDto,
};
use crate::features::tickets::models::{
    format_cell_time, RepairTicket, TicketCategory, TicketStatus, COL_IMG_TECH, COL_LAST_NOTIFIED,
    COL_STATUS, COL_TECH_ID, COL_VERSION,
};
use crate::modules::imaging::{encode_many, EncodedArtifacts};
use crate::modules::notify::{Notifier, NotifyEvent, NotifyMessage};
use crate::modules::sheets::SheetStore;
use crate::shared::constants::{RENOTIFY_COOLDOWN_SECS, TICKETS_TABLE};
use crate::shared::validation::{is_selected, normalize_identifier, IDENTIFIER_REGEX};

/// Admin repair view shows the newest jobs only
const ADMIN_VIEW_LIMIT: usize = 30;

/// Public tracking returns the last few matches only
const TRACKING_LIMIT: usize = 5;

/// Ticket lifecycle operations: create, technician update, re-notify, and
/// the read views. Every mutation commits through the store adapter; the
/// notifier is strictly fire-and-forget.
pub struct TicketService {
    store: Arc<dyn SheetStore>,
    catalogs: Arc<CatalogService>,
    notifier: Arc<dyn Notifier>,
}

impl TicketService {
    pub fn new(
        store: Arc<dyn SheetStore>,
        catalogs: Arc<CatalogService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            catalogs,
            notifier,
        }
    }

    async fn snapshot(&self) -> Vec<RepairTicket> {
        self.store
            .fetch_all(TICKETS_TABLE)
            .await
            .iter()
            .map(RepairTicket::from_row)
            .collect()
    }

    async fn find(&self, position: u32) -> Result<RepairTicket> {
        self.snapshot()
            .await
            .into_iter()
            .find(|t| t.position == position)
            .ok_or_else(|| AppError::NotFound(format!("Ticket #{} not found", position)))
    }

    /// Create a new ticket in Pending state (reporter action).
    ///
    /// Returns the created ticket and the number of evidence images left
    /// out by the artifact budget.
    pub async fn submit(
        &self,
        actor: &ActorContext,
        dto: SubmitTicketDto,
        images: Vec<Vec<u8>>,
    ) -> Result<(TicketResponseDto, usize)> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let work_order = normalize_identifier(&dto.work_order);
        let serial_number = normalize_identifier(&dto.serial_number);
        let failure = dto.failure_description.trim().to_string();
        if work_order.is_empty() || serial_number.is_empty() || failure.is_empty() {
            return Err(AppError::Validation(
                "Work order, serial number and failure description are required".to_string(),
            ));
        }
        if !IDENTIFIER_REGEX.is_match(&work_order) || !IDENTIFIER_REGEX.is_match(&serial_number) {
            return Err(AppError::Validation(
                "Work order and serial number must be alphanumeric with optional dashes"
                    .to_string(),
            ));
        }

        let model = dto.model.trim().to_string();
        let product_name = match dto.category {
            TicketCategory::Pcba => {
                if !is_selected(&model) {
                    return Err(AppError::Validation(
                        "A model is required for PCBA tickets".to_string(),
                    ));
                }
                self.catalogs.product_for(&model).await.ok_or_else(|| {
                    AppError::Validation(format!("Model '{}' is not in the model catalog", model))
                })?
            }
            TicketCategory::Machine => self
                .catalogs
                .product_for(&model)
                .await
                .unwrap_or_default(),
        };

        let artifacts = if images.is_empty() {
            EncodedArtifacts::empty()
        } else {
            encode_many(&images)
        };

        let mut ticket = RepairTicket {
            position: 0,
            category: dto.category,
            work_order,
            serial_number,
            model,
            product_name,
            station: actor.station.clone(),
            failure_description: failure,
            reporter_id: actor.actor_id.clone(),
            submitted_at: format_cell_time(Utc::now()),
            status: TicketStatus::Pending,
            root_cause: String::new(),
            defect_type: String::new(),
            action_taken: String::new(),
            classification: String::new(),
            remark: String::new(),
            technician_id: String::new(),
            resolved_at: String::new(),
            reporter_image: artifacts.payload.clone(),
            technician_images: String::new(),
            last_notified_at: String::new(),
            version: 1,
        };

        ticket.position = self.store.append(TICKETS_TABLE, ticket.to_row()).await?;

        tracing::info!(
            "Ticket #{} created (SN {}) by '{}'",
            ticket.position,
            ticket.serial_number,
            actor.actor_id
        );

        if !self
            .notifier
            .send(self.message(NotifyEvent::NewRequest, &ticket, &actor.actor_id))
            .await
        {
            tracing::warn!(
                "New-request notification not delivered for ticket #{}",
                ticket.position
            );
        }

        Ok((TicketResponseDto::from(&ticket), artifacts.skipped))
    }

    /// Apply a technician lifecycle update to the ticket at `position`.
    ///
    /// The store write is the commit point; if it fails, the transition did
    /// not happen.
    pub async fn resolve(
        &self,
        actor: &ActorContext,
        position: u32,
        dto: ResolveTicketDto,
        images: Vec<Vec<u8>>,
    ) -> Result<(TicketResponseDto, usize)> {
        let mut ticket = self.find(position).await?;

        if dto.expected_version != ticket.version {
            return Err(AppError::Conflict(format!(
                "Ticket #{} was changed by someone else (version {} != {}); reload and retry",
                position, ticket.version, dto.expected_version
            )));
        }

        if !ticket.status.can_transition_to(dto.status) {
            return Err(AppError::BadRequest(format!(
                "Invalid transition from {} to {}",
                ticket.status, dto.status
            )));
        }

        let mut skipped = 0;
        if dto.status.is_terminal() {
            let missing: Vec<&str> = [
                ("root cause", &dto.root_cause),
                ("defect type", &dto.defect_type),
                ("action taken", &dto.action_taken),
                ("classification", &dto.classification),
            ]
            .iter()
            .filter(|(_, value)| !is_selected(value))
            .map(|(name, _)| *name)
            .collect();

            if !missing.is_empty() {
                return Err(AppError::Validation(format!(
                    "Closing a ticket requires: {}",
                    missing.join(", ")
                )));
            }

            ticket.status = dto.status;
            ticket.root_cause = dto.root_cause.trim().to_string();
            ticket.defect_type = dto.defect_type.trim().to_string();
            ticket.action_taken = dto.action_taken.trim().to_string();
            ticket.classification = dto.classification.trim().to_string();
            ticket.remark = dto.remark.trim().to_string();
            ticket.technician_id = actor.actor_id.clone();
            ticket.resolved_at = format_cell_time(Utc::now());

            // Status through remark are one contiguous column run
            self.store
                .update_range(
                    TICKETS_TABLE,
                    position,
                    COL_STATUS,
                    vec![
                        ticket.status.as_str().to_string(),
                        ticket.root_cause.clone(),
                        ticket.defect_type.clone(),
                        ticket.action_taken.clone(),
                        ticket.classification.clone(),
                        ticket.remark.clone(),
                    ],
                )
                .await?;
            self.store
                .update_range(
                    TICKETS_TABLE,
                    position,
                    COL_TECH_ID,
                    vec![ticket.technician_id.clone(), ticket.resolved_at.clone()],
                )
                .await?;

            if !images.is_empty() {
                let artifacts = encode_many(&images);
                skipped = artifacts.skipped;
                ticket.technician_images = artifacts.payload;
                if !ticket.technician_images.is_empty() {
                    self.store
                        .update_range(
                            TICKETS_TABLE,
                            position,
                            COL_IMG_TECH,
                            vec![ticket.technician_images.clone()],
                        )
                        .await?;
                }
            }
        } else {
            // Non-terminal move: status only. The technician/resolution
            // stamp is reserved for the terminal transition.
            ticket.status = dto.status;
            self.store
                .update_range(
                    TICKETS_TABLE,
                    position,
                    COL_STATUS,
                    vec![ticket.status.as_str().to_string()],
                )
                .await?;
        }

        ticket.version += 1;
        self.store
            .update_range(
                TICKETS_TABLE,
                position,
                COL_VERSION,
                vec![ticket.version.to_string()],
            )
            .await?;

        tracing::info!(
            "Ticket #{} moved to {} by '{}'",
            position,
            ticket.status,
            actor.actor_id
        );

        if ticket.status == TicketStatus::Completed
            && !self
                .notifier
                .send(self.message(NotifyEvent::Completed, &ticket, &actor.actor_id))
                .await
        {
            tracing::warn!(
                "Completed notification not delivered for ticket #{}",
                position
            );
        }

        Ok((TicketResponseDto::from(&ticket), skipped))
    }

    /// Re-notify the channel about an open ticket (reporter action).
    ///
    /// Timestamp-only update, gated by the cooldown; the timestamp moves
    /// only after confirmed delivery.
    pub async fn re_notify(&self, actor: &ActorContext, position: u32) -> Result<ReNotifyResultDto> {
        let ticket = self.find(position).await?;

        if ticket.reporter_id != actor.actor_id {
            return Err(AppError::Forbidden(
                "Only the reporter of a ticket may re-notify it".to_string(),
            ));
        }
        if ticket.status.is_terminal() {
            return Err(AppError::BadRequest(format!(
                "Ticket #{} is already {}",
                position, ticket.status
            )));
        }

        let now = Utc::now();
        if let Some(remaining) = cooldown_remaining(ticket.last_notified_time(), now) {
            return Err(AppError::RateLimitExceeded(format!(
                "Please wait {} more second(s) before re-notifying",
                remaining.num_seconds().max(1)
            )));
        }

        let delivered = self
            .notifier
            .send(self.message(NotifyEvent::ReNotify, &ticket, &actor.actor_id))
            .await;

        if delivered {
            self.store
                .update_range(
                    TICKETS_TABLE,
                    position,
                    COL_LAST_NOTIFIED,
                    vec![format_cell_time(now)],
                )
                .await?;
        } else {
            tracing::warn!("Re-notify push not delivered for ticket #{}", position);
        }

        Ok(ReNotifyResultDto { delivered })
    }

    /// A reporter's own tickets, optional SN/WO substring filter, newest
    /// first.
    pub async fn list_for_reporter(
        &self,
        actor: &ActorContext,
        query: Option<&str>,
    ) -> Vec<TicketResponseDto> {
        let needle = query.map(normalize_identifier).unwrap_or_default();
        let mut tickets: Vec<TicketResponseDto> = self
            .snapshot()
            .await
            .iter()
            .filter(|t| t.reporter_id == actor.actor_id)
            .filter(|t| {
                needle.is_empty()
                    || t.serial_number.contains(&needle)
                    || t.work_order.contains(&needle)
            })
            .map(TicketResponseDto::from)
            .collect();
        tickets.reverse();
        tickets
    }

    /// Every job for one serial number, oldest first (technician pick
    /// list).
    pub async fn search_by_serial(&self, serial_number: &str) -> Vec<TicketResponseDto> {
        let sn = normalize_identifier(serial_number);
        self.snapshot()
            .await
            .iter()
            .filter(|t| t.serial_number == sn)
            .map(TicketResponseDto::from)
            .collect()
    }

    /// Admin repair view: all tickets, optional SN/WO/model substring,
    /// newest first, capped.
    pub async fn list_all(&self, query: Option<&str>) -> Vec<TicketResponseDto> {
        let needle = normalize_identifier(query.unwrap_or_default());
        let mut tickets: Vec<TicketResponseDto> = self
            .snapshot()
            .await
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.serial_number.contains(&needle)
                    || t.work_order.contains(&needle)
                    || t.model.to_uppercase().contains(&needle)
            })
            .map(TicketResponseDto::from)
            .collect();
        tickets.reverse();
        tickets.truncate(ADMIN_VIEW_LIMIT);
        tickets
    }

    /// Public tracking: SN/WO substring plus model substring, last few
    /// matches only, status-level data.
    pub async fn track(&self, query: &str, model: &str) -> Vec<TrackingResponseDto> {
        let needle = normalize_identifier(query);
        let model_needle = normalize_identifier(model);
        // A blank search is not a browse-everything request
        if needle.is_empty() && model_needle.is_empty() {
            return Vec::new();
        }
        let matches: Vec<TrackingResponseDto> = self
            .snapshot()
            .await
            .iter()
            .filter(|t| {
                (needle.is_empty()
                    || t.serial_number.contains(&needle)
                    || t.work_order.contains(&needle))
                    && (model_needle.is_empty() || t.model.to_uppercase().contains(&model_needle))
            })
            .map(TrackingResponseDto::from)
            .collect();
        let skip = matches.len().saturating_sub(TRACKING_LIMIT);
        matches.into_iter().skip(skip).collect()
    }

    /// Snapshot for the metrics aggregator.
    pub async fn all_tickets(&self) -> Vec<RepairTicket> {
        self.snapshot().await
    }

    fn message(&self, event: NotifyEvent, ticket: &RepairTicket, actor: &str) -> NotifyMessage {
        NotifyMessage {
            event,
            work_order: ticket.work_order.clone(),
            serial_number: ticket.serial_number.clone(),
            model: ticket.model.clone(),
            failure: ticket.failure_description.clone(),
            actor: actor.to_string(),
        }
    }
}

/// Time left before the next re-notify is allowed; `None` when allowed.
///
/// An empty or unparseable last-notified cell never blocks.
pub fn cooldown_remaining(
    last_notified: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let last = last_notified?;
    let cooldown = Duration::seconds(RENOTIFY_COOLDOWN_SECS);
    let elapsed = now - last;
    if elapsed < cooldown {
        Some(cooldown - elapsed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::Role;
    use crate::features::tickets::models::{COL_ROOT_CAUSE, TICKET_COLUMNS};
    use crate::modules::notify::testing::RecordingNotifier;
    use crate::modules::sheets::memory::MemorySheetStore;
    use crate::shared::constants::MODEL_CATALOG_TABLE;
    use chrono::TimeZone;

    fn reporter() -> ActorContext {
        ActorContext {
            actor_id: "somchai".to_string(),
            role: Role::Reporter,
            station: "SMT-2".to_string(),
        }
    }

    fn technician() -> ActorContext {
        ActorContext {
            actor_id: "wichai".to_string(),
            role: Role::Technician,
            station: "Repair".to_string(),
        }
    }

    struct Fixture {
        store: Arc<MemorySheetStore>,
        notifier: Arc<RecordingNotifier>,
        service: TicketService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemorySheetStore::new());
        store.seed(TICKETS_TABLE, &TICKET_COLUMNS, Vec::new());
        store.seed(
            MODEL_CATALOG_TABLE,
            &["model", "product"],
            vec![vec!["M1".into(), "Controller".into()]],
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let service = TicketService::new(
            store.clone(),
            Arc::new(CatalogService::new(store.clone())),
            notifier.clone(),
        );
        Fixture {
            store,
            notifier,
            service,
        }
    }

    fn submit_dto(wo: &str, sn: &str) -> SubmitTicketDto {
        SubmitTicketDto {
            category: TicketCategory::Pcba,
            work_order: wo.to_string(),
            serial_number: sn.to_string(),
            model: "M1".to_string(),
            failure_description: "no power".to_string(),
        }
    }

    fn completed_dto(expected_version: u32) -> ResolveTicketDto {
        ResolveTicketDto {
            status: TicketStatus::Completed,
            root_cause: "blown fuse".to_string(),
            defect_type: "Electrical".to_string(),
            action_taken: "Replace fuse".to_string(),
            classification: "Component".to_string(),
            remark: String::new(),
            expected_version,
        }
    }

    #[tokio::test]
    async fn test_submit_assigns_sequential_positions() {
        let f = fixture();
        for i in 1..=3u32 {
            let (ticket, skipped) = f
                .service
                .submit(&reporter(), submit_dto("W1", &format!("S{}", i)), vec![])
                .await
                .unwrap();
            assert_eq!(ticket.position, i);
            assert_eq!(ticket.status, TicketStatus::Pending);
            assert_eq!(skipped, 0);
        }
        assert_eq!(f.notifier.events().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_normalizes_identifiers_and_derives_product() {
        let f = fixture();
        let (ticket, _) = f
            .service
            .submit(&reporter(), submit_dto(" w-1 ", "s1"), vec![])
            .await
            .unwrap();
        assert_eq!(ticket.work_order, "W-1");
        assert_eq!(ticket.serial_number, "S1");
        assert_eq!(ticket.product_name, "Controller");
        assert_eq!(ticket.station, "SMT-2");
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_pcba_model_without_store_write() {
        let f = fixture();
        let mut dto = submit_dto("W1", "S1");
        dto.model = "M9".to_string();
        let err = f.service.submit(&reporter(), dto, vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(f.store.row_count(TICKETS_TABLE), 0);
        assert!(f.notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_identifiers() {
        let f = fixture();
        let mut dto = submit_dto("  ", "S1");
        dto.work_order = "  ".to_string();
        let err = f.service.submit(&reporter(), dto, vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_identifiers() {
        let f = fixture();
        let err = f
            .service
            .submit(&reporter(), submit_dto("WO 1", "S1"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(f.store.row_count(TICKETS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_resolve_completes_and_stamps_technician() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        let (ticket, _) = f
            .service
            .resolve(&technician(), 1, completed_dto(1), vec![])
            .await
            .unwrap();

        assert_eq!(ticket.status, TicketStatus::Completed);
        assert_eq!(ticket.technician_id, "wichai");
        assert!(!ticket.resolved_at.is_empty());
        assert_eq!(ticket.version, 2);

        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_STATUS), "Completed");
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_TECH_ID), "wichai");
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_VERSION), "2");

        let events = f.notifier.events();
        assert_eq!(events.last(), Some(&NotifyEvent::Completed));
    }

    #[tokio::test]
    async fn test_resolve_terminal_requires_repair_details() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        let mut dto = completed_dto(1);
        dto.classification = "-- Select --".to_string();
        let err = f
            .service
            .resolve(&technician(), 1, dto, vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_STATUS), "Pending");
    }

    #[tokio::test]
    async fn test_resolve_non_terminal_stores_status_only() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        let dto = ResolveTicketDto {
            status: TicketStatus::WaitPart,
            root_cause: "ignored".to_string(),
            defect_type: String::new(),
            action_taken: String::new(),
            classification: String::new(),
            remark: String::new(),
            expected_version: 1,
        };
        let (ticket, _) = f.service.resolve(&technician(), 1, dto, vec![]).await.unwrap();

        assert_eq!(ticket.status, TicketStatus::WaitPart);
        assert!(ticket.technician_id.is_empty());
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_STATUS), "Wait Part");
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_ROOT_CAUSE), "");
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_TECH_ID), "");
    }

    #[tokio::test]
    async fn test_resolve_out_of_terminal_rejected() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();
        f.service
            .resolve(&technician(), 1, completed_dto(1), vec![])
            .await
            .unwrap();

        let mut dto = completed_dto(2);
        dto.status = TicketStatus::InProgress;
        let err = f
            .service
            .resolve(&technician(), 1, dto, vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_resolve_stale_version_conflicts() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        // First technician wins
        let dto = ResolveTicketDto {
            status: TicketStatus::InProgress,
            root_cause: String::new(),
            defect_type: String::new(),
            action_taken: String::new(),
            classification: String::new(),
            remark: String::new(),
            expected_version: 1,
        };
        f.service.resolve(&technician(), 1, dto, vec![]).await.unwrap();

        // Second technician still holds version 1
        let err = f
            .service
            .resolve(&technician(), 1, completed_dto(1), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_resolve_missing_ticket() {
        let f = fixture();
        let err = f
            .service
            .resolve(&technician(), 7, completed_dto(1), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_re_notify_updates_timestamp_on_delivery() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        let result = f.service.re_notify(&reporter(), 1).await.unwrap();
        assert!(result.delivered);
        assert!(!f.store.cell(TICKETS_TABLE, 1, COL_LAST_NOTIFIED).is_empty());
        assert_eq!(f.notifier.events().last(), Some(&NotifyEvent::ReNotify));
    }

    #[tokio::test]
    async fn test_re_notify_within_cooldown_refused() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();
        f.service.re_notify(&reporter(), 1).await.unwrap();

        let err = f.service.re_notify(&reporter(), 1).await.unwrap_err();
        assert!(matches!(err, AppError::RateLimitExceeded(_)));
        // Only the submit and the first re-notify went out
        assert_eq!(f.notifier.events().len(), 2);
    }

    #[tokio::test]
    async fn test_re_notify_failed_delivery_leaves_timestamp() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        f.notifier
            .fail_delivery
            .store(true, std::sync::atomic::Ordering::Relaxed);
        let result = f.service.re_notify(&reporter(), 1).await.unwrap();
        assert!(!result.delivered);
        assert_eq!(f.store.cell(TICKETS_TABLE, 1, COL_LAST_NOTIFIED), "");
    }

    #[tokio::test]
    async fn test_re_notify_foreign_ticket_forbidden() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        let other = ActorContext {
            actor_id: "malee".to_string(),
            role: Role::Reporter,
            station: "SMT-1".to_string(),
        };
        let err = f.service.re_notify(&other, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_re_notify_terminal_rejected() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();
        f.service
            .resolve(&technician(), 1, completed_dto(1), vec![])
            .await
            .unwrap();

        let err = f.service.re_notify(&reporter(), 1).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_cooldown_boundary() {
        let last = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        // 9m59s elapsed: refused
        let now = last + Duration::seconds(RENOTIFY_COOLDOWN_SECS - 1);
        assert!(cooldown_remaining(Some(last), now).is_some());
        // 10m00s elapsed: allowed
        let now = last + Duration::seconds(RENOTIFY_COOLDOWN_SECS);
        assert!(cooldown_remaining(Some(last), now).is_none());
        // Empty/unparseable cell never blocks
        assert!(cooldown_remaining(None, now).is_none());
    }

    #[tokio::test]
    async fn test_views_filter_and_order() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();
        f.service
            .submit(&reporter(), submit_dto("W2", "S2"), vec![])
            .await
            .unwrap();
        let other = ActorContext {
            actor_id: "malee".to_string(),
            role: Role::Reporter,
            station: "SMT-1".to_string(),
        };
        f.service
            .submit(&other, submit_dto("W3", "S1"), vec![])
            .await
            .unwrap();

        let mine = f.service.list_for_reporter(&reporter(), None).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].position, 2); // newest first

        let filtered = f.service.list_for_reporter(&reporter(), Some("s2")).await;
        assert_eq!(filtered.len(), 1);

        let by_sn = f.service.search_by_serial("s1").await;
        assert_eq!(by_sn.len(), 2);

        let all = f.service.list_all(Some("S1")).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].position, 3);

        let tracked = f.service.track("S1", "M1").await;
        assert_eq!(tracked.len(), 2);
    }

    #[tokio::test]
    async fn test_track_blank_query_returns_nothing() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();

        assert!(f.service.track("", "").await.is_empty());
        assert!(f.service.track("  ", " ").await.is_empty());
        // A model-only search still works
        assert_eq!(f.service.track("", "M1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_views_empty_when_store_unavailable() {
        let f = fixture();
        f.service
            .submit(&reporter(), submit_dto("W1", "S1"), vec![])
            .await
            .unwrap();
        f.store.set_unavailable(true);
        assert!(f.service.list_all(None).await.is_empty());
        assert!(f.service.track("S1", "").await.is_empty());
    }
}
