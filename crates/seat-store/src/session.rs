//! The floor-plan editing session.

use std::collections::HashMap;

use chrono::Utc;
use seat_core::entities::{AnalyzeRequest, AnalyzeResponse, Calibration, DetectedEntity, FloorPlanSnapshot, PreviewMeta};
use seat_core::ids;
use seat_layout::{SeatRules, WorldPlane};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::patch::EntityPatch;

/// Reference to the uploaded floor-plan image (path, URL, or storage key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Proof that an analysis was started by this session.
///
/// Carries the request's idempotency key. A response is applied only while
/// its ticket is still the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisTicket {
    pub idempotency_key: Uuid,
}

impl AnalysisTicket {
    /// The analyze request this ticket stands for.
    #[must_use]
    pub const fn request(&self, calibration: Calibration) -> AnalyzeRequest {
        AnalyzeRequest::new(self.idempotency_key, calibration)
    }
}

/// State of one floor-plan editing session.
///
/// `entities` is in paint order; `index` maps every entity id to its
/// position and is rebuilt whenever positions shift.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlanSession {
    rules: SeatRules,
    default_plane: WorldPlane,
    run_id: Option<Uuid>,
    entities: Vec<DetectedEntity>,
    index: HashMap<Uuid, usize>,
    preview: Option<PreviewMeta>,
    is_analyzing: bool,
    pending: Option<AnalysisTicket>,
    uploaded_image: Option<ImageRef>,
}

impl Default for FloorPlanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlanSession {
    /// An empty session with the default seat rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(SeatRules::default())
    }

    #[must_use]
    pub fn with_rules(rules: SeatRules) -> Self {
        Self::with_layout(WorldPlane::DEFAULT, rules)
    }

    /// An empty session whose runs fall back to `default_plane` when they
    /// carry no preview.
    #[must_use]
    pub fn with_layout(default_plane: WorldPlane, rules: SeatRules) -> Self {
        Self {
            rules,
            default_plane,
            run_id: None,
            entities: Vec::new(),
            index: HashMap::new(),
            preview: None,
            is_analyzing: false,
            pending: None,
            uploaded_image: None,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    #[must_use]
    pub const fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    #[must_use]
    pub fn entities(&self) -> &[DetectedEntity] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, id: Uuid) -> Option<&DetectedEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    /// Current paint-order position of the entity with `id`.
    #[must_use]
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewMeta> {
        self.preview.as_ref()
    }

    /// The plane the current run lives on; the session's default plane
    /// before any run or for a run without a preview.
    #[must_use]
    pub fn plane(&self) -> WorldPlane {
        self.plane_for(self.preview.as_ref())
    }

    #[must_use]
    pub const fn default_plane(&self) -> WorldPlane {
        self.default_plane
    }

    #[must_use]
    pub const fn rules(&self) -> &SeatRules {
        &self.rules
    }

    #[must_use]
    pub const fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    #[must_use]
    pub const fn pending_ticket(&self) -> Option<AnalysisTicket> {
        self.pending
    }

    #[must_use]
    pub const fn uploaded_image(&self) -> Option<&ImageRef> {
        self.uploaded_image.as_ref()
    }

    // ── Whole-run operations ───────────────────────────────────────

    /// Replace the run id, entities, and preview in one step.
    ///
    /// Entities are given ids where missing (duplicates get fresh ones),
    /// clamped into the run's plane, and have missing table seats inferred.
    pub fn set_run(
        &mut self,
        run_id: Uuid,
        entities: Vec<DetectedEntity>,
        preview: Option<PreviewMeta>,
    ) {
        let plane = self.plane_for(preview.as_ref());
        let (entities, index) = self.admit(entities, &plane);

        self.run_id = Some(run_id);
        self.entities = entities;
        self.index = index;
        self.preview = preview;
        tracing::debug!(%run_id, entities = self.entities.len(), "run replaced");
    }

    /// Return to the empty initial state, keeping only the seat rules and
    /// default plane.
    ///
    /// Any in-flight analysis is orphaned: its response will be stale.
    pub fn reset(&mut self) {
        if let Some(ticket) = self.pending {
            tracing::debug!(ticket = %ticket.idempotency_key, "reset orphaned pending analysis");
        }
        *self = Self::with_layout(self.default_plane, self.rules);
    }

    pub const fn set_analyzing(&mut self, analyzing: bool) {
        self.is_analyzing = analyzing;
    }

    pub fn set_uploaded_image(&mut self, image: Option<ImageRef>) {
        self.uploaded_image = image;
    }

    /// Current state as a serializable snapshot for persistence.
    #[must_use]
    pub fn snapshot(&self) -> FloorPlanSnapshot {
        FloorPlanSnapshot {
            run_id: self.run_id,
            preview: self.preview,
            entities: self.entities.clone(),
            captured_at: Utc::now(),
        }
    }

    // ── Analysis lifecycle ─────────────────────────────────────────

    /// Mark an analysis as in flight and hand out its ticket.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyAnalyzing` while another analysis is in
    /// flight; the caller drops the trigger rather than queueing it.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, StoreError> {
        if self.is_analyzing {
            return Err(StoreError::AlreadyAnalyzing);
        }
        let ticket = AnalysisTicket {
            idempotency_key: ids::new_idempotency_key(),
        };
        self.pending = Some(ticket);
        self.is_analyzing = true;
        Ok(ticket)
    }

    /// Apply a detector response if `ticket` is still the pending analysis.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StaleRun` when the session was reset, cancelled,
    /// or already completed since `ticket` was issued. The session is left
    /// untouched.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        response: AnalyzeResponse,
    ) -> Result<Uuid, StoreError> {
        if self.pending != Some(ticket) {
            tracing::debug!(
                ticket = %ticket.idempotency_key,
                run_id = %response.run_id,
                "discarding stale analysis response"
            );
            return Err(StoreError::StaleRun {
                ticket: ticket.idempotency_key,
                run_id: response.run_id,
            });
        }

        let run_id = response.run_id;
        self.set_run(run_id, response.entities, Some(response.preview));
        self.pending = None;
        self.is_analyzing = false;
        Ok(run_id)
    }

    /// Clear the in-flight state after the detector call failed.
    ///
    /// Returns `false` (and changes nothing) if `ticket` is no longer pending.
    pub fn fail_analysis(&mut self, ticket: AnalysisTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.cancel_analysis();
        true
    }

    /// Abandon any in-flight analysis; a late response will be stale.
    pub const fn cancel_analysis(&mut self) {
        self.pending = None;
        self.is_analyzing = false;
    }

    // ── Entity operations ──────────────────────────────────────────

    /// Merge `patch` into the entity at paint-order position `index`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IndexOutOfRange` when `index` is past the end;
    /// the session is left untouched.
    pub fn update_entity_at(
        &mut self,
        index: usize,
        patch: &EntityPatch,
    ) -> Result<&DetectedEntity, StoreError> {
        if index >= self.entities.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.entities.len(),
            });
        }
        self.patch_in_place(index, patch);
        Ok(&self.entities[index])
    }

    /// Merge `patch` into the entity with `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` when no entity has `id`.
    pub fn update_entity(
        &mut self,
        id: Uuid,
        patch: &EntityPatch,
    ) -> Result<&DetectedEntity, StoreError> {
        let index = self.position_of(id).ok_or(StoreError::EntityNotFound(id))?;
        self.patch_in_place(index, patch);
        Ok(&self.entities[index])
    }

    /// Append an entity on top of the paint order and return its id.
    pub fn add_entity(&mut self, entity: DetectedEntity) -> Uuid {
        let plane = self.plane();
        let mut entity = plane.clamp_entity(&entity);
        let id = match entity.id {
            Some(id) if !self.index.contains_key(&id) => id,
            _ => ids::new_entity_id(),
        };
        entity.id = Some(id);
        self.rules.fill_missing(std::slice::from_mut(&mut entity));

        self.index.insert(id, self.entities.len());
        self.entities.push(entity);
        id
    }

    /// Remove the entity with `id`; later entities keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` when no entity has `id`.
    pub fn remove_entity(&mut self, id: Uuid) -> Result<DetectedEntity, StoreError> {
        let index = self.index.remove(&id).ok_or(StoreError::EntityNotFound(id))?;
        let removed = self.entities.remove(index);
        for (offset, entity) in self.entities[index..].iter().enumerate() {
            if let Some(id) = entity.id {
                self.index.insert(id, index + offset);
            }
        }
        Ok(removed)
    }

    // ── Internals ──────────────────────────────────────────────────

    fn patch_in_place(&mut self, index: usize, patch: &EntityPatch) {
        let plane = self.plane();
        let rules = self.rules;
        let entity = &mut self.entities[index];

        let was_inferred = entity.seats_inferred;
        patch.apply_to(entity);

        if !entity.kind.is_seated() {
            entity.seats = 0;
            entity.shape = None;
            entity.seats_inferred = false;
        } else if patch.seats.is_some() {
            entity.seats_inferred = false;
        } else if was_inferred && patch.changes_geometry() {
            entity.seats = 0;
            entity.seats_inferred = false;
        }

        *entity = plane.clamp_entity(entity);
        rules.fill_missing(std::slice::from_mut(entity));
    }

    fn plane_for(&self, preview: Option<&PreviewMeta>) -> WorldPlane {
        preview.map_or(self.default_plane, WorldPlane::from_preview)
    }

    /// Assign ids, clamp, and infer seats for a batch entering the session.
    fn admit(
        &self,
        entities: Vec<DetectedEntity>,
        plane: &WorldPlane,
    ) -> (Vec<DetectedEntity>, HashMap<Uuid, usize>) {
        let mut admitted = plane.clamp_entities(&entities);
        let mut index = HashMap::with_capacity(admitted.len());

        for (position, entity) in admitted.iter_mut().enumerate() {
            let id = match entity.id {
                Some(id) if !index.contains_key(&id) => id,
                Some(duplicate) => {
                    let fresh = ids::new_entity_id();
                    tracing::debug!(%duplicate, %fresh, "duplicate entity id reassigned");
                    fresh
                }
                None => ids::new_entity_id(),
            };
            entity.id = Some(id);
            index.insert(id, position);
        }

        self.rules.fill_missing(&mut admitted);
        (admitted, index)
    }
}
