// Workflow controller - gates, builds prompts, fans out two generations, joins them

use super::intake::{DroppedItem, decode_item};
use super::prompts::build_prompts;
use super::selection::SelectionStore;
use super::service::{CompositeGenerationService, GenerationError};
use super::slots::{ImageSlotStore, is_ready};
use super::types::{AccentColor, GenerationResult, PhotoStyle, SlotId, WorkflowState};
use super::{GENERATION_FAILED_MESSAGE, ValidationError, WorkflowError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the workflow reads or writes, owned by one controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub slots: ImageSlotStore,
    pub selection: SelectionStore,
    pub status: WorkflowState,
}

pub struct WorkflowController {
    session: Session,
    service: Arc<dyn CompositeGenerationService>,
}

impl WorkflowController {
    pub fn new(service: Arc<dyn CompositeGenerationService>) -> Self {
        Self {
            session: Session::default(),
            service,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &WorkflowState {
        &self.session.status
    }

    pub fn is_ready(&self) -> bool {
        is_ready(&self.session.slots)
    }

    /// Accept a dropped item into a slot; rejected items leave the store untouched
    pub fn drop_item(&mut self, slot: SlotId, item: &DroppedItem) -> Result<(), ValidationError> {
        let file = decode_item(item).inspect_err(|e| {
            tracing::warn!("Rejected item for {}: {}", slot, e);
        })?;

        if let Some(previous) = self.session.slots.set_slot(slot, file) {
            tracing::debug!("Replaced {} in {}", previous.name, slot);
        }
        tracing::info!(
            "{} filled with {} ({}/{} slots)",
            slot,
            item.name,
            self.session.slots.filled_count(),
            SlotId::ALL.len()
        );

        Ok(())
    }

    pub fn set_style(&mut self, style: PhotoStyle) {
        self.session.selection.set_style(style);
    }

    pub fn set_color(&mut self, color: AccentColor) {
        self.session.selection.set_color(color);
    }

    /// Clear a finished result or error and return to idle
    pub fn dismiss(&mut self) {
        self.session.status = WorkflowState::Idle;
    }

    /// Generate both composites from the current slots and selection
    pub async fn submit(&mut self) -> Result<GenerationResult, WorkflowError> {
        let Some(images) = self.session.slots.snapshot() else {
            let missing = self.session.slots.missing();
            tracing::warn!("Submit blocked, missing: {:?}", missing);
            return Err(ValidationError::MissingImages(missing).into());
        };

        let service = &self.service;
        let progress = Progress::enter(&mut self.session.status);

        let selection = self.session.selection;
        let prompts = build_prompts(selection.style().label(), selection.color().hex());
        tracing::info!(
            "Generating from {} images via {} (style: {}, color: {})",
            images.len(),
            service.name(),
            selection.style(),
            selection.color()
        );

        // Both calls read the same snapshot and are polled together
        let (artistic, expository) = tokio::join!(
            service.generate(&images, &prompts.artistic),
            service.generate(&images, &prompts.expository),
        );

        match (artistic, expository) {
            (Ok(artistic), Ok(expository)) => {
                let result = GenerationResult { artistic, expository };
                progress.settle(WorkflowState::Succeeded(result.clone()));
                tracing::info!("Both composites generated");
                Ok(result)
            }
            (Err(err), other) => {
                if let Err(second) = other {
                    tracing::error!("Expository generation failed: {}", second);
                }
                Err(fail(progress, "artistic", err))
            }
            (Ok(_), Err(err)) => Err(fail(progress, "expository", err)),
        }
    }
}

fn fail(progress: Progress<'_>, kind: &str, err: GenerationError) -> WorkflowError {
    tracing::error!("{} generation failed: {}", kind, err);
    progress.settle(WorkflowState::Failed(GENERATION_FAILED_MESSAGE.to_string()));
    WorkflowError::Generation(err)
}

/// Holds the status at `InProgress` while a submission runs; an abandoned submission falls back to idle
struct Progress<'a> {
    status: &'a mut WorkflowState,
}

impl<'a> Progress<'a> {
    fn enter(status: &'a mut WorkflowState) -> Self {
        *status = WorkflowState::InProgress;
        Self { status }
    }

    fn settle(self, outcome: WorkflowState) {
        *self.status = outcome;
    }
}

impl Drop for Progress<'_> {
    fn drop(&mut self) {
        if self.status.is_in_progress() {
            tracing::warn!("Submission dropped before both generations settled");
            *self.status = WorkflowState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::types::{ImageReference, InlineImage};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::error::Error;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    /// Answers by prompt kind and fails the calls whose index is listed
    #[derive(Default)]
    struct ScriptedService {
        calls: AtomicUsize,
        failing: Mutex<HashSet<usize>>,
        prompts: Mutex<Vec<String>>,
        image_counts: Mutex<Vec<usize>>,
        barrier: Option<Barrier>,
        stall: bool,
    }

    impl ScriptedService {
        fn failing_on(indices: &[usize]) -> Self {
            let service = Self::default();
            service.failing.lock().unwrap().extend(indices);
            service
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompositeGenerationService for ScriptedService {
        async fn generate(
            &self,
            images: &[InlineImage],
            prompt: &str,
        ) -> Result<ImageReference, GenerationError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.image_counts.lock().unwrap().push(images.len());

            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if self.stall {
                std::future::pending::<()>().await;
            }

            if self.failing.lock().unwrap().contains(&index) {
                return Err(GenerationError::NetworkError("connection reset".to_string()));
            }

            let kind = if prompt.contains("catalog") { "expository" } else { "artistic" };
            Ok(ImageReference::new("image/png", format!("{}-{}", kind, index)))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn png(name: &str) -> DroppedItem {
        DroppedItem::new(name, "image/png", name.as_bytes().to_vec())
    }

    fn filled(service: Arc<ScriptedService>) -> WorkflowController {
        let mut controller = WorkflowController::new(service);
        for slot in SlotId::ALL {
            controller
                .drop_item(slot, &png(&format!("{:?}.png", slot)))
                .unwrap();
        }
        controller
    }

    #[test]
    fn test_non_image_drop_preserves_slot() {
        let mut controller = WorkflowController::new(Arc::new(ScriptedService::default()));
        controller.drop_item(SlotId::Model, &png("model.png")).unwrap();

        let err = controller
            .drop_item(SlotId::Model, &DroppedItem::new("cv.pdf", "application/pdf", vec![1, 2]))
            .unwrap_err();

        assert!(matches!(err, ValidationError::NotAnImage { .. }));
        assert_eq!(controller.session().slots.get_slot(SlotId::Model).unwrap().name, "model.png");
        assert_eq!(controller.session().slots.filled_count(), 1);
    }

    #[test]
    fn test_drop_replaces_existing_image() {
        let mut controller = WorkflowController::new(Arc::new(ScriptedService::default()));
        controller.drop_item(SlotId::Accessory, &png("hat.png")).unwrap();
        controller.drop_item(SlotId::Accessory, &png("bag.png")).unwrap();

        let slot = controller.session().slots.get_slot(SlotId::Accessory).unwrap();
        assert_eq!(slot.name, "bag.png");
        assert_eq!(controller.session().slots.filled_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_all_images() {
        let service = Arc::new(ScriptedService::default());
        let mut controller = WorkflowController::new(service.clone());
        controller.drop_item(SlotId::Scenario, &png("beach.png")).unwrap();

        let err = controller.submit().await.unwrap_err();

        match err {
            WorkflowError::Validation(ValidationError::MissingImages(missing)) => {
                assert_eq!(missing.len(), 5);
                assert!(!missing.contains(&SlotId::Scenario));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(service.call_count(), 0);
        assert_eq!(controller.state(), &WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_submit_success_attributes_results() {
        let service = Arc::new(ScriptedService::default());
        let mut controller = filled(service.clone());

        let result = controller.submit().await.unwrap();

        assert!(result.artistic.data.starts_with("artistic-"));
        assert!(result.expository.data.starts_with("expository-"));
        assert_ne!(result.artistic, result.expository);
        assert_eq!(controller.state().result(), Some(&result));
        assert!(!controller.state().is_in_progress());
        assert_eq!(service.call_count(), 2);
        assert_eq!(*service.image_counts.lock().unwrap(), vec![6, 6]);
    }

    #[tokio::test]
    async fn test_one_failed_call_fails_submission() {
        let service = Arc::new(ScriptedService::failing_on(&[1]));
        let mut controller = filled(service.clone());
        controller.set_style(PhotoStyle::CinematicHighContrast);
        controller.set_color(AccentColor::CrimsonRed);

        let err = controller.submit().await.unwrap_err();

        assert_eq!(err.to_string(), GENERATION_FAILED_MESSAGE);
        assert!(!err.to_string().contains("connection reset"));
        let cause = err.source().unwrap().to_string();
        assert!(cause.contains("connection reset"));

        assert_eq!(
            controller.state(),
            &WorkflowState::Failed(GENERATION_FAILED_MESSAGE.to_string())
        );
        assert!(controller.state().result().is_none());
        assert!(!controller.state().is_in_progress());
        assert_eq!(service.call_count(), 2);
    }

    #[tokio::test]
    async fn test_both_calls_overlap() {
        let service = Arc::new(ScriptedService {
            barrier: Some(Barrier::new(2)),
            ..ScriptedService::default()
        });
        let mut controller = filled(service.clone());

        // Sequential calls would never get past the barrier
        let result = tokio::time::timeout(Duration::from_secs(2), controller.submit())
            .await
            .expect("generation calls did not run concurrently");

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_resubmit_uses_latest_selection() {
        let service = Arc::new(ScriptedService::failing_on(&[0, 1]));
        let mut controller = filled(service.clone());

        assert!(controller.submit().await.is_err());
        assert!(controller.state().error().is_some());

        controller.set_style(PhotoStyle::GrittyUrbanRealism);
        controller.set_color(AccentColor::Teal);
        let result = controller.submit().await.unwrap();

        let prompts = service.prompts();
        assert_eq!(prompts.len(), 4);
        let retried = &prompts[2..];
        assert!(retried.iter().all(|p| p.contains("#008080")));
        assert!(retried.iter().any(|p| p.contains("Gritty Urban Realism")));
        assert!(prompts[..2].iter().all(|p| p.contains("#FFFFFF")));
        assert_eq!(controller.state().result(), Some(&result));
    }

    #[tokio::test]
    async fn test_abandoned_submit_clears_progress() {
        let service = Arc::new(ScriptedService {
            stall: true,
            ..ScriptedService::default()
        });
        let mut controller = filled(service.clone());

        let outcome = tokio::time::timeout(Duration::from_millis(50), controller.submit()).await;

        assert!(outcome.is_err());
        assert_eq!(service.call_count(), 2);
        assert!(!controller.state().is_in_progress());
        assert_eq!(controller.state(), &WorkflowState::Idle);
        assert!(controller.is_ready());
    }

    #[tokio::test]
    async fn test_dismiss_returns_to_idle() {
        let service = Arc::new(ScriptedService::default());
        let mut controller = filled(service);
        controller.submit().await.unwrap();

        controller.dismiss();
        assert_eq!(controller.state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_session_serializes() {
        let mut controller = WorkflowController::new(Arc::new(ScriptedService::default()));
        controller.drop_item(SlotId::Clothing2, &png("skirt.png")).unwrap();

        let value = serde_json::to_value(controller.session()).unwrap();
        assert_eq!(value["status"]["state"], "idle");
        assert_eq!(value["slots"]["slots"]["Clothing2"]["name"], "skirt.png");

        let restored: Session = serde_json::from_value(value).unwrap();
        assert!(restored.slots.get_slot(SlotId::Clothing2).is_some());
    }
}
