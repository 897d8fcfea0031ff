/// Use cases module containing application business logic orchestration
mod identify_artifacts;
mod reconcile_notifications;

pub use identify_artifacts::IdentifyArtifactsUseCase;
pub use reconcile_notifications::ReconcileNotificationsUseCase;
