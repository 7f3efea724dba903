use crate::domain::models::NotificationMessage;

/// External notification dispatcher. Fire-and-forget from the engine's
/// perspective: a failed dispatch must never reverse a transition that
/// already succeeded, so the orchestrator logs and swallows errors from
/// this trait.
pub trait Notifier: Send + Sync {
    fn dispatch(&self, message: &NotificationMessage) -> anyhow::Result<()>;
}

/// Default notifier: writes the message to the log instead of sending
/// e-mail. Real delivery lives outside this service.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn dispatch(&self, message: &NotificationMessage) -> anyhow::Result<()> {
        log::info!(
            "Notify {}: {} request {} is now {} ({} to {})",
            message.recipient_email,
            message.kind,
            message.request_id,
            message.status,
            message.start_date,
            message.end_date
        );
        Ok(())
    }
}
