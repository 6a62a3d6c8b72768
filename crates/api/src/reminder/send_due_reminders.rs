use crate::shared::usecase::UseCase;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::ReminderContext;
use tracing::{error, info};

/// One scan over the stored reminders.
///
/// Marks every due reminder as sent and persists the list, then prunes
/// reminders whose surgery is past the retention window. Responds with the
/// reminders that became due and still have to be delivered.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = Vec<ScheduledReminder>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();

        // Only deliver when the sent flags are stored, otherwise the next
        // scan would deliver the same reminders again
        let due = ctx
            .repos
            .reminder_repo
            .mark_due_as_sent(now)
            .await
            .map_err(|e| {
                error!("Unable to store sent reminders. Err: {:?}", e);
                UseCaseErrors::StorageError
            })?;

        match ctx.repos.reminder_repo.delete_expired(now).await {
            Ok(res) if res.deleted_count > 0 => {
                info!("Pruned {} expired reminder(s)", res.deleted_count)
            }
            Ok(_) => (),
            Err(e) => error!("Unable to prune expired reminders. Err: {:?}", e),
        }

        Ok(due)
    }
}
