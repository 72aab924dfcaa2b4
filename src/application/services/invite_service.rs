//! Invite Service
//!
//! Rating invite management. Creating an invite that has not been sent yet
//! schedules the `send_invite_message` task.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::hook_service::{fire_model_event, HookService};
use crate::application::tasks::Job;
use crate::domain::{HookEvent, Invite, InviteFilter, InviteRepository};
use crate::infrastructure::queue::JobQueue;
use crate::shared::error::AppError;

/// Invite service trait
#[async_trait]
pub trait InviteService: Send + Sync {
    /// List invites matching the filter
    async fn list_invites(&self, filter: InviteFilter) -> Result<Vec<Invite>, InviteError>;

    /// Get invite by ID
    async fn get_invite(&self, invite_id: Uuid) -> Result<Invite, InviteError>;

    /// Create an invite
    async fn create_invite(&self, request: InviteInputDto) -> Result<Invite, InviteError>;

    /// Replace an invite's identity and data; omitted optional fields are kept
    async fn replace_invite(
        &self,
        invite_id: Uuid,
        request: InviteInputDto,
    ) -> Result<Invite, InviteError>;

    /// Update the given fields only
    async fn patch_invite(
        &self,
        invite_id: Uuid,
        update: InvitePatchDto,
    ) -> Result<Invite, InviteError>;

    /// Delete an invite and its ratings
    async fn delete_invite(&self, invite_id: Uuid) -> Result<(), InviteError>;
}

/// Create/replace invite request
#[derive(Debug, Clone, PartialEq)]
pub struct InviteInputDto {
    pub identity: String,
    pub invite: Map<String, Value>,
    pub version: Option<i32>,
    pub invited: Option<bool>,
    pub completed: Option<bool>,
    pub expired: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial invite update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvitePatchDto {
    pub identity: Option<String>,
    pub invite: Option<Map<String, Value>>,
    pub version: Option<i32>,
    pub invited: Option<bool>,
    pub completed: Option<bool>,
    pub expired: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<InviteInputDto> for InvitePatchDto {
    fn from(input: InviteInputDto) -> Self {
        Self {
            identity: Some(input.identity),
            invite: Some(input.invite),
            version: input.version,
            invited: input.invited,
            completed: input.completed,
            expired: input.expired,
            expires_at: input.expires_at,
        }
    }
}

impl InvitePatchDto {
    fn apply(self, invite: &mut Invite) {
        if let Some(identity) = self.identity {
            invite.identity = identity;
        }
        if let Some(data) = self.invite {
            invite.invite = data;
        }
        if let Some(version) = self.version {
            invite.version = version;
        }
        if let Some(invited) = self.invited {
            invite.invited = invited;
        }
        if let Some(completed) = self.completed {
            invite.completed = completed;
        }
        if let Some(expired) = self.expired {
            invite.expired = expired;
        }
        if let Some(expires_at) = self.expires_at {
            invite.expires_at = Some(expires_at);
        }
    }
}

/// Invite service errors
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Invite not found")]
    NotFound,

    #[error("Failed to schedule invite message: {0}")]
    Queue(String),

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// InviteService implementation
pub struct InviteServiceImpl<I, K>
where
    I: InviteRepository,
    K: HookService,
{
    invite_repo: Arc<I>,
    hooks: Arc<K>,
    queue: Arc<dyn JobQueue>,
}

impl<I, K> InviteServiceImpl<I, K>
where
    I: InviteRepository,
    K: HookService + 'static,
{
    pub fn new(invite_repo: Arc<I>, hooks: Arc<K>, queue: Arc<dyn JobQueue>) -> Self {
        Self {
            invite_repo,
            hooks,
            queue,
        }
    }

    async fn load(&self, invite_id: Uuid) -> Result<Invite, InviteError> {
        self.invite_repo
            .find_by_id(invite_id)
            .await?
            .ok_or(InviteError::NotFound)
    }

    async fn store_update(
        &self,
        mut invite: Invite,
        update: InvitePatchDto,
    ) -> Result<Invite, InviteError> {
        update.apply(&mut invite);
        let invite = self.invite_repo.update(&invite).await.map_err(|e| match e {
            AppError::NotFound(_) => InviteError::NotFound,
            e => InviteError::Repository(e),
        })?;

        fire_model_event(&*self.hooks, HookEvent::InviteChanged, &invite).await;
        Ok(invite)
    }
}

#[async_trait]
impl<I, K> InviteService for InviteServiceImpl<I, K>
where
    I: InviteRepository + 'static,
    K: HookService + 'static,
{
    async fn list_invites(&self, filter: InviteFilter) -> Result<Vec<Invite>, InviteError> {
        Ok(self.invite_repo.list(&filter).await?)
    }

    async fn get_invite(&self, invite_id: Uuid) -> Result<Invite, InviteError> {
        self.load(invite_id).await
    }

    async fn create_invite(&self, request: InviteInputDto) -> Result<Invite, InviteError> {
        let mut invite = Invite::new(request.identity.clone(), Map::new());
        InvitePatchDto::from(request).apply(&mut invite);

        let invite = self.invite_repo.create(&invite).await?;
        info!(invite_id = %invite.id, identity = %invite.identity, "Invite created");

        if invite.needs_sending() {
            self.queue
                .enqueue(Job::SendInviteMessage {
                    invite_id: invite.id,
                })
                .await
                .map_err(|e| InviteError::Queue(e.to_string()))?;
        }

        fire_model_event(&*self.hooks, HookEvent::InviteAdded, &invite).await;
        Ok(invite)
    }

    async fn replace_invite(
        &self,
        invite_id: Uuid,
        request: InviteInputDto,
    ) -> Result<Invite, InviteError> {
        let invite = self.load(invite_id).await?;
        self.store_update(invite, request.into()).await
    }

    async fn patch_invite(
        &self,
        invite_id: Uuid,
        update: InvitePatchDto,
    ) -> Result<Invite, InviteError> {
        let invite = self.load(invite_id).await?;
        self.store_update(invite, update).await
    }

    async fn delete_invite(&self, invite_id: Uuid) -> Result<(), InviteError> {
        let invite = self.load(invite_id).await?;
        self.invite_repo.delete(invite_id).await.map_err(|e| match e {
            AppError::NotFound(_) => InviteError::NotFound,
            e => InviteError::Repository(e),
        })?;

        fire_model_event(&*self.hooks, HookEvent::InviteDeleted, &invite).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::hook_service::{HookError, MockHookService};
    use crate::domain::{MockInviteRepository, RecordId};
    use crate::infrastructure::queue::InMemoryJobQueue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(data: Value) -> InviteInputDto {
        InviteInputDto {
            identity: "8a1c".into(),
            invite: data.as_object().cloned().unwrap_or_default(),
            version: None,
            invited: None,
            completed: None,
            expired: None,
            expires_at: None,
        }
    }

    fn echo_repo() -> MockInviteRepository {
        let mut repo = MockInviteRepository::new();
        repo.expect_create().returning(|invite| Ok(invite.clone()));
        repo
    }

    #[tokio::test]
    async fn test_create_unsent_invite_schedules_message() {
        let mut hooks = MockHookService::new();
        hooks
            .expect_fire_event()
            .withf(|event, _, data| *event == HookEvent::InviteAdded && data["identity"] == "8a1c")
            .times(1)
            .returning(|_, _, _| Ok(0));

        let queue = Arc::new(InMemoryJobQueue::new());
        let service = InviteServiceImpl::new(Arc::new(echo_repo()), Arc::new(hooks), queue.clone());

        let invite = service
            .create_invite(input(json!({"to_addr": "+27123"})))
            .await
            .unwrap();

        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].job,
            Job::SendInviteMessage {
                invite_id: invite.id
            }
        );
    }

    #[tokio::test]
    async fn test_create_sent_invite_schedules_nothing() {
        let mut hooks = MockHookService::new();
        hooks.expect_fire_event().returning(|_, _, _| Ok(0));

        let queue = Arc::new(InMemoryJobQueue::new());
        let service = InviteServiceImpl::new(Arc::new(echo_repo()), Arc::new(hooks), queue.clone());

        let mut request = input(json!({}));
        request.invited = Some(true);
        let invite = service.create_invite(request).await.unwrap();

        assert!(invite.invited);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_patch_keeps_unset_fields() {
        let data = json!({"to_addr": "+27123"}).as_object().cloned().unwrap();
        let existing = Invite::new("8a1c", data);
        let invite_id = existing.id;

        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().returning(|invite| Ok(invite.clone()));

        let mut hooks = MockHookService::new();
        hooks
            .expect_fire_event()
            .withf(move |event, id, _| {
                *event == HookEvent::InviteChanged && *id == RecordId::Uuid(invite_id)
            })
            .times(1)
            .returning(|_, _, _| Ok(1));

        let service = InviteServiceImpl::new(
            Arc::new(repo),
            Arc::new(hooks),
            Arc::new(InMemoryJobQueue::new()),
        );

        let updated = service
            .patch_invite(
                invite_id,
                InvitePatchDto {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.identity, "8a1c");
        assert_eq!(updated.to_addr(), Some(&json!("+27123")));
    }

    #[tokio::test]
    async fn test_delete_missing_invite_is_not_found() {
        let mut repo = MockInviteRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let mut hooks = MockHookService::new();
        hooks.expect_fire_event().times(0);

        let service = InviteServiceImpl::new(
            Arc::new(repo),
            Arc::new(hooks),
            Arc::new(InMemoryJobQueue::new()),
        );

        let err = service.delete_invite(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, InviteError::NotFound));
    }

    #[tokio::test]
    async fn test_hook_failures_do_not_fail_the_request() {
        let mut hooks = MockHookService::new();
        hooks
            .expect_fire_event()
            .returning(|_, _, _| Err(HookError::Queue("down".into())));

        let service = InviteServiceImpl::new(
            Arc::new(echo_repo()),
            Arc::new(hooks),
            Arc::new(InMemoryJobQueue::new()),
        );

        assert!(service.create_invite(input(json!({}))).await.is_ok());
    }
}
