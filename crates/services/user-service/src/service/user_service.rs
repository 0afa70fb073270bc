//! User service - Handles user-related business logic.
//!
//! Registration runs as a strictly ordered pipeline:
//! validate → uniqueness check → hash → defaults/timestamp → insert →
//! notify → respond. Nothing touches the store before validation passes.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult};
use domain::{DomainError, NewUser, Password, PublicUser, HELLO_GREETING};

use crate::events::{EntityChanged, EntityEvents};
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user and return its public projection
    async fn register(&self, candidate: NewUser) -> AppResult<PublicUser>;

    /// Fixed greeting
    fn hello(&self) -> String;

    /// Personalized greeting; `name` must not be empty
    fn welcome(&self, name: &str) -> AppResult<String>;
}

/// Concrete implementation of UserService using repository and event ports.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    events: Arc<dyn EntityEvents>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, events: Arc<dyn EntityEvents>) -> Self {
        Self { repo, events }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, mut candidate: NewUser) -> AppResult<PublicUser> {
        debug!(email = %candidate.email, "Registering user");

        candidate.check()?;

        if self.repo.find_one_by_email(&candidate.email).await?.is_some() {
            warn!(email = %candidate.email, "Registration rejected: email exists");
            return Err(DomainError::email_exists().into());
        }

        // Hashing is CPU-bound; keep it off the async workers
        let plain_text = std::mem::take(&mut candidate.password);
        let password = tokio::task::spawn_blocking(move || Password::new(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;

        let stored = self.repo.insert(candidate.into_pending(password)).await?;
        let user = PublicUser::from(stored);

        // The record is committed; a lost notification must not fail the call
        if let Err(e) = self
            .events
            .entity_changed(&EntityChanged::created(user.clone()))
            .await
        {
            warn!(user_id = %user.id, "Failed to emit users.entity.created: {}", e);
        }

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    fn hello(&self) -> String {
        HELLO_GREETING.to_string()
    }

    fn welcome(&self, name: &str) -> AppResult<String> {
        if name.is_empty() {
            return Err(AppError::invalid_field("name", "The 'name' field is required"));
        }
        Ok(format!("Welcome, {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;
    use sea_orm::DbErr;
    use uuid::Uuid;

    use crate::events::{EntityChange, MockEntityEvents};
    use crate::repository::MockUserRepository;
    use domain::{PendingUser, User};

    fn ada() -> NewUser {
        NewUser {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            bio: None,
            image: None,
        }
    }

    fn stored(pending: PendingUser) -> AppResult<User> {
        Ok(User::from_pending(Uuid::new_v4(), pending))
    }

    fn existing_ada() -> User {
        User::from_pending(
            Uuid::new_v4(),
            ada().into_pending(Password::from_hash("hash".to_string())),
        )
    }

    fn service(repo: MockUserRepository, events: MockEntityEvents) -> UserManager {
        UserManager::new(Arc::new(repo), Arc::new(events))
    }

    fn quiet_events() -> MockEntityEvents {
        let mut events = MockEntityEvents::new();
        events.expect_entity_changed().returning(|_| Ok(()));
        events
    }

    fn untouched_repo() -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().times(0);
        repo.expect_insert().times(0);
        repo
    }

    fn silent_events() -> MockEntityEvents {
        let mut events = MockEntityEvents::new();
        events.expect_entity_changed().times(0);
        events
    }

    fn field_names(err: &AppError) -> Vec<&str> {
        err.fields().iter().map(|f| f.field.as_str()).collect()
    }

    #[tokio::test]
    async fn test_register_success_runs_pipeline_in_order() {
        let mut seq = Sequence::new();
        let mut repo = MockUserRepository::new();
        let mut events = MockEntityEvents::new();

        repo.expect_find_one_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(stored);
        events
            .expect_entity_changed()
            .withf(|event| {
                event.kind == EntityChange::Created && event.entity.email == "ada@example.com"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let user = service(repo, events).register(ada()).await.unwrap();

        assert_eq!(user.firstname, "Ada");
        assert_eq!(user.lastname, "Lovelace");
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_persists_hash_and_defaults() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|pending| {
                pending.password_hash != "secret1"
                    && Password::from_hash(pending.password_hash.clone()).verify("secret1")
                    && !Password::from_hash(pending.password_hash.clone()).verify("secret2")
                    && pending.bio.is_empty()
                    && pending.image.is_none()
            })
            .times(1)
            .returning(stored);

        let user = service(repo, quiet_events()).register(ada()).await.unwrap();

        assert_eq!(user.bio, "");
        assert_eq!(user.image, None);
    }

    #[tokio::test]
    async fn test_register_response_matches_public_shape() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(stored);

        let user = service(repo, quiet_events()).register(ada()).await.unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "_id": user.id.to_string(),
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@example.com",
                "bio": "",
                "image": null,
            })
        );
    }

    #[tokio::test]
    async fn test_register_keeps_supplied_bio_and_image() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(stored);

        let mut candidate = ada();
        candidate.bio = Some("First programmer".to_string());
        candidate.image = Some("https://example.com/ada.png".to_string());

        let user = service(repo, quiet_events()).register(candidate).await.unwrap();

        assert_eq!(user.bio, "First programmer");
        assert_eq!(user.image.as_deref(), Some("https://example.com/ada.png"));
    }

    #[tokio::test]
    async fn test_short_password_rejected_without_side_effects() {
        let mut candidate = ada();
        candidate.password = "abc".to_string();

        let err = service(untouched_repo(), silent_events())
            .register(candidate)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_names(&err), vec!["password"]);
    }

    #[tokio::test]
    async fn test_malformed_email_rejected_without_side_effects() {
        let mut candidate = ada();
        candidate.email = "ada-at-example".to_string();

        let err = service(untouched_repo(), silent_events())
            .register(candidate)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(field_names(&err), vec!["email"]);
    }

    #[tokio::test]
    async fn test_missing_names_rejected() {
        let mut candidate = ada();
        candidate.firstname = String::new();
        candidate.lastname = String::new();

        let err = service(untouched_repo(), silent_events())
            .register(candidate)
            .await
            .unwrap_err();

        assert_eq!(field_names(&err), vec!["firstname", "lastname"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_every_time() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email()
            .times(2)
            .returning(|_| Ok(Some(existing_ada())));
        repo.expect_insert().times(0);
        let service = service(repo, silent_events());

        for _ in 0..2 {
            let err = service.register(ada()).await.unwrap_err();
            match err {
                AppError::Conflict { message, fields } => {
                    assert_eq!(message, "Email exists!");
                    assert_eq!(fields.len(), 1);
                    assert_eq!(fields[0].field, "email");
                    assert_eq!(fields[0].message, "Email exists");
                }
                other => panic!("expected conflict, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_unique_violation_on_insert_is_conflict() {
        // Concurrent registration slipped past the pre-check
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(DomainError::email_exists().into()));

        let err = service(repo, silent_events())
            .register(ada())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.user_message(), "Email exists!");
    }

    #[tokio::test]
    async fn test_storage_error_propagates_without_retry() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::from(DbErr::Custom("connection reset".to_string()))));

        let err = service(repo, silent_events())
            .register(ada())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email()
            .returning(|_| Err(AppError::from(DbErr::Custom("timeout".to_string()))));
        repo.expect_insert().times(0);

        let err = service(repo, silent_events())
            .register(ada())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_registration() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_one_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(stored);

        let mut events = MockEntityEvents::new();
        events
            .expect_entity_changed()
            .times(1)
            .returning(|_| Err(AppError::internal("bus down")));

        let user = service(repo, events).register(ada()).await;
        assert!(user.is_ok());
    }

    #[test]
    fn test_hello() {
        let service = service(untouched_repo(), silent_events());
        assert_eq!(service.hello(), "Hello Moleculer");
    }

    #[test]
    fn test_welcome() {
        let service = service(untouched_repo(), silent_events());

        assert_eq!(service.welcome("Ada").unwrap(), "Welcome, Ada");

        let err = service.welcome("").unwrap_err();
        assert_eq!(field_names(&err), vec!["name"]);
    }
}
