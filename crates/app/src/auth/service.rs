//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionMetadata, SessionTokenVersion,
        format_session_token, generate_session_secret, hash_session_token, models::NewSession,
        parse_session_token, repository::PgAuthRepository,
    },
    domain::owners::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new session token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_session(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let metadata = self
            .repository
            .create_session(&NewSession {
                uuid: session_uuid,
                user_uuid: user,
                token_hash: hash_session_token(&session_uuid, version, &secret),
                expires_at,
            })
            .await?;

        Ok(IssuedSession { token, metadata })
    }

    /// Revoke a session by UUID.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] if the session does not exist or was already
    /// revoked.
    pub async fn revoke_session(
        &self,
        session_uuid: Uuid,
    ) -> Result<SessionMetadata, AuthServiceError> {
        self.repository
            .revoke_session(session_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_ignored| AuthServiceError::NotFound)?;
        let token_hash = hash_session_token(&parsed.session_uuid, parsed.version, &parsed.secret);

        let session = self
            .repository
            .find_active_session(parsed.session_uuid, &token_hash, Timestamp::now())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        Ok(session.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
