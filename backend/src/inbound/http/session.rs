//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Login stores the authenticated user's id in an encrypted cookie; the
//! wrapper here is the only code that touches the raw Actix session, so
//! handlers deal in [`UserId`] values and domain errors.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated user in the session cookie.
    ///
    /// # Errors
    /// Returns an internal error when the session backend rejects the write.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the logged-in user's id from the session, if present.
    ///
    /// A stored value that no longer parses as a UUID is treated as an absent
    /// session rather than an error; the cookie is authenticated, so this
    /// only happens across incompatible deployments.
    ///
    /// # Errors
    /// Returns an internal error when the session backend fails to read.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = stored else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                tracing::warn!("session cookie carried an unusable user id: {error}");
                Ok(None)
            }
        }
    }

    /// Require a logged-in user or return `401 Unauthorized`.
    ///
    /// # Errors
    /// Returns [`Error::unauthorized`] when no valid session is present.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
