use tracing::instrument;

use crate::backend::{BackendClient, BackendReply};
use crate::errors::AppError;
use crate::models::short_url::{BackendShortUrl, ShortUrlRecord};
use crate::store::{LinkStore, NewShortUrl};

#[derive(Clone, Debug)]
pub struct LinkService {
    store: LinkStore,
    backend: BackendClient,
}

impl LinkService {
    pub fn new(store: LinkStore, backend: BackendClient) -> Self {
        Self { store, backend }
    }

    /// The create flow behind the form: shorten via the backend, then save
    /// the returned record in the local slot.
    #[instrument(name = "Service: Create short URL", skip(self))]
    pub async fn create(&self, url: &str) -> Result<Vec<ShortUrlRecord>, AppError> {
        let reply = self.forward_create(url).await?;
        if !reply.is_success() {
            tracing::warn!(status = reply.status, "Backend rejected create request");
            return Err(AppError::BackendRejected(reply.status));
        }
        // A success body that doesn't carry the record counts as a transport
        // failure, same as a body that isn't JSON at all.
        let created: BackendShortUrl = serde_json::from_value(reply.body).map_err(|err| {
            tracing::error!("Backend reply did not match the expected shape: {err}");
            AppError::BackendUnreachable
        })?;

        Ok(self.store.append(NewShortUrl {
            code: created.short_code,
            original_url: created.original_url,
            short_url: created.short_url,
            created_at: created.created_at,
        })?)
    }

    /// Single best-effort backend call, used directly by the JSON proxy.
    pub async fn forward_create(&self, url: &str) -> Result<BackendReply, AppError> {
        self.backend.create_short_url(url).await.map_err(|err| {
            tracing::error!("Backend call failed: {err}");
            AppError::BackendUnreachable
        })
    }

    pub fn list(&self) -> Vec<ShortUrlRecord> {
        self.store.load()
    }

    pub fn delete(&self, code: &str) -> Result<Vec<ShortUrlRecord>, AppError> {
        Ok(self.store.remove(code)?)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        Ok(self.store.clear()?)
    }

    pub fn redirect_url(&self, code: &str) -> String {
        self.backend.redirect_url(code)
    }
}
