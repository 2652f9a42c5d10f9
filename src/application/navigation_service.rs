// Navigation service - Use case for opening filtered membership lists
use crate::application::errors::DispatchError;
use crate::domain::navigation::{MembershipShortcut, NavigationRequest};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

/// Host collaborator that carries out navigation requests.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    async fn dispatch(&self, request: &NavigationRequest) -> Result<(), DispatchError>;
}

pub trait Clock: Send + Sync {
    /// Current date in the viewer's local calendar.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Clone)]
pub struct NavigationActions {
    dispatcher: Arc<dyn ActionDispatcher>,
    clock: Arc<dyn Clock>,
}

impl NavigationActions {
    pub fn new(dispatcher: Arc<dyn ActionDispatcher>, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }

    pub async fn open_active_memberships(&self) -> Result<NavigationRequest, DispatchError> {
        self.open(MembershipShortcut::Active).await
    }

    pub async fn open_expired_memberships(&self) -> Result<NavigationRequest, DispatchError> {
        self.open(MembershipShortcut::Expired).await
    }

    pub async fn open_suspended_memberships(&self) -> Result<NavigationRequest, DispatchError> {
        self.open(MembershipShortcut::Suspended).await
    }

    pub async fn open_about_to_expire(&self) -> Result<NavigationRequest, DispatchError> {
        self.open(MembershipShortcut::AboutToExpire).await
    }

    /// Build the request for `shortcut` against today's date and dispatch it.
    /// Dispatch errors are returned untouched.
    async fn open(&self, shortcut: MembershipShortcut) -> Result<NavigationRequest, DispatchError> {
        let request = shortcut.request(self.clock.today());
        tracing::info!(filters = request.filter().len(), "Opening {}", request.display_name());
        self.dispatcher.dispatch(&request).await?;
        Ok(request)
    }
}
