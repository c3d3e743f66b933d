use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use color_eyre::eyre::Result;
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd::ShopAction,
        msg::shop::{ShopReply, ShopResponse},
        raw_msg::RawMsg,
    },
    domain::{request::RequestId, shop::Session},
    infrastructure::{
        backend::{ShopBackend, ShopError, ShopResult},
        session_store::SessionStore,
    },
};

/// Work accepted by the shop service
#[derive(Debug, Clone, PartialEq)]
pub enum ShopOperation {
    Run {
        request: RequestId,
        session: Option<Session>,
        action: ShopAction,
    },
    /// Drop a pending read; its response is never delivered
    Cancel { request: RequestId },
    SaveSession(Session),
    ClearSession,
}

impl ShopOperation {
    pub fn name(&self) -> &'static str {
        match self {
            ShopOperation::Run { action, .. } => action.name(),
            ShopOperation::Cancel { .. } => "cancel",
            ShopOperation::SaveSession(_) => "save_session",
            ShopOperation::ClearSession => "clear_session",
        }
    }
}

/// Runs backend calls off the update loop. Each request gets its own task
/// and reports back as `RawMsg::Backend`.
pub struct ShopService {
    backend: Arc<dyn ShopBackend>,
    sessions: SessionStore,
    // Incoming channels
    op_rx: mpsc::UnboundedReceiver<ShopOperation>,
    cancel_token: CancellationToken,
    // Outgoing channels
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    inflight: HashMap<RequestId, CancellationToken>,
    tasks: JoinSet<RequestId>,
}

pub type NewShopService = (
    mpsc::UnboundedSender<ShopOperation>, // op_tx - operations to run
    CancellationToken,                    // shutdown signal
    ShopService,
);

impl ShopService {
    pub fn new(
        backend: Arc<dyn ShopBackend>,
        sessions: SessionStore,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
    ) -> Result<NewShopService> {
        let (op_tx, op_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        Ok((
            op_tx,
            cancel_token.clone(),
            Self {
                backend,
                sessions,
                op_rx,
                cancel_token,
                raw_tx,
                inflight: HashMap::new(),
                tasks: JoinSet::new(),
            },
        ))
    }

    /// Run the ShopService in a background task
    pub fn run(mut self) {
        tokio::spawn(async move {
            if let Err(e) = self.run_service().await {
                log::error!("ShopService error: {e}");
                let _ = self
                    .raw_tx
                    .send(RawMsg::Error(format!("ShopService error: {e}")));
            }
        });
    }

    async fn run_service(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                result = self.op_rx.recv() => {
                    match result {
                        Some(op) => self.handle_operation(op).await,
                        None => {
                            log::info!("ShopService: operation channel closed");
                            break;
                        }
                    }
                }

                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    match joined {
                        Ok(request) => {
                            self.inflight.remove(&request);
                        }
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => log::error!("Shop request task failed: {e}"),
                    }
                }

                _ = self.cancel_token.cancelled() => {
                    log::info!("ShopService received cancellation signal");
                    break;
                }
            }
        }

        // Every request token is a child of the service token
        self.cancel_token.cancel();
        self.inflight.clear();
        self.tasks.shutdown().await;
        Ok(())
    }

    async fn handle_operation(&mut self, op: ShopOperation) {
        log::debug!("Handling ShopOperation: {}", op.name());

        match op {
            ShopOperation::Run {
                request,
                session,
                action,
            } => self.spawn_request(request, session, action),

            ShopOperation::Cancel { request } => {
                if let Some(token) = self.inflight.remove(&request) {
                    log::debug!("Cancelling request {request}");
                    token.cancel();
                }
            }

            ShopOperation::SaveSession(session) => {
                if let Err(e) = self.sessions.save(&session).await {
                    log::error!("Failed to persist session: {e}");
                    let _ = self
                        .raw_tx
                        .send(RawMsg::Error(format!("Failed to save session: {e}")));
                }
            }

            ShopOperation::ClearSession => {
                if let Err(e) = self.sessions.clear().await {
                    log::error!("Failed to remove persisted session: {e}");
                }
            }
        }
    }

    fn spawn_request(&mut self, request: RequestId, session: Option<Session>, action: ShopAction) {
        let backend = Arc::clone(&self.backend);
        let sessions = self.sessions.clone();
        let raw_tx = self.raw_tx.clone();
        let token = self.cancel_token.child_token();
        if action.is_cancellable() {
            self.inflight.insert(request, token.clone());
        }

        self.tasks.spawn(async move {
            let name = action.name();
            tokio::select! {
                result = perform(backend.as_ref(), &sessions, session, action) => {
                    let response = match result {
                        Ok(reply) => ShopResponse::ok(request, reply),
                        Err(e) => {
                            log::warn!("Request {request} ({name}) failed: {e:?}");
                            ShopResponse::err(request, e.to_string())
                        }
                    };
                    let _ = raw_tx.send(RawMsg::Backend(response));
                }
                _ = token.cancelled() => {
                    log::debug!("Request {request} ({name}) cancelled");
                }
            }
            request
        });
    }
}

fn require(session: Option<Session>) -> ShopResult<Session> {
    session.ok_or(ShopError::Unauthenticated)
}

/// Carries out one action against the backend
pub async fn perform(
    backend: &dyn ShopBackend,
    sessions: &SessionStore,
    session: Option<Session>,
    action: ShopAction,
) -> ShopResult<ShopReply> {
    match action {
        ShopAction::FetchProducts => backend.fetch_products().await.map(ShopReply::Products),
        ShopAction::CreateProduct(draft) => {
            let session = require(session)?;
            backend
                .create_product(&session, draft)
                .await
                .map(ShopReply::ProductCreated)
        }
        ShopAction::UpdateProduct { id, patch } => {
            let session = require(session)?;
            backend.update_product(&session, &id, &patch).await?;
            Ok(ShopReply::ProductUpdated { id, patch })
        }
        ShopAction::DeleteProduct(id) => {
            let session = require(session)?;
            backend.delete_product(&session, &id).await?;
            Ok(ShopReply::ProductDeleted(id))
        }
        ShopAction::FetchOrders => {
            let session = require(session)?;
            backend.fetch_orders(&session).await.map(ShopReply::Orders)
        }
        ShopAction::AddOrder {
            items,
            total_amount,
        } => {
            let session = require(session)?;
            backend
                .add_order(&session, items, total_amount)
                .await
                .map(ShopReply::OrderPlaced)
        }
        ShopAction::Login { email, password } => backend
            .login(&email, password.expose())
            .await
            .map(ShopReply::Authenticated),
        ShopAction::Signup { email, password } => backend
            .signup(&email, password.expose())
            .await
            .map(ShopReply::Authenticated),
        ShopAction::RestoreSession => {
            let stored = sessions.load().await.unwrap_or_else(|e| {
                log::warn!("Failed to read persisted session: {e}");
                None
            });
            let live = stored.filter(|s| s.is_live(Utc::now()));
            if live.is_none() {
                // Nothing usable on disk; make sure a stale copy does not linger
                if let Err(e) = sessions.clear().await {
                    log::warn!("Failed to remove stale session: {e}");
                }
            }
            Ok(ShopReply::SessionRestored(live))
        }
    }
}
