use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::state::{CartCore, CartState, SyncStamp};
use crate::domain::auth::token::AuthToken;
use crate::domain::cart::remote::{
    AddItemRequest, RemoteCart, RemoteCartService, RemoveItemRequest, UpdateItemRequest,
};
use crate::domain::errors::RemoteCartError;

/// A remote cart call waiting in the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOp {
    Fetch,
    Add(AddItemRequest),
    Update(UpdateItemRequest),
    Remove(RemoveItemRequest),
    Clear,
}

impl RemoteOp {
    fn label(&self) -> &'static str {
        match self {
            RemoteOp::Fetch => "fetch",
            RemoteOp::Add(_) => "add",
            RemoteOp::Update(_) => "update",
            RemoteOp::Remove(_) => "remove",
            RemoteOp::Clear => "clear",
        }
    }
}

enum SyncJob {
    Remote {
        stamp: SyncStamp,
        token: AuthToken,
        op: RemoteOp,
    },
    Barrier(oneshot::Sender<()>),
}

/// Sending half of a cart's sync queue.
pub struct SyncHandle {
    sender: mpsc::UnboundedSender<SyncJob>,
}

impl SyncHandle {
    /// Stamps `op` with the next sequence number and the current local
    /// revision, then queues it.
    ///
    /// Takes the locked state so that sequence order, queue order and the
    /// order of local mutations all agree.
    pub fn enqueue(&self, state: &mut CartState, token: AuthToken, op: RemoteOp) {
        state.issued_seq += 1;
        let job = SyncJob::Remote {
            stamp: SyncStamp {
                seq: state.issued_seq,
                revision: state.revision,
            },
            token,
            op,
        };
        // The worker only stops once every sender is gone.
        let _ = self.sender.send(job);
    }

    /// Waits until every job queued before this call has been processed.
    pub async fn settle(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(SyncJob::Barrier(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Runs remote cart calls one at a time, in the order they were issued.
pub struct SyncWorker {
    core: Arc<CartCore>,
    remote: Arc<dyn RemoteCartService>,
    receiver: mpsc::UnboundedReceiver<SyncJob>,
}

impl SyncWorker {
    pub fn new(core: Arc<CartCore>, remote: Arc<dyn RemoteCartService>) -> (SyncHandle, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            SyncHandle { sender },
            Self {
                core,
                remote,
                receiver,
            },
        )
    }

    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            match job {
                SyncJob::Remote { stamp, token, op } => self.process(stamp, &token, op).await,
                SyncJob::Barrier(done) => {
                    let _ = done.send(());
                }
            }
        }
        self.core
            .logger()
            .debug(&format!("Cart {}: sync worker stopped", self.core.id()));
    }

    async fn process(&self, stamp: SyncStamp, token: &AuthToken, op: RemoteOp) {
        let label = op.label();
        match self.call(token, &op).await {
            Ok(snapshot) => {
                self.core.reconcile(stamp, snapshot);
            }
            Err(err) => self.core.logger().warn(&format!(
                "Cart {}: remote {} #{} failed, keeping local cart: {}",
                self.core.id(),
                label,
                stamp.seq,
                err
            )),
        }
    }

    async fn call(&self, token: &AuthToken, op: &RemoteOp) -> Result<RemoteCart, RemoteCartError> {
        match op {
            RemoteOp::Fetch => self.remote.fetch_cart(token).await,
            RemoteOp::Add(request) => self.remote.add_item(token, request).await,
            RemoteOp::Update(request) => self.remote.update_item(token, request).await,
            RemoteOp::Remove(request) => self.remote.remove_item(token, request).await,
            RemoteOp::Clear => self.remote.clear_cart(token).await,
        }
    }
}
