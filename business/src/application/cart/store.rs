use std::sync::Arc;

use async_trait::async_trait;

use super::state::CartCore;
use super::sync::{RemoteOp, SyncHandle, SyncWorker};
use crate::domain::auth::token::AuthTokenProvider;
use crate::domain::cart::manager::{CartManager, CartSnapshot};
use crate::domain::cart::model::CartProduct;
use crate::domain::cart::remote::{
    AddItemRequest, RemoteCartService, RemoveItemRequest, UpdateItemRequest,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::{CartId, ProductId};
use crate::domain::storage::KeyValueStorage;

/// Collaborators a cart store is built from.
pub struct CartStoreDeps {
    pub storage: Arc<dyn KeyValueStorage>,
    pub tokens: Arc<dyn AuthTokenProvider>,
    pub remote: Arc<dyn RemoteCartService>,
    pub logger: Arc<dyn Logger>,
}

/// Optimistic local cart mirrored to storage and reconciled with the server
/// cart whenever a session token is present.
pub struct CartStore {
    core: Arc<CartCore>,
    sync: SyncHandle,
    tokens: Arc<dyn AuthTokenProvider>,
}

impl CartStore {
    /// Hydrates the cart from storage, spawns its sync worker and queues the
    /// initial server fetch.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime; the sync worker is spawned
    /// with `tokio::spawn`.
    pub fn start(deps: CartStoreDeps) -> Self {
        let id = CartId::generate();
        let core = Arc::new(CartCore::hydrate(id, deps.storage, deps.logger));
        let (sync, worker) = SyncWorker::new(core.clone(), deps.remote);
        tokio::spawn(worker.run());

        let store = Self {
            core,
            sync,
            tokens: deps.tokens,
        };
        store.refresh();
        store
    }

    pub fn id(&self) -> CartId {
        self.core.id()
    }
}

#[async_trait]
impl CartManager for CartStore {
    fn add_item(&self, product: CartProduct, qty: u32) {
        let token = self.tokens.current_token();
        let request = AddItemRequest {
            product_id: product.id.clone(),
            qty,
            variant_id: product.variant_id.clone(),
        };

        let mut state = self.core.lock();
        if !state.cart.add(product, qty) {
            return;
        }
        state.touch();
        self.core.persist(&state.cart);
        if let Some(token) = token {
            self.sync.enqueue(&mut state, token, RemoteOp::Add(request));
        }
    }

    fn remove_item(&self, id: &ProductId) {
        let token = self.tokens.current_token();

        let mut state = self.core.lock();
        let removed = state.cart.remove(id);
        if removed.is_some() {
            state.touch();
        }
        self.core.persist(&state.cart);
        if let Some(token) = token {
            let request = RemoveItemRequest {
                product_id: id.clone(),
                variant_id: removed.and_then(|line| line.variant_id),
            };
            self.sync.enqueue(&mut state, token, RemoteOp::Remove(request));
        }
    }

    fn update_qty(&self, id: &ProductId, qty: u32) {
        let token = self.tokens.current_token();

        let mut state = self.core.lock();
        let previous = state.cart.set_qty(id, qty);
        if previous.is_some() {
            state.touch();
        }
        self.core.persist(&state.cart);
        if let Some(token) = token {
            let variant_id = previous.and_then(|line| line.variant_id);
            let op = if qty == 0 {
                RemoteOp::Remove(RemoveItemRequest {
                    product_id: id.clone(),
                    variant_id,
                })
            } else {
                RemoteOp::Update(UpdateItemRequest {
                    product_id: id.clone(),
                    qty,
                    variant_id,
                })
            };
            self.sync.enqueue(&mut state, token, op);
        }
    }

    fn clear_cart(&self) {
        let token = self.tokens.current_token();

        let mut state = self.core.lock();
        state.cart.clear();
        state.touch();
        self.core.persist(&state.cart);
        if let Some(token) = token {
            self.sync.enqueue(&mut state, token, RemoteOp::Clear);
        }
    }

    fn count(&self) -> u64 {
        self.core.lock().cart.count()
    }

    fn total(&self) -> f64 {
        self.core.lock().cart.total()
    }

    fn snapshot(&self) -> CartSnapshot {
        let state = self.core.lock();
        CartSnapshot {
            lines: state.cart.lines().to_vec(),
            count: state.cart.count(),
            total: state.cart.total(),
        }
    }

    fn refresh(&self) {
        let Some(token) = self.tokens.current_token() else {
            self.core
                .logger()
                .debug(&format!("Cart {}: no session token, skipping fetch", self.id()));
            return;
        };
        let mut state = self.core.lock();
        self.sync.enqueue(&mut state, token, RemoteOp::Fetch);
    }

    async fn settle(&self) {
        self.sync.settle().await;
    }
}
