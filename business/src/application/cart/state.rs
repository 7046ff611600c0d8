use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::cart::model::Cart;
use crate::domain::cart::remote::RemoteCart;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::CartId;
use crate::domain::storage::{CART_STORAGE_KEY, KeyValueStorage};

/// Mutable part of a cart store, guarded by one lock.
#[derive(Debug, Default)]
pub struct CartState {
    pub cart: Cart,
    /// Sequence number of the most recently enqueued remote operation.
    pub issued_seq: u64,
    /// Sequence number of the last snapshot written over local state.
    pub applied_seq: u64,
    /// Bumped on every local mutation, synced or not.
    pub revision: u64,
}

impl CartState {
    /// Records a local mutation.
    pub fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Position of a queued remote operation relative to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStamp {
    /// Sequence number among queued remote operations.
    pub seq: u64,
    /// Local revision the operation was queued against.
    pub revision: u64,
}

/// Local cart state plus its durable mirror, shared by the store and its
/// sync worker.
pub struct CartCore {
    id: CartId,
    state: Mutex<CartState>,
    storage: Arc<dyn KeyValueStorage>,
    logger: Arc<dyn Logger>,
}

impl CartCore {
    /// Loads the persisted cart. Missing, unreadable or corrupt data gives an
    /// empty cart.
    pub fn hydrate(id: CartId, storage: Arc<dyn KeyValueStorage>, logger: Arc<dyn Logger>) -> Self {
        let cart = match storage.read(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match Cart::from_json(&raw) {
                Ok(cart) => cart,
                Err(err) => {
                    logger.warn(&format!("Cart {}: discarding corrupt stored cart: {}", id, err));
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                logger.warn(&format!("Cart {}: stored cart unreadable: {}", id, err));
                Cart::new()
            }
        };

        logger.debug(&format!("Cart {} hydrated with {} line(s)", id, cart.lines().len()));

        Self {
            id,
            state: Mutex::new(CartState {
                cart,
                ..CartState::default()
            }),
            storage,
            logger,
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Locks the state. A panic while holding the lock leaves plain data
    /// behind, so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the cart to durable storage; failures are logged and dropped.
    ///
    /// Callers hold the state lock while writing, so the stored record always
    /// follows mutation order. Storage writes are small and synchronous; the
    /// lock is held across them deliberately.
    pub fn persist(&self, cart: &Cart) {
        let raw = match cart.to_json() {
            Ok(raw) => raw,
            Err(err) => {
                self.logger
                    .error(&format!("Cart {}: could not serialize cart: {}", self.id, err));
                return;
            }
        };
        if let Err(err) = self.storage.write(CART_STORAGE_KEY, &raw) {
            self.logger
                .warn(&format!("Cart {}: could not persist cart: {}", self.id, err));
        }
    }

    /// Replaces local state with a server snapshot, unless the local cart
    /// changed since the operation was queued, a newer remote operation has
    /// been issued, or a later snapshot was already applied. Returns whether
    /// the snapshot was applied.
    pub fn reconcile(&self, stamp: SyncStamp, snapshot: RemoteCart) -> bool {
        let mut state = self.lock();
        if stamp.seq <= state.applied_seq
            || stamp.seq < state.issued_seq
            || stamp.revision != state.revision
        {
            self.logger.debug(&format!(
                "Cart {}: dropping stale snapshot #{} (issued #{}, applied #{}, revision {} vs {})",
                self.id, stamp.seq, state.issued_seq, state.applied_seq, stamp.revision, state.revision
            ));
            return false;
        }

        state.cart = snapshot.into_cart();
        state.applied_seq = stamp.seq;
        self.persist(&state.cart);
        self.logger.debug(&format!(
            "Cart {}: reconciled with server snapshot #{} ({} line(s))",
            self.id,
            stamp.seq,
            state.cart.lines().len()
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::CartProduct;
    use crate::domain::cart::remote::RemoteCartLine;
    use crate::domain::errors::StorageError;
    use crate::domain::shared::value_objects::ProductId;

    struct NullStorage;

    impl KeyValueStorage for NullStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    struct NullLogger;

    impl Logger for NullLogger {
        fn info(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
    }

    fn core() -> CartCore {
        CartCore::hydrate(CartId::generate(), Arc::new(NullStorage), Arc::new(NullLogger))
    }

    fn snapshot(id: &str) -> RemoteCart {
        RemoteCart {
            items: vec![RemoteCartLine {
                product_id: ProductId::from(id),
                qty: 1,
                price: 10.0,
                title: id.to_string(),
                image: None,
                variant_id: None,
            }],
            total: 10.0,
            tax_summary: None,
        }
    }

    #[test]
    fn should_apply_snapshot_queued_against_current_revision() {
        let core = core();
        let stamp = {
            let mut state = core.lock();
            state.touch();
            state.issued_seq = 1;
            SyncStamp { seq: 1, revision: state.revision }
        };

        assert!(core.reconcile(stamp, snapshot("server")));
        assert_eq!(core.lock().cart.lines()[0].id.as_str(), "server");
    }

    #[test]
    fn should_drop_snapshot_after_unsynced_local_mutation() {
        let core = core();
        let stamp = {
            let mut state = core.lock();
            state.issued_seq = 1;
            SyncStamp { seq: 1, revision: state.revision }
        };
        {
            let mut state = core.lock();
            state.cart.add(CartProduct::new("local", "Mug", 5.0), 1);
            state.touch();
        }

        assert!(!core.reconcile(stamp, snapshot("server")));
        assert_eq!(core.lock().cart.lines()[0].id.as_str(), "local");
    }

    #[test]
    fn should_drop_snapshot_older_than_last_applied() {
        let core = core();
        core.lock().issued_seq = 2;

        assert!(core.reconcile(SyncStamp { seq: 2, revision: 0 }, snapshot("newer")));
        assert!(!core.reconcile(SyncStamp { seq: 1, revision: 0 }, snapshot("older")));
        assert_eq!(core.lock().cart.lines()[0].id.as_str(), "newer");
    }
}
