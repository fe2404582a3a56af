//! In-memory store.
//!
//! Behaves like the `PostgreSQL` store for the workflow services: a scope stages its
//! writes and applies them atomically on commit, reads inside a scope see the committed
//! tables plus the scope's own staged writes, and pickup point locks are per-key async
//! mutexes owned by the scope until it commits or is dropped. A lock nobody holds or
//! waits on is removed from the table when a scope ends.
//!
//! An optional hold delay, applied right after a lock is acquired, stretches critical
//! sections so tests can observe serialization and independence.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::{
    domain::{
        listing::data::OpenedAtRange,
        pickup_points::records::{City, PickupPointRecord, PickupPointUuid},
        products::records::{ProductCategory, ProductRecord, ProductUuid},
        receptions::records::{ReceptionRecord, ReceptionStatus, ReceptionUuid},
    },
    locks::lock_key,
    store::{
        ListingReader, PickupPointLock, PickupPointsRepository, ProductsRepository,
        ReceptionsRepository, StoreError, StoreScope, TransactionRunner,
    },
};

#[derive(Debug, Clone, Default)]
struct Tables {
    pickup_points: Vec<PickupPointRecord>,
    receptions: Vec<ReceptionRecord>,
    products: Vec<ProductRecord>,
}

#[derive(Debug, Clone)]
enum Mutation {
    InsertPickupPoint(PickupPointRecord),
    InsertReception(ReceptionRecord),
    CloseReception(ReceptionUuid),
    InsertProduct(ProductRecord),
    DeleteProduct(ProductUuid),
}

impl Tables {
    fn apply(&mut self, mutation: &Mutation) {
        match mutation {
            Mutation::InsertPickupPoint(pickup_point) => {
                self.pickup_points.push(pickup_point.clone());
            }
            Mutation::InsertReception(reception) => self.receptions.push(reception.clone()),
            Mutation::CloseReception(uuid) => {
                for reception in &mut self.receptions {
                    if reception.uuid == *uuid {
                        reception.status = ReceptionStatus::Closed;
                    }
                }
            }
            Mutation::InsertProduct(product) => self.products.push(product.clone()),
            Mutation::DeleteProduct(uuid) => self.products.retain(|product| product.uuid != *uuid),
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
    clock: Mutex<Option<Timestamp>>,
}

impl Shared {
    fn committed(&self) -> Tables {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_for(&self, key: i64) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(locks.entry(key).or_default())
    }

    /// Forget locks that no scope holds or waits on.
    fn prune_locks(&self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        locks.retain(|_key, lock| Arc::strong_count(lock) > 1);
    }

    /// Current time, strictly after every timestamp handed out before.
    fn tick(&self) -> Timestamp {
        let mut last = self.clock.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Timestamp::now();
        let next = match *last {
            Some(previous) if now <= previous => previous
                .checked_add(SignedDuration::from_nanos(1))
                .unwrap_or(previous),
            _ => now,
        };

        *last = Some(next);

        next
    }
}

/// In-memory store shared by every clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
    lock_hold_delay: Duration,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` after every pickup point lock is acquired.
    #[must_use]
    pub fn with_lock_hold_delay(mut self, delay: Duration) -> Self {
        self.lock_hold_delay = delay;
        self
    }

    /// Committed pickup points, in insertion order.
    #[must_use]
    pub fn pickup_points(&self) -> Vec<PickupPointRecord> {
        self.shared.committed().pickup_points
    }

    /// Committed receptions, in insertion order.
    #[must_use]
    pub fn receptions(&self) -> Vec<ReceptionRecord> {
        self.shared.committed().receptions
    }

    /// Committed products, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<ProductRecord> {
        self.shared.committed().products
    }
}

#[async_trait]
impl TransactionRunner for MemoryStore {
    type Scope = MemoryScope;

    async fn begin(&self) -> Result<MemoryScope, StoreError> {
        Ok(MemoryScope {
            store: self.clone(),
            guards: Vec::new(),
            staged: Vec::new(),
        })
    }
}

#[async_trait]
impl ListingReader for MemoryStore {
    async fn search_receptions(
        &self,
        range: OpenedAtRange,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ReceptionRecord>, StoreError> {
        let mut receptions: Vec<ReceptionRecord> = self
            .receptions()
            .into_iter()
            .filter(|reception| range.contains(reception.opened_at))
            .collect();

        receptions.sort_by_key(|reception| (reception.opened_at, reception.uuid));

        Ok(receptions
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn get_pickup_points(
        &self,
        pickup_points: &[PickupPointUuid],
    ) -> Result<Vec<PickupPointRecord>, StoreError> {
        let wanted: HashSet<&PickupPointUuid> = pickup_points.iter().collect();

        let mut found: Vec<PickupPointRecord> = self
            .pickup_points()
            .into_iter()
            .filter(|pickup_point| wanted.contains(&pickup_point.uuid))
            .collect();

        found.sort_by_key(|pickup_point| (pickup_point.registered_at, pickup_point.uuid));

        Ok(found)
    }

    async fn get_products(
        &self,
        receptions: &[ReceptionUuid],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let wanted: HashSet<&ReceptionUuid> = receptions.iter().collect();

        let mut found: Vec<ProductRecord> = self
            .products()
            .into_iter()
            .filter(|product| wanted.contains(&product.reception_uuid))
            .collect();

        found.sort_by_key(|product| (product.added_at, product.uuid));

        Ok(found)
    }
}

/// Scope over a [`MemoryStore`]. Staged writes are discarded and locks released when it
/// is dropped without committing.
#[derive(Debug)]
pub struct MemoryScope {
    store: MemoryStore,
    guards: Vec<OwnedMutexGuard<()>>,
    staged: Vec<Mutation>,
}

impl MemoryScope {
    /// Committed tables with this scope's staged writes applied.
    fn view(&self) -> Tables {
        let mut tables = self.store.shared.committed();

        for mutation in &self.staged {
            tables.apply(mutation);
        }

        tables
    }
}

impl Drop for MemoryScope {
    fn drop(&mut self) {
        if self.guards.is_empty() {
            return;
        }

        self.guards.clear();
        self.store.shared.prune_locks();
    }
}

#[async_trait]
impl StoreScope for MemoryScope {
    async fn commit(self) -> Result<(), StoreError> {
        let mut tables = self
            .store
            .shared
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        for mutation in &self.staged {
            tables.apply(mutation);
        }

        Ok(())
    }
}

#[async_trait]
impl PickupPointLock for MemoryScope {
    async fn lock_pickup_point(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<(), StoreError> {
        let lock = self.store.shared.lock_for(lock_key(pickup_point));

        self.guards.push(lock.lock_owned().await);

        if !self.store.lock_hold_delay.is_zero() {
            tokio::time::sleep(self.store.lock_hold_delay).await;
        }

        Ok(())
    }
}

#[async_trait]
impl PickupPointsRepository for MemoryScope {
    async fn create_pickup_point(&mut self, city: City) -> Result<PickupPointRecord, StoreError> {
        let pickup_point = PickupPointRecord {
            uuid: PickupPointUuid::new(),
            city,
            registered_at: self.store.shared.tick(),
        };

        self.staged
            .push(Mutation::InsertPickupPoint(pickup_point.clone()));

        Ok(pickup_point)
    }
}

#[async_trait]
impl ReceptionsRepository for MemoryScope {
    async fn find_in_progress_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<Option<ReceptionRecord>, StoreError> {
        Ok(self
            .view()
            .receptions
            .into_iter()
            .filter(|reception| {
                reception.pickup_point_uuid == pickup_point && reception.is_in_progress()
            })
            .max_by_key(|reception| (reception.opened_at, reception.uuid)))
    }

    async fn create_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, StoreError> {
        let known = self
            .view()
            .pickup_points
            .iter()
            .any(|existing| existing.uuid == pickup_point);

        if !known {
            return Err(StoreError::InvalidReference);
        }

        let reception = ReceptionRecord {
            uuid: ReceptionUuid::new(),
            pickup_point_uuid: pickup_point,
            status: ReceptionStatus::InProgress,
            opened_at: self.store.shared.tick(),
        };

        self.staged.push(Mutation::InsertReception(reception.clone()));

        Ok(reception)
    }

    async fn close_reception(&mut self, reception: ReceptionUuid) -> Result<u64, StoreError> {
        let open = self
            .view()
            .receptions
            .iter()
            .any(|existing| existing.uuid == reception && existing.is_in_progress());

        if !open {
            return Ok(0);
        }

        self.staged.push(Mutation::CloseReception(reception));

        Ok(1)
    }
}

#[async_trait]
impl ProductsRepository for MemoryScope {
    async fn create_product(
        &mut self,
        reception: ReceptionUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, StoreError> {
        let known = self
            .view()
            .receptions
            .iter()
            .any(|existing| existing.uuid == reception);

        if !known {
            return Err(StoreError::InvalidReference);
        }

        let product = ProductRecord {
            uuid: ProductUuid::new(),
            reception_uuid: reception,
            category,
            added_at: self.store.shared.tick(),
        };

        self.staged.push(Mutation::InsertProduct(product.clone()));

        Ok(product)
    }

    async fn delete_last_product(
        &mut self,
        reception: ReceptionUuid,
    ) -> Result<Option<ProductUuid>, StoreError> {
        let last = self
            .view()
            .products
            .into_iter()
            .filter(|product| product.reception_uuid == reception)
            .max_by_key(|product| (product.added_at, product.uuid))
            .map(|product| product.uuid);

        if let Some(uuid) = last {
            self.staged.push(Mutation::DeleteProduct(uuid));
        }

        Ok(last)
    }
}
