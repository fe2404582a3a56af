//! Pickup point lock keys.
//!
//! `pg_advisory_xact_lock` takes a single `bigint`. The key is derived from a SHA-256
//! digest of the whole identifier rather than from its low bits, so distinct pickup
//! points only share a key on a genuine 64-bit hash collision. The namespace prefix keeps
//! these keys apart from any other advisory lock users of the same database.

use sha2::{Digest, Sha256};
use sqlx::{Postgres, Transaction, query};

use crate::domain::pickup_points::records::PickupPointUuid;

const LOCK_NAMESPACE: &[u8] = b"pickup_point:";

/// Blocks until the transaction holds the key; released at commit or rollback.
const LOCK_PICKUP_POINT_SQL: &str = "SELECT pg_advisory_xact_lock($1)";

/// Derive the advisory lock key for a pickup point.
#[must_use]
pub fn lock_key(pickup_point: PickupPointUuid) -> i64 {
    let digest = Sha256::new()
        .chain_update(LOCK_NAMESPACE)
        .chain_update(pickup_point.as_bytes())
        .finalize();

    let prefix = digest
        .iter()
        .take(8)
        .fold(0_u64, |key, byte| (key << 8) | u64::from(*byte));

    i64::from_be_bytes(prefix.to_be_bytes())
}

/// Take the pickup point's advisory lock for the rest of the transaction.
pub(crate) async fn lock_pickup_point(
    tx: &mut Transaction<'_, Postgres>,
    pickup_point: PickupPointUuid,
) -> Result<(), sqlx::Error> {
    query(LOCK_PICKUP_POINT_SQL)
        .bind(lock_key(pickup_point))
        .execute(&mut **tx)
        .await?;

    Ok(())
}
