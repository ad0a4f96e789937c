pub mod listings;
pub mod pool;
pub mod profiles;
pub mod util;

pub use listings::fetch_active_approved_listings;
pub use pool::{create_pool_from_url, create_pool_with_settings, DbPoolError, PgPool, PoolSettings};
pub use profiles::fetch_completed_profile;

/// PostgreSQL-backed profile and listing store over the hosted database.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
