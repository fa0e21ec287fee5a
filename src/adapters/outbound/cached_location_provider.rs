//! Cached Location Provider
//!
//! Decorator implementing the cached-position tolerance: a fix no older than
//! the request's max-age is reused instead of activating the sensor again.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use crate::domain::ports::{LocationProvider, PositionRequest};
use crate::domain::value_objects::PermissionState;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Wraps any [`LocationProvider`] with a last-fix cache.
///
/// The cache is explicit adapter state, not a module global, so the wrapped
/// resolver itself stays stateless. Only successful fixes are cached; errors
/// always pass through.
pub struct CachedLocationProvider {
    inner: Arc<dyn LocationProvider>,
    last_fix: Mutex<Option<(Instant, LocationFix)>>,
}

impl CachedLocationProvider {
    pub fn new(inner: Arc<dyn LocationProvider>) -> Self {
        Self {
            inner,
            last_fix: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LocationProvider for CachedLocationProvider {
    async fn request_position(&self, req: PositionRequest) -> Result<LocationFix, LocationError> {
        if let Some((taken_at, fix)) = *self.last_fix.lock() {
            if taken_at.elapsed() <= req.max_age {
                tracing::debug!(age_secs = taken_at.elapsed().as_secs(), "reusing cached fix");
                return Ok(fix);
            }
        }

        let fix = self.inner.request_position(req).await?;
        *self.last_fix.lock() = Some((Instant::now(), fix));
        Ok(fix)
    }

    async fn permission_state(&self) -> PermissionState {
        self.inner.permission_state().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Coordinate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LocationProvider for CountingProvider {
        async fn request_position(
            &self,
            _req: PositionRequest,
        ) -> Result<LocationFix, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LocationFix::precise(
                Coordinate::new(28.7, 77.1).unwrap(),
                10.0,
            ))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn request_position(
            &self,
            _req: PositionRequest,
        ) -> Result<LocationFix, LocationError> {
            Err(LocationError::PositionUnavailable)
        }
    }

    fn request_with_max_age(max_age: Duration) -> PositionRequest {
        PositionRequest {
            timeout: Duration::from_secs(10),
            max_age,
        }
    }

    #[tokio::test]
    async fn test_fresh_fix_is_reused() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedLocationProvider::new(inner.clone());
        let req = request_with_max_age(Duration::from_secs(300));

        cached.request_position(req).await.unwrap();
        cached.request_position(req).await.unwrap();
        cached.request_position(req).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_max_age_bypasses_cache() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedLocationProvider::new(inner.clone());
        let req = request_with_max_age(Duration::ZERO);

        cached.request_position(req).await.unwrap();
        // The first fix is already older than a zero max-age by the time the
        // second call checks it
        tokio::time::sleep(Duration::from_millis(5)).await;
        cached.request_position(req).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cached = CachedLocationProvider::new(Arc::new(FailingProvider));
        let req = request_with_max_age(Duration::from_secs(300));

        assert!(cached.request_position(req).await.is_err());
        assert!(cached.request_position(req).await.is_err());
    }
}
