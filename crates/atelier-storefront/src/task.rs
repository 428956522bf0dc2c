//! Screen lifetimes and cancellable calls.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::StorefrontError;

/// The lifetime of one screen. Dropping it cancels every call started
/// under it.
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token for one call; cancelled with the screen.
    pub fn child(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel everything in flight. Further calls fail immediately.
    pub fn teardown(&self) {
        self.token.cancel();
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Run `fut` unless `token` is cancelled first.
pub async fn cancellable<F, T>(token: &CancellationToken, fut: F) -> Result<T, StorefrontError>
where
    F: Future<Output = Result<T, StorefrontError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(StorefrontError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let scope = ScreenScope::new();
        let result = cancellable(&scope.child(), async { Ok::<_, StorefrontError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_call() {
        let scope = ScreenScope::new();
        let token = scope.child();
        let pending = tokio::spawn(async move {
            cancellable(&token, async {
                std::future::pending::<()>().await;
                Ok::<_, StorefrontError>(())
            })
            .await
        });

        scope.teardown();
        assert_eq!(pending.await.unwrap(), Err(StorefrontError::Cancelled));
        assert!(scope.is_torn_down());
    }

    #[tokio::test]
    async fn test_drop_cancels_children() {
        let token = {
            let scope = ScreenScope::new();
            scope.child()
        };
        assert!(token.is_cancelled());
        let result = cancellable(&token, async { Ok::<_, StorefrontError>(1) }).await;
        assert_eq!(result, Err(StorefrontError::Cancelled));
    }
}
