//! Seam between consumer creation and an optimistically-opened
//! subscription.

use async_trait::async_trait;

/// Handle to a subscription opened before its backing consumer was
/// confirmed.
///
/// Implementations route [`SubscriptionHandle::unsubscribe`] through
/// their dispatcher when the subscription is dispatched, and directly
/// otherwise.
#[async_trait]
pub trait SubscriptionHandle: Send {
    /// Records the server-resolved consumer name once creation succeeds.
    fn set_consumer_name(&mut self, name: &str);

    /// Tears the subscription down, so that no subscription outlives a
    /// failed consumer creation.
    async fn unsubscribe(&mut self) -> Result<(), rill_transport::Error>;
}
