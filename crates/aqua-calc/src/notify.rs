//! Stock event notification
//!
//! Synchronous, in-process fan-out. Each observer runs to completion before
//! the next one is called; the first failure stops the fan-out and is returned
//! to the publisher.

use aqua_core::StockEvent;

/// Receives stock threshold events
pub trait StockObserver {
    fn on_stock_event(&self, event: &StockEvent) -> aqua_core::Result<()>;
}

/// Handle returned by [`StockEventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber list in subscription order
#[derive(Default)]
pub struct StockEventBus {
    observers: Vec<(SubscriptionId, Box<dyn StockObserver>)>,
    next_id: u64,
}

impl StockEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StockObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn publish(&self, event: &StockEvent) -> aqua_core::Result<()> {
        tracing::debug!(
            "publishing stock event origin={} key={} to {} observer(s)",
            event.origin,
            event.key,
            self.observers.len()
        );
        for (_, observer) in &self.observers {
            observer.on_stock_event(event)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for StockEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockEventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Writes a low-stock alert to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl StockObserver for LoggingObserver {
    fn on_stock_event(&self, event: &StockEvent) -> aqua_core::Result<()> {
        tracing::warn!(
            origin = %event.origin,
            key = %event.key,
            new_quantity = event.new_quantity,
            minimum = event.minimum,
            "low stock alert"
        );
        Ok(())
    }
}
