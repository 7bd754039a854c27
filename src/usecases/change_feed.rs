use std::sync::mpsc;

use crate::domain::events::ChatChange;

/// Fan-out of store changes to interested observers.
///
/// Subscribers whose receiver has been dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<mpsc::Sender<ChatChange>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<ChatChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, change: ChatChange) {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }

    pub fn publish_all(&mut self, changes: impl IntoIterator<Item = ChatChange>) {
        for change in changes {
            self.publish(change);
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationId;

    fn opened(id: &str) -> ChatChange {
        ChatChange::ConversationOpened(ConversationId::new(id))
    }

    #[test]
    fn every_subscriber_receives_published_changes() {
        let mut feed = ChangeFeed::new();
        let first = feed.subscribe();
        let second = feed.subscribe();

        feed.publish(opened("a"));

        assert_eq!(first.try_recv(), Ok(opened("a")));
        assert_eq!(second.try_recv(), Ok(opened("a")));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut feed = ChangeFeed::new();
        let kept = feed.subscribe();
        drop(feed.subscribe());

        feed.publish(opened("a"));

        assert_eq!(feed.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(opened("a")));
    }

    #[test]
    fn publish_all_keeps_order() {
        let mut feed = ChangeFeed::new();
        let rx = feed.subscribe();

        feed.publish_all(vec![opened("a"), opened("b")]);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received, vec![opened("a"), opened("b")]);
    }
}
