use crate::server::service::waiting_list::{
    FreedSlot, NotifyAborted, NotifyReport, WaitingListSubscriber,
};

/// Ordered, duplicate-free list of clients waiting for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitingListPublisher {
    subscribers: Vec<String>,
}

impl WaitingListPublisher {
    /// Wraps an existing waiting list, dropping repeated client ids.
    pub fn new(subscribers: Vec<String>) -> Self {
        let mut publisher = Self::default();
        for client_id in subscribers {
            publisher.subscribe(client_id);
        }
        publisher
    }

    /// Appends a client at the end of the list.
    ///
    /// # Returns
    /// - `true` - Client was added
    /// - `false` - Client was already waiting; the list is unchanged
    pub fn subscribe(&mut self, client_id: impl Into<String>) -> bool {
        let client_id = client_id.into();
        if self.position(&client_id).is_some() {
            return false;
        }
        self.subscribers.push(client_id);
        true
    }

    /// Removes a client from the list. Does nothing when the client is not waiting.
    ///
    /// # Returns
    /// - `true` - Client was removed
    /// - `false` - Client was not waiting
    pub fn unsubscribe(&mut self, client_id: &str) -> bool {
        match self.position(client_id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn subscribers(&self) -> &[String] {
        &self.subscribers
    }

    /// Zero based position of a waiting client.
    pub fn position(&self, client_id: &str) -> Option<usize> {
        self.subscribers.iter().position(|c| c == client_id)
    }

    pub fn into_subscribers(self) -> Vec<String> {
        self.subscribers
    }

    /// Offers freed places to waiting clients in arrival order.
    ///
    /// Each client is passed to `subscriber.update` until `slot.slots` clients have been
    /// promoted or the list is exhausted. Promoted clients leave the list. A client
    /// rejected with `ReservationIneligible` stays in place and the place goes to the
    /// next one.
    ///
    /// # Returns
    /// - `Ok(NotifyReport)` - Promoted and skipped clients
    /// - `Err(NotifyAborted)` - `update` failed with any other error; promotions made so
    ///   far are included and already removed from the list
    pub async fn notify_subscribers<S>(
        &mut self,
        slot: &FreedSlot,
        subscriber: &S,
    ) -> Result<NotifyReport, NotifyAborted>
    where
        S: WaitingListSubscriber + ?Sized,
    {
        let mut report = NotifyReport::default();
        let snapshot = self.subscribers.clone();

        for client_id in snapshot {
            if report.promoted.len() >= slot.slots {
                break;
            }

            match subscriber.update(&client_id, slot).await {
                Ok(promotion) => {
                    self.unsubscribe(&client_id);
                    report.promoted.push(promotion);
                }
                Err(err) if err.is_ineligible() => {
                    tracing::debug!(
                        "Skipping waiting client {} for session {}: {}",
                        client_id,
                        slot.session_id,
                        err
                    );
                    report.skipped.push(client_id);
                }
                Err(source) => {
                    return Err(NotifyAborted {
                        promoted: report.promoted,
                        source,
                    })
                }
            }
        }

        Ok(report)
    }
}
