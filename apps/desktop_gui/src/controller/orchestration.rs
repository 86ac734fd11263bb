//! Intent queueing from widgets to the controller.

use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::{UiError, UiErrorContext, UiIntent};

pub fn dispatch_intent(
    intent_tx: &Sender<UiIntent>,
    intent: UiIntent,
    status: &mut Option<UiError>,
) {
    match intent_tx.try_send(intent) {
        Ok(()) => tracing::debug!(intent = intent.name(), "queued ui intent"),
        Err(TrySendError::Full(_)) => {
            *status = Some(UiError::new(
                UiErrorContext::IntentQueue,
                "UI intent queue is full; please retry",
            ));
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = Some(UiError::new(
                UiErrorContext::IntentQueue,
                "UI intent queue disconnected; restart the application",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::ViewId;

    #[test]
    fn queues_intent_in_order() {
        let (tx, rx) = bounded(4);
        let mut status = None;

        dispatch_intent(&tx, UiIntent::SelectView(ViewId::Mesh), &mut status);
        dispatch_intent(&tx, UiIntent::TriggerEvolution, &mut status);

        assert!(status.is_none());
        assert_eq!(rx.try_recv(), Ok(UiIntent::SelectView(ViewId::Mesh)));
        assert_eq!(rx.try_recv(), Ok(UiIntent::TriggerEvolution));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = None;

        dispatch_intent(&tx, UiIntent::ToggleNav, &mut status);
        dispatch_intent(&tx, UiIntent::ToggleNav, &mut status);

        let err = status.expect("queue full error");
        assert_eq!(err.context(), UiErrorContext::IntentQueue);
        assert!(err.message().contains("full"));
    }

    #[test]
    fn reports_disconnected_queue() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = None;

        dispatch_intent(&tx, UiIntent::EnterPlatform, &mut status);

        assert!(status.is_some_and(|err| err.message().contains("disconnected")));
    }
}
