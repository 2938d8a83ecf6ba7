use crate::sendgrid::StatusCode;

/// Successful outcome of a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    accepted: usize,
    status: Option<StatusCode>,
    message_id: Option<String>,
}

impl Delivery {
    pub(super) fn accepted_by_provider(
        accepted: usize,
        status: StatusCode,
        message_id: Option<String>,
    ) -> Delivery {
        Delivery {
            accepted,
            status: Some(status),
            message_id,
        }
    }

    /// A send a listener aborted before anything was submitted
    pub fn cancelled() -> Delivery {
        Delivery {
            accepted: 0,
            status: None,
            message_id: None,
        }
    }

    /// Number of recipients the provider accepted the message for
    ///
    /// An address appearing in several of `To`, `Cc` and `Bcc` is counted once per list.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Status the provider answered with, `None` if cancelled
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Identifier the provider assigned to the message
    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    /// Returns `true` if a listener aborted the send
    pub fn is_cancelled(&self) -> bool {
        self.status.is_none()
    }
}
