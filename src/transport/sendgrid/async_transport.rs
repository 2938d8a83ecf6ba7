use std::ops::ControlFlow;

use async_trait::async_trait;

use super::{classify, error, Delivery, Error, SendGridTransport};
use crate::{sendgrid::AsyncClient, transport::AsyncTransport, BoxError, Message};

#[async_trait]
impl<C> AsyncTransport for SendGridTransport<C>
where
    C: AsyncClient + Send + Sync,
    C::Error: Into<BoxError>,
{
    type Ok = Delivery;
    type Error = Error;

    async fn send(&self, message: &Message) -> Result<Self::Ok, Self::Error> {
        let event = match self.begin(message) {
            ControlFlow::Continue(event) => event,
            ControlFlow::Break(()) => return Ok(Delivery::cancelled()),
        };

        let outcome = match self.translate(message) {
            Ok(mail) => match self.client.send(&mail).await {
                Ok(response) => classify(message, response),
                Err(e) => Err(error::client(e, message.all_recipients())),
            },
            Err(err) => Err(err),
        };

        self.conclude(event, &outcome);
        outcome
    }
}
