#[cfg(feature = "blocking")]
mod blocking {
    use std::time::Duration;

    use sendgrid_transport::{
        sendgrid::client::HttpClient, Message, SendGridTransport, Transport,
    };

    fn message() -> Message {
        Message::builder()
            .from("john@doe.com")
            .to("jane@doe.com")
            .subject("The Message")
            .body("Something really important")
    }

    #[test]
    fn unreachable_endpoint() {
        let client = HttpClient::builder("SG.test")
            .endpoint("http://127.0.0.1:1/v3/mail/send")
            .timeout(Some(Duration::from_secs(5)))
            .build()
            .unwrap();
        assert_eq!(client.endpoint().port(), Some(1));

        let err = SendGridTransport::new(client).send(&message()).unwrap_err();

        assert!(err.is_client());
        assert_eq!(err.failed_recipients().len(), 1);
    }

    #[test]
    fn empty_api_key() {
        let err = HttpClient::new("").unwrap_err();
        assert!(err.is_config());
    }
}

#[cfg(feature = "tokio1")]
mod tokio_1 {
    use std::time::Duration;

    use sendgrid_transport::{
        sendgrid::client::AsyncHttpClient, AsyncTransport, Message, SendGridTransport,
    };
    use tokio1_crate as tokio;

    #[tokio::test]
    async fn unreachable_endpoint() {
        let client = AsyncHttpClient::builder("SG.test")
            .endpoint("http://127.0.0.1:1/v3/mail/send")
            .timeout(Some(Duration::from_secs(5)))
            .build_async()
            .unwrap();

        let message = Message::builder()
            .from("john@doe.com")
            .to("jane@doe.com")
            .cc("will@smith.com")
            .body("Something really important");

        let err = SendGridTransport::new(client)
            .send(&message)
            .await
            .unwrap_err();

        assert!(err.is_client());
        assert_eq!(err.failed_recipients().len(), 2);
    }
}
