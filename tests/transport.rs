#[cfg(test)]
mod tests {
    use smstab::libs::config::TransportConfig;
    use smstab::libs::transport::{deliver_all, Outbox, Outgoing, Sender, Webhook};

    fn outgoing(text: &str) -> Outgoing {
        Outgoing {
            phone: "+1".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_outbox_applies_cutoff() {
        let outbox = Outbox::new(10);
        outbox.send("+1", "name:Bo,age:40;name:Cy,age:41").unwrap();
        outbox.send("+2", "short").unwrap();

        let sent = outbox.drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].text, "name:Bo,ag");
        assert_eq!(sent[1], Outgoing { phone: "+2".to_string(), text: "short".to_string() });
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn test_webhook_needs_url() {
        assert!(Webhook::new(&TransportConfig::default()).is_none());
        let config = TransportConfig {
            webhook_url: "http://127.0.0.1:1/send".to_string(),
            ..TransportConfig::default()
        };
        assert!(Webhook::new(&config).is_some());
    }

    #[tokio::test]
    async fn test_deliver_without_webhook_prints() {
        let result = deliver_all(vec![outgoing("anytime")], &TransportConfig::default()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_webhook_fails() {
        let config = TransportConfig {
            webhook_url: "http://127.0.0.1:1/send".to_string(),
            ..TransportConfig::default()
        };
        assert!(deliver_all(vec![outgoing("anytime")], &config).await.is_err());
        assert!(deliver_all(Vec::new(), &config).await.is_ok());
    }
}
