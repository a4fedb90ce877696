#[cfg(test)]
mod tests {
    use smstab::libs::config::{Config, SmsConfig, TransportConfig, CONFIG_FILE_NAME};
    use smstab::libs::data_storage::DataStorage;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the data directory at a temporary home.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    // Kept as one test: the data directory comes from process-wide env vars.
    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_read_and_save(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sms(), SmsConfig::default());
        assert_eq!(config.sms().sentinel, '@');
        assert_eq!(config.sms().row_limit, 25);
        assert_eq!(config.transport().max_length, 160);

        let config = Config {
            sms: Some(SmsConfig {
                sentinel: '#',
                row_limit: 5,
                date_format: "%d.%m %H:%M".to_string(),
            }),
            transport: Some(TransportConfig {
                max_length: 0,
                webhook_url: "https://sms.example.com/send".to_string(),
                auth_token: "token123".to_string(),
            }),
        };
        config.save().unwrap();
        assert_eq!(Config::read().unwrap(), config);

        let partial = Config {
            sms: None,
            transport: config.transport.clone(),
        };
        partial.save().unwrap();
        let read = Config::read().unwrap();
        assert_eq!(read.sms, None);
        assert_eq!(read.sms(), SmsConfig::default());

        // Unusable SMS settings fall back to their defaults on read.
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{"sms": {"sentinel": " ", "row_limit": 0, "date_format": "%Q"}}"#).unwrap();
        assert_eq!(Config::read().unwrap().sms(), SmsConfig::default());

        std::fs::write(&path, r##"{"sms": {"sentinel": "#", "row_limit": 0, "date_format": "%H:%M"}}"##).unwrap();
        let sms = Config::read().unwrap().sms();
        assert_eq!(sms.sentinel, '#');
        assert_eq!(sms.row_limit, 25);
        assert_eq!(sms.date_format, "%H:%M");
    }
}
