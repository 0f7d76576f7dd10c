
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.password = "ghp_token".to_string();
        config.github.organization = "esgf-nimbus".to_string();
        config.webhook.callback_path = "payload".to_string();
        config.webhook.external_host = "https://bot.example.org".to_string();
        config
    }

    #[test]
    fn test_validate_complete_config() {
        let result = ConfigValidator::validate(&valid_config()).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_default_config_reports_required_fields() {
        let result = ConfigValidator::validate(&Config::default()).unwrap();
        assert!(!result.is_valid());
        for path in [
            "github.password",
            "github.organization",
            "webhook.callback_path",
            "webhook.external_host",
        ] {
            assert!(result.errors.iter().any(|e| e.path == path), "{} not reported", path);
        }
    }

    #[test]
    fn test_validate_invalid_port() {
        let mut config = valid_config();
        config.server.port = 0;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "server.port"));
    }

    #[test]
    fn test_validate_external_host_without_scheme() {
        let mut config = valid_config();
        config.webhook.external_host = "bot.example.org".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "webhook.external_host"));
    }

    #[test]
    fn test_validate_callback_path_shadowing_health() {
        let mut config = valid_config();
        config.webhook.callback_path = "/health/".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "webhook.callback_path"));
    }

    #[test]
    fn test_validate_callback_path_with_route_parameters() {
        for path in [":payload", "/hooks/*rest", "/{payload}", "payload}", "/hooks/{"] {
            let mut config = valid_config();
            config.webhook.callback_path = path.to_string();

            let result = ConfigValidator::validate(&config).unwrap();
            assert!(
                result.errors.iter().any(|e| e.path == "webhook.callback_path"),
                "{} accepted",
                path
            );
        }
    }

    #[test]
    fn test_validate_nested_callback_path() {
        let mut config = valid_config();
        config.webhook.callback_path = "/hooks/github".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_plain_http_warning() {
        let mut config = valid_config();
        config.webhook.external_host = "http://bot.example.org".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "webhook.external_host"));
    }

    #[test]
    fn test_validate_basic_auth_warning() {
        let mut config = valid_config();
        config.github.username = Some("nimbus-bot".to_string());

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "github.username"));
    }

    #[test]
    fn test_validate_bad_repository() {
        let mut config = valid_config();
        config.github.repository = "a/b/c".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "github.repository"));
    }

    #[test]
    fn test_validate_unknown_log_level() {
        let mut config = valid_config();
        config.logging.level = "CHATTY".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "logging.level"));
    }

    #[test]
    fn test_validate_bad_api_url() {
        let mut config = valid_config();
        config.github.api_url = "api.github.com".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "github.api_url"));
    }

    #[test]
    fn test_into_result_joins_errors() {
        let result = ConfigValidator::validate(&Config::default()).unwrap();
        let err = result.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("github.password"));
        assert!(message.contains("webhook.external_host"));
    }

    #[test]
    fn test_into_result_returns_warnings() {
        let mut config = valid_config();
        config.github.username = Some("nimbus-bot".to_string());
        let warnings = ConfigValidator::validate(&config)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_validation_result_default() {
        let result = ValidationResult::default();
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }
