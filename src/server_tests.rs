
    use super::*;
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    fn test_config(api_url: &str) -> Config {
        let mut config = Config::default();
        config.github.password = "test-token".to_string();
        config.github.organization = "esgf-nimbus".to_string();
        config.github.api_url = api_url.to_string();
        config.webhook.callback_path = "payload".to_string();
        config.webhook.external_host = "https://bot.example.org".to_string();
        config.workflow.hub_url = "https://hub.example.org".to_string();
        config
    }

    fn repository_json() -> serde_json::Value {
        json!({
            "id": 200,
            "name": "getting_started",
            "full_name": "esgf-nimbus/getting_started",
            "owner": {"id": 100, "login": "esgf-nimbus"}
        })
    }

    async fn mount_get(server: &MockServer, path: &str, body: serde_json::Value) {
        Mock::given(matchers::method("GET"))
            .and(matchers::path(path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    /// Everything `OrgContext::resolve` reads.
    async fn mount_context(server: &MockServer) {
        mount_get(server, "/user", json!({"id": 1, "login": "nimbus-bot"})).await;
        mount_get(server, "/orgs/esgf-nimbus", json!({"id": 100, "login": "esgf-nimbus"})).await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/orgs/esgf-nimbus/members"))
            .and(matchers::query_param("role", "admin"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 10, "login": "boss"}])),
            )
            .mount(server)
            .await;
        mount_get(server, "/repos/esgf-nimbus/getting_started", repository_json()).await;
    }

    async fn mount_label(server: &MockServer) {
        mount_get(
            server,
            "/repos/esgf-nimbus/getting_started/labels/awaiting-review",
            json!({"name": "awaiting-review"}),
        )
        .await;
    }

    fn client(config: &Config) -> Arc<dyn IssueTracker> {
        Arc::new(build_client(config).unwrap())
    }

    #[test]
    fn test_default_directive_maps_levels() {
        let mut logging = LoggingConfig::default();
        assert_eq!(default_directive(&logging), "info");

        logging.level = "WARNING".to_string();
        assert_eq!(default_directive(&logging), "warn");

        logging.level = "CRITICAL".to_string();
        assert_eq!(default_directive(&logging), "error");

        logging.level = "debug".to_string();
        assert_eq!(default_directive(&logging), "debug");
    }

    #[test]
    fn test_build_client_rejects_bad_url() {
        let config = test_config("not a url");
        assert!(build_client(&config).is_err());
    }

    #[tokio::test]
    async fn test_build_workflow_resolves_context() {
        let server = MockServer::start().await;
        mount_context(&server).await;
        mount_label(&server).await;

        let config = test_config(&server.uri());
        let workflow = build_workflow(client(&config), &config).await.unwrap();

        let context = workflow.context();
        assert_eq!(context.organization.id, 100);
        assert_eq!(context.repository.full_name, "esgf-nimbus/getting_started");
        assert!(context.is_admin(10));
        assert_eq!(context.bot.login, "nimbus-bot");
    }

    #[tokio::test]
    async fn test_build_workflow_fails_without_label() {
        let server = MockServer::start().await;
        mount_context(&server).await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/esgf-nimbus/getting_started/labels/awaiting-review"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let err = build_workflow(client(&config), &config).await.err().unwrap();
        assert!(err.to_string().contains("awaiting-review"));
    }

    #[tokio::test]
    async fn test_build_workflow_fails_on_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/user"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
            )
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let err = build_workflow(client(&config), &config).await.err().unwrap();
        assert!(err.to_string().contains("Bad credentials"));
    }

    #[tokio::test]
    async fn test_ensure_webhook_registers_callback_url() {
        let server = MockServer::start().await;
        mount_get(&server, "/orgs/esgf-nimbus/hooks", json!([])).await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/orgs/esgf-nimbus/hooks"))
            .and(matchers::body_json(json!({
                "name": "web",
                "config": {"url": "https://bot.example.org/payload", "content_type": "json"},
                "events": ["issues", "issue_comment", "organization"],
                "active": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 31,
                "name": "web",
                "active": true,
                "events": ["issues", "issue_comment", "organization"],
                "config": {"url": "https://bot.example.org/payload", "content_type": "json"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        ensure_webhook(client(&config).as_ref(), &config).await;
    }

    #[tokio::test]
    async fn test_ensure_webhook_skips_existing() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "/orgs/esgf-nimbus/hooks",
            json!([{"id": 31, "config": {"url": "https://bot.example.org/payload"}}]),
        )
        .await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/orgs/esgf-nimbus/hooks"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        ensure_webhook(client(&config).as_ref(), &config).await;
    }

    #[tokio::test]
    async fn test_ensure_webhook_failure_is_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/orgs/esgf-nimbus/hooks"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "Must have admin rights"})),
            )
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        ensure_webhook(client(&config).as_ref(), &config).await;
    }

    #[tokio::test]
    async fn test_run_reconcile_acknowledges_open_requests() {
        let server = MockServer::start().await;
        mount_context(&server).await;
        mount_label(&server).await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/esgf-nimbus/getting_started/issues"))
            .and(matchers::query_param("state", "open"))
            .and(matchers::query_param("labels", "awaiting-review"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 5007,
                "number": 7,
                "title": "Access request",
                "state": "open",
                "user": {"id": 20, "login": "alice"},
                "labels": [{"name": "awaiting-review"}]
            }])))
            .mount(&server)
            .await;
        mount_get(&server, "/repos/esgf-nimbus/getting_started/issues/7/comments", json!([])).await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/esgf-nimbus/getting_started/issues/7/comments"))
            .and(matchers::body_json(json!({
                "body": "\n@esgf-nimbus/admin Please review this application.\n"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 900,
                "body": "\n@esgf-nimbus/admin Please review this application.\n",
                "user": {"id": 1, "login": "nimbus-bot"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = run_reconcile(test_config(&server.uri())).await.unwrap();
        assert_eq!(
            report,
            ReconcileReport {
                scanned: 1,
                acknowledged: 1,
                denied: 0,
                failed: 0,
            }
        );
    }
