
    use super::*;

    fn issue_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1001,
            "number": 7,
            "title": "Access request",
            "state": "open",
            "user": {"id": 42, "login": "octocat", "type": "User"},
            "labels": [{"id": 1, "name": "awaiting-review", "color": "fbca04"}],
            "comments": 2
        })
    }

    #[test]
    fn test_issue_deserialize_ignores_extra_fields() {
        let issue: Issue = serde_json::from_value(issue_json()).unwrap();
        assert_eq!(issue.number, 7);
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.user.login, "octocat");
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_issue_has_label() {
        let issue: Issue = serde_json::from_value(issue_json()).unwrap();
        assert!(issue.has_label("awaiting-review"));
        assert!(!issue.has_label("request-denied"));
    }

    #[test]
    fn test_issue_pull_request_marker() {
        let mut value = issue_json();
        value["pull_request"] = serde_json::json!({"url": "https://api.github.com/x"});
        let issue: Issue = serde_json::from_value(value).unwrap();
        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_issue_state_serialize() {
        assert_eq!(serde_json::to_string(&IssueState::Closed).unwrap(), "\"closed\"");
        assert_eq!(IssueState::Open.as_str(), "open");
    }

    #[test]
    fn test_comment_missing_body_defaults_empty() {
        let comment: Comment = serde_json::from_value(serde_json::json!({
            "id": 3,
            "user": {"id": 1, "login": "a"}
        }))
        .unwrap();
        assert_eq!(comment.body, "");
    }

    #[test]
    fn test_hook_config_partial() {
        let hook: Hook = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "web",
            "active": true,
            "events": ["issues"],
            "config": {"url": "https://bot.example.org/payload", "insecure_ssl": "0"}
        }))
        .unwrap();
        assert_eq!(hook.config.url.as_deref(), Some("https://bot.example.org/payload"));
        assert!(hook.config.content_type.is_none());
    }

    #[test]
    fn test_repo_ref_parse() {
        let repo = RepoRef::parse("esgf-nimbus/getting_started").unwrap();
        assert_eq!(repo.owner, "esgf-nimbus");
        assert_eq!(repo.name, "getting_started");
        assert_eq!(repo.to_string(), "esgf-nimbus/getting_started");
    }

    #[test]
    fn test_repo_ref_parse_rejects_bad_input() {
        assert!(RepoRef::parse("no-slash").is_err());
        assert!(RepoRef::parse("/name").is_err());
        assert!(RepoRef::parse("owner/").is_err());
        assert!(RepoRef::parse("a/b/c").is_err());
    }
