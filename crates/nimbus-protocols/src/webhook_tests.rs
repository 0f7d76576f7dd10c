
    use super::*;

    fn user(id: u64, login: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "login": login})
    }

    #[test]
    fn test_event_from_header() {
        assert_eq!(GitHubEvent::from_header("issue_comment"), GitHubEvent::IssueComment);
        assert_eq!(GitHubEvent::from_header("issues"), GitHubEvent::Issues);
        assert_eq!(GitHubEvent::from_header("organization"), GitHubEvent::Organization);
        assert_eq!(GitHubEvent::from_header("ping"), GitHubEvent::Ping);
        assert_eq!(
            GitHubEvent::from_header("push"),
            GitHubEvent::Other("push".to_string())
        );
    }

    #[test]
    fn test_event_header_is_case_sensitive() {
        assert_eq!(
            GitHubEvent::from_header("Issues"),
            GitHubEvent::Other("Issues".to_string())
        );
    }

    #[test]
    fn test_event_display() {
        assert_eq!(GitHubEvent::IssueComment.to_string(), "issue_comment");
        assert_eq!(GitHubEvent::Other("push".into()).to_string(), "push");
    }

    #[test]
    fn test_issues_payload_with_label() {
        let payload: IssuesPayload = serde_json::from_value(serde_json::json!({
            "action": "labeled",
            "issue": {"id": 1, "number": 3, "state": "open", "user": user(5, "alice")},
            "label": {"name": "awaiting-review"},
            "repository": {"id": 10, "name": "getting_started",
                           "full_name": "esgf-nimbus/getting_started",
                           "owner": user(99, "esgf-nimbus")}
        }))
        .unwrap();
        assert_eq!(payload.action, "labeled");
        assert_eq!(payload.label.unwrap().name, "awaiting-review");
    }

    #[test]
    fn test_issue_comment_payload_missing_comment() {
        let err = serde_json::from_value::<IssueCommentPayload>(serde_json::json!({
            "action": "created",
            "issue": {"id": 1, "number": 3, "state": "open", "user": user(5, "alice")},
            "repository": {"id": 10, "name": "r", "full_name": "o/r", "owner": user(1, "o")}
        }))
        .unwrap_err();
        let err = PayloadError::from(err);
        assert!(matches!(err, PayloadError::MissingKey(ref k) if k == "comment"));
    }

    #[test]
    fn test_member_login_from_membership() {
        let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
            "action": "member_added",
            "organization": {"id": 77, "login": "esgf-nimbus"},
            "membership": {"user": user(5, "alice"), "role": "member", "state": "active"}
        }))
        .unwrap();
        assert_eq!(payload.member_login().unwrap(), "alice");
    }

    #[test]
    fn test_member_login_from_invited_user() {
        let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
            "action": "member_invited",
            "organization": {"id": 77, "login": "esgf-nimbus"},
            "invitation": {"login": "bob", "email": null},
            "user": user(6, "bob")
        }))
        .unwrap();
        assert_eq!(payload.member_login().unwrap(), "bob");
    }

    #[test]
    fn test_member_login_from_invitation_only() {
        let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
            "action": "member_invited",
            "organization": {"id": 77, "login": "esgf-nimbus"},
            "invitation": {"login": "carol"}
        }))
        .unwrap();
        assert_eq!(payload.member_login().unwrap(), "carol");
    }

    #[test]
    fn test_member_login_missing() {
        let payload: OrganizationPayload = serde_json::from_value(serde_json::json!({
            "action": "member_added",
            "organization": {"id": 77, "login": "esgf-nimbus"}
        }))
        .unwrap();
        assert!(matches!(
            payload.member_login(),
            Err(PayloadError::MissingKey(ref k)) if k == "membership"
        ));
    }

    #[test]
    fn test_ping_hook_id() {
        let payload: PingPayload = serde_json::from_value(serde_json::json!({
            "zen": "Design for failure.",
            "hook_id": 12,
            "hook": {"id": 12, "name": "web", "active": true, "events": ["issues"], "config": {}}
        }))
        .unwrap();
        assert_eq!(payload.hook_id(), Some(12));

        let bare: PingPayload = serde_json::from_value(serde_json::json!({"hook_id": 4})).unwrap();
        assert_eq!(bare.hook_id(), Some(4));
    }
