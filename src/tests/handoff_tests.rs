#[cfg(test)]
mod tests {
    use crate::models::*;
    use crate::services::*;
    use crate::tests::support::pages_base;
    use chrono::Utc;
    use url::Url;

    fn sales_record() -> SessionRecord {
        SessionRecord {
            terminal_kind: TerminalKind::Sales,
            terminal_name: "Sales Analytics Terminal".to_string(),
            username: "sales".to_string(),
            role: "Sales Manager".to_string(),
            login_timestamp: Utc::now(),
            session_id: "session_0123".to_string(),
        }
    }

    #[test]
    fn test_launch_url_targets_kind_page() {
        let registry = CredentialRegistry::builtin();
        let entry = registry.lookup(TerminalKind::Sales).unwrap();
        let url = build_launch_url(&pages_base(), entry, &sales_record()).unwrap();

        assert_eq!(url.path(), "/terminal-sales.html");
        assert_eq!(
            url.query(),
            Some("username=sales&role=Sales+Manager&sessionId=session_0123&terminal=sales")
        );
    }

    #[test]
    fn test_launch_url_resolves_under_nested_base() {
        let registry = CredentialRegistry::builtin();
        let entry = registry.lookup(TerminalKind::System).unwrap();
        let base = Url::parse("https://example.com/demo/").unwrap();
        let mut record = sales_record();
        record.terminal_kind = TerminalKind::System;

        let url = build_launch_url(&base, entry, &record).unwrap();
        assert_eq!(url.path(), "/demo/terminal-system.html");
    }

    #[test]
    fn test_handoff_fields_survive_the_url() {
        let registry = CredentialRegistry::builtin();
        let entry = registry.lookup(TerminalKind::Sales).unwrap();
        let mut record = sales_record();
        record.role = "R&D / \"Ops\" = 100%".to_string();
        record.username = "ünïcode user".to_string();

        let url = build_launch_url(&pages_base(), entry, &record).unwrap();
        let params = parse_launch_url(&url).unwrap();
        assert_eq!(params, HandoffParams::from(&record));
    }

    #[test]
    fn test_missing_parameters_are_rejected() {
        let cases = [
            ("http://localhost:8080/terminal-sales.html", PARAM_USERNAME),
            ("http://localhost:8080/terminal-sales.html?username=sales", PARAM_ROLE),
            (
                "http://localhost:8080/terminal-sales.html?username=sales&role=Manager",
                PARAM_SESSION_ID,
            ),
            (
                "http://localhost:8080/terminal-sales.html?username=sales&role=Manager&sessionId=",
                PARAM_SESSION_ID,
            ),
            (
                "http://localhost:8080/terminal-sales.html?username=&role=Manager&sessionId=s",
                PARAM_USERNAME,
            ),
        ];

        for (raw, missing) in cases {
            let url = Url::parse(raw).unwrap();
            assert_eq!(
                parse_launch_url(&url),
                Err(HandoffError::MissingParameter(missing)),
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_terminal_parameter_is_optional() {
        let url = Url::parse("http://localhost:8080/t.html?username=a&role=b&sessionId=c").unwrap();
        assert_eq!(parse_launch_url(&url).unwrap().terminal, None);

        let url = Url::parse("http://localhost:8080/t.html?username=a&role=b&sessionId=c&terminal=hr").unwrap();
        assert_eq!(parse_launch_url(&url).unwrap().terminal, None);
    }

    #[test]
    fn test_launcher_url_and_origin() {
        let page = Url::parse("http://localhost:8080/demo/terminal-sales.html?username=a").unwrap();
        assert_eq!(
            launcher_url(&page).unwrap().as_str(),
            "http://localhost:8080/demo/index.html"
        );
        assert_eq!(origin_of(&page), "http://localhost:8080");
        assert_eq!(origin_of(&Url::parse("https://example.com/x").unwrap()), "https://example.com");
    }
}
