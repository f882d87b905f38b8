#[cfg(test)]
mod tests {
    use crate::models::*;
    use crate::theme::{Rgb, TerminalTheme};
    use chrono::Utc;

    fn sample_record() -> SessionRecord {
        SessionRecord {
            terminal_kind: TerminalKind::Sales,
            terminal_name: "Sales Analytics Terminal".to_string(),
            username: "sales".to_string(),
            role: "Sales Manager".to_string(),
            login_timestamp: Utc::now(),
            session_id: "session_abc".to_string(),
        }
    }

    #[test]
    fn test_session_record_uses_camel_case_keys() {
        let record = sample_record();
        let json = serde_json::to_value(&record).expect("Failed to serialize");

        assert_eq!(json["terminalKind"], "sales");
        assert_eq!(json["terminalName"], "Sales Analytics Terminal");
        assert_eq!(json["sessionId"], "session_abc");
        assert!(json.get("loginTimestamp").is_some());

        let deserialized: SessionRecord = serde_json::from_value(json).expect("Failed to deserialize");
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_kind_session_copies_identity() {
        let record = sample_record();
        let kind_session = record.kind_session();
        assert_eq!(kind_session.username, "sales");
        assert_eq!(kind_session.role, "Sales Manager");
        assert_eq!(kind_session.login_timestamp, record.login_timestamp);
    }

    #[test]
    fn test_terminal_kind_parsing() {
        for kind in TerminalKind::ALL {
            assert_eq!(kind.as_str().parse::<TerminalKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert_eq!(
            "marketing".parse::<TerminalKind>(),
            Err(UnknownKind("marketing".to_string()))
        );
        assert!("Sales".parse::<TerminalKind>().is_err());
    }

    #[test]
    fn test_terminal_kind_derived_names() {
        assert_eq!(TerminalKind::Sales.window_name(), "terminal_sales");
        assert_eq!(TerminalKind::Finance.session_key(), "finance_session");
    }

    #[test]
    fn test_close_message_wire_format() {
        let message = TerminalMessage::CloseTerminalSession {
            session_id: "session_x".to_string(),
        };
        let json = serde_json::to_value(&message).expect("Failed to serialize");
        assert_eq!(
            json,
            serde_json::json!({ "type": "CLOSE_TERMINAL_SESSION", "sessionId": "session_x" })
        );

        let parsed: TerminalMessage =
            serde_json::from_str(r#"{"type":"CLOSE_TERMINAL_SESSION","sessionId":"session_x"}"#)
                .expect("Failed to deserialize");
        assert_eq!(parsed, message);
    }

    #[test]
    fn test_unknown_message_type_is_rejected() {
        let result = serde_json::from_str::<TerminalMessage>(r#"{"type":"OPEN_TERMINAL","sessionId":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_local_session_from_handoff() {
        let params = HandoffParams {
            username: "devops".to_string(),
            role: "DevOps Engineer".to_string(),
            session_id: "session_1".to_string(),
            terminal: Some(TerminalKind::System),
        };
        let now = Utc::now();
        let local = LocalSession::from_handoff(params, now);
        assert_eq!(local.username, "devops");
        assert_eq!(local.terminal, Some(TerminalKind::System));
        assert_eq!(local.login_timestamp, now);
    }

    #[test]
    fn test_theme_colours() {
        assert_eq!(TerminalTheme::for_kind(TerminalKind::Sales).accent.to_hex(), "#7209b7");
        assert_eq!(TerminalTheme::for_kind(TerminalKind::System).accent.to_hex(), "#f3722c");
        assert_eq!(TerminalTheme::FINANCE.accent, Rgb::from_rgb(0x57, 0x75, 0x90));
    }
}
