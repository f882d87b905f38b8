#[cfg(test)]
mod tests {
    use crate::app::{parse_command, ConsoleCommand, LauncherConsole};
    use crate::display::render_roster;
    use crate::handlers::errors::CommandError;
    use crate::handlers::*;
    use crate::models::*;
    use crate::tests::support::fixture;
    use std::time::Duration;

    fn console(notice_timeout: Duration) -> LauncherConsole {
        let fx = fixture();
        LauncherConsole::new(fx.launcher, fx.host, fx.mailbox, notice_timeout)
    }

    #[test]
    fn test_catalog_lists_every_terminal() {
        let fx = fixture();
        let catalog = get_terminal_catalog(&fx.launcher).unwrap();
        let kinds: Vec<_> = catalog.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, TerminalKind::ALL.to_vec());
    }

    #[test]
    fn test_login_command_success() {
        let fx = fixture();
        let response = login_terminal(&fx.launcher, "sales", "sales", "sales123").unwrap();
        assert_eq!(response.message, "Sales Analytics Terminal accessed successfully!");
        assert!(response.terminal_url.starts_with("http://localhost:8080/terminal-sales.html?"));
        assert_eq!(list_active_sessions(&fx.launcher).unwrap(), vec![response.session]);
    }

    #[test]
    fn test_login_command_error_taxonomy() {
        let fx = fixture();

        let err = login_terminal(&fx.launcher, "sales", "sales", "wrong").unwrap_err();
        assert_eq!(
            err,
            CommandError::invalid_credentials("Invalid credentials. Try: sales/sales123")
        );
        assert!(err.is_inline_notice());

        let err = login_terminal(&fx.launcher, "sales", "", "x").unwrap_err();
        assert_eq!(err, CommandError::invalid_input("Please enter both username and password"));

        let err = login_terminal(&fx.launcher, "payroll", "a", "b").unwrap_err();
        assert!(matches!(err, CommandError::UnknownTerminal { .. }));

        fx.host.set_popups_blocked(true);
        let err = login_terminal(&fx.launcher, "sales", "sales", "sales123").unwrap_err();
        assert!(matches!(err, CommandError::PopupBlocked { .. }));
        assert!(!err.is_inline_notice());
        assert!(list_active_sessions(&fx.launcher).unwrap().is_empty());
    }

    #[test]
    fn test_close_session_command_validates_id() {
        let fx = fixture();
        assert!(matches!(
            close_session(&fx.launcher, "  "),
            Err(CommandError::InvalidInput { .. })
        ));
        assert_eq!(close_session(&fx.launcher, "session_missing"), Ok(false));
    }

    #[test]
    fn test_receive_terminal_message_from_json() {
        let fx = fixture();
        let response = login_terminal(&fx.launcher, "system", "devops", "devops123").unwrap();
        let payload = format!(
            r#"{{"type":"CLOSE_TERMINAL_SESSION","sessionId":"{}"}}"#,
            response.session.session_id
        );

        assert_eq!(
            receive_terminal_message(&fx.launcher, "http://localhost:8080", &payload),
            Ok(true)
        );
        assert!(list_active_sessions(&fx.launcher).unwrap().is_empty());

        let err = receive_terminal_message(&fx.launcher, "http://localhost:8080", r#"{"type":"PING"}"#);
        assert!(matches!(err, Err(CommandError::InvalidInput { .. })));
    }

    #[test]
    fn test_command_error_serializes() {
        let error = CommandError::popup_blocked("blocked");
        let json = serde_json::to_string(&error).expect("Failed to serialize");
        let back: CommandError = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(back, error);
        assert_eq!(String::from(error), "blocked");
    }

    #[test]
    fn test_parse_console_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("login sales sales sales123"),
            Ok(Some(ConsoleCommand::Login {
                terminal: "sales".to_string(),
                username: "sales".to_string(),
                password: "sales123".to_string(),
            }))
        );
        assert_eq!(
            parse_command("close session_1"),
            Ok(Some(ConsoleCommand::Close("session_1".to_string())))
        );
        assert_eq!(parse_command("block-popups on"), Ok(Some(ConsoleCommand::BlockPopups(true))));
        assert_eq!(parse_command("exit"), Ok(Some(ConsoleCommand::Quit)));
        assert_eq!(
            parse_command("open http://localhost:8080/terminal-sales.html"),
            Ok(Some(ConsoleCommand::Open("http://localhost:8080/terminal-sales.html".to_string())))
        );
        assert!(parse_command("login sales").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_console_login_logout_cycle() {
        let mut console = console(Duration::from_secs(5));

        let output = console.execute(ConsoleCommand::Login {
            terminal: "sales".to_string(),
            username: "sales".to_string(),
            password: "sales123".to_string(),
        });
        assert!(output.starts_with("Sales Analytics Terminal accessed successfully!"));

        let output = console.execute(ConsoleCommand::Windows);
        assert_eq!(output, "terminal_sales: sales - Sales Analytics Terminal");

        let output = console.execute(ConsoleCommand::Sessions);
        assert!(output.contains("sales (Sales Manager)"));

        let output = console.execute(ConsoleCommand::Logout("sales".to_string()));
        assert_eq!(output, "Logged out; launcher notified");
        // The close request is applied before execute returns.
        assert!(console.launcher().sessions().unwrap().is_empty());
        assert_eq!(console.execute(ConsoleCommand::Sessions), "No active terminal sessions");
    }

    #[test]
    fn test_console_back_button_closes_window() {
        let mut console = console(Duration::from_secs(5));
        console.execute(ConsoleCommand::Login {
            terminal: "finance".to_string(),
            username: "accountant".to_string(),
            password: "acc123".to_string(),
        });

        let output = console.execute(ConsoleCommand::Back("finance".to_string()));
        assert_eq!(output, "Window 'terminal_finance' closed");
        // Going back does not log out.
        assert_eq!(console.launcher().sessions().unwrap().len(), 1);
        assert_eq!(
            console.execute(ConsoleCommand::Logout("finance".to_string())),
            "No open window 'terminal_finance'"
        );
    }

    #[test]
    fn test_console_notice_expires() {
        let mut console = console(Duration::ZERO);
        let output = console.execute(ConsoleCommand::Login {
            terminal: "sales".to_string(),
            username: "sales".to_string(),
            password: "nope".to_string(),
        });
        assert_eq!(output, "Invalid credentials. Try: sales/sales123");
        assert_eq!(console.execute(ConsoleCommand::Status), "No notices");

        let mut console = self::console(Duration::from_secs(60));
        console.execute(ConsoleCommand::Login {
            terminal: "sales".to_string(),
            username: "sales".to_string(),
            password: String::new(),
        });
        assert_eq!(
            console.execute(ConsoleCommand::Status),
            "Please enter both username and password"
        );
    }

    #[test]
    fn test_console_popup_blocker_alert() {
        let mut console = console(Duration::from_secs(5));
        console.execute(ConsoleCommand::BlockPopups(true));
        let output = console.execute(ConsoleCommand::Login {
            terminal: "system".to_string(),
            username: "sysadmin".to_string(),
            password: "sys123".to_string(),
        });
        assert_eq!(output, "ALERT: Please allow pop-ups for this website to open terminals.");
        assert!(console.launcher().sessions().unwrap().is_empty());
        assert!(console.host().popups_blocked());
    }

    #[test]
    fn test_open_terminal_url_command() {
        let fx = fixture();
        assert!(matches!(
            open_terminal_url(&fx.host, "not a url"),
            Err(CommandError::InvalidInput { .. })
        ));

        let err = open_terminal_url(&fx.host, "http://localhost:8080/terminal-system.html?role=Admin").unwrap_err();
        assert_eq!(
            err,
            CommandError::illegitimate_launch("launch parameter 'username' is missing")
        );
        assert_eq!(
            err.to_string(),
            "Invalid terminal access: launch parameter 'username' is missing"
        );

        let name = open_terminal_url(
            &fx.host,
            "http://localhost:8080/terminal-system.html?username=devops&role=DevOps+Engineer&sessionId=session_1",
        )
        .unwrap();
        assert_eq!(name, "terminal_system");
        assert!(take_terminal_alerts(&fx.host).is_empty());
    }

    #[test]
    fn test_console_alerts_on_illegitimate_launch() {
        let mut console = console(Duration::from_secs(5));
        let output = console.execute(ConsoleCommand::Open(
            "http://localhost:8080/terminal-analytics.html".to_string(),
        ));
        assert_eq!(
            output,
            "ALERT: Invalid terminal access: launch parameter 'username' is missing"
        );
        assert_eq!(console.execute(ConsoleCommand::Windows), "No open terminal windows");
        assert!(console.launcher().sessions().unwrap().is_empty());
    }

    #[test]
    fn test_render_empty_and_populated_roster() {
        assert_eq!(render_roster(&[], false), "No active terminal sessions");

        let fx = fixture();
        fx.launcher.login(TerminalKind::System, "devops", "devops123").unwrap();
        let rendered = render_roster(&fx.launcher.sessions().unwrap(), false);
        assert!(rendered.contains("System Monitoring Terminal"));
        assert!(rendered.contains("devops (DevOps Engineer)"));
        assert!(rendered.contains("Logged in: "));

        let coloured = render_roster(&fx.launcher.sessions().unwrap(), true);
        assert!(coloured.contains("\x1b[38;2;243;114;44m"));
    }
}
