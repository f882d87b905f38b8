// Utility functions for the application

use uuid::Uuid;

use crate::models::{Credential, RegistryEntry, TerminalKind};
use crate::theme::TerminalTheme;

/// Return the hard-coded terminal registry.
/// Passwords are static plaintext; this is a demo gate, not a security boundary.
pub fn get_default_registry_entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry {
            kind: TerminalKind::Sales,
            name: "Sales Analytics Terminal".into(),
            credentials: vec![
                Credential::new("sales", "sales123", "Sales Manager"),
                Credential::new("sales_rep", "rep123", "Sales Representative"),
            ],
            theme: TerminalTheme::for_kind(TerminalKind::Sales),
            page: "terminal-sales.html".into(),
        },
        RegistryEntry {
            kind: TerminalKind::System,
            name: "System Monitoring Terminal".into(),
            credentials: vec![
                Credential::new("sysadmin", "sys123", "System Administrator"),
                Credential::new("devops", "devops123", "DevOps Engineer"),
            ],
            theme: TerminalTheme::for_kind(TerminalKind::System),
            page: "terminal-system.html".into(),
        },
        RegistryEntry {
            kind: TerminalKind::Analytics,
            name: "Business Intelligence Terminal".into(),
            credentials: vec![
                Credential::new("analytics", "analytics123", "Data Analyst"),
                Credential::new("bi_user", "bi123", "BI Specialist"),
            ],
            theme: TerminalTheme::for_kind(TerminalKind::Analytics),
            page: "terminal-analytics.html".into(),
        },
        RegistryEntry {
            kind: TerminalKind::Finance,
            name: "Financial Terminal".into(),
            credentials: vec![
                Credential::new("finance", "finance123", "Financial Analyst"),
                Credential::new("accountant", "acc123", "Accountant"),
            ],
            theme: TerminalTheme::for_kind(TerminalKind::Finance),
            page: "terminal-finance.html".into(),
        },
    ]
}

/// Fresh opaque session token, `session_` followed by 32 hex digits.
pub fn generate_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}
