#[cfg(test)]
mod model_tests;



#[cfg(test)]
mod handoff_tests;



#[cfg(test)]
mod command_integration_tests;


#[cfg(test)]
pub(crate) mod support {
    use crate::models::MessageEnvelope;
    use crate::services::{CredentialRegistry, Launcher, LocalWindowHost, MemoryStore};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use url::Url;

    pub const PAGES_BASE: &str = "http://localhost:8080/";

    pub struct Fixture {
        pub launcher: Arc<Launcher>,
        pub host: Arc<LocalWindowHost>,
        pub store: Arc<MemoryStore>,
        pub mailbox: mpsc::UnboundedReceiver<MessageEnvelope>,
    }

    pub fn pages_base() -> Url {
        Url::parse(PAGES_BASE).expect("valid base URL")
    }

    pub fn fixture() -> Fixture {
        let registry = CredentialRegistry::builtin();
        let (opener, mailbox) = mpsc::unbounded_channel();
        let host = Arc::new(LocalWindowHost::new(registry.clone(), opener));
        let store = Arc::new(MemoryStore::new());
        let launcher = Launcher::new(registry, store.clone(), host.clone(), pages_base());

        Fixture {
            launcher: Arc::new(launcher),
            host,
            store,
            mailbox,
        }
    }
}
