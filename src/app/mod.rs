use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::AppConfig, database::DbManager, templ_manager::TemplateManager, EmailClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let email_addr = config.email_config.valid_sender()?;

        let dm = DbManager::init(&config).await?;
        let tm = TemplateManager::init();
        let email_timeout = config.email_config.timeout();
        let email_client = EmailClient::new(
            &config.email_config.url,
            email_addr,
            config.email_config.auth_token,
            email_timeout,
        )?;

        let app_state = AppState::new(
            dm,
            tm,
            email_client,
            config.email_config.send_welcome,
            config.email_config.relay_domain,
        );

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub database_mgr: DbManager,
    pub templ_mgr: TemplateManager,
    pub email_client: EmailClient,
    /// Whether a successful registration also triggers the welcome email.
    pub send_welcome: bool,
    pub relay_domain: String,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(
        database_mgr: DbManager,
        templ_mgr: TemplateManager,
        email_client: EmailClient,
        send_welcome: bool,
        relay_domain: String,
    ) -> Self {
        AppState(Arc::new(InternalState {
            database_mgr,
            templ_mgr,
            email_client,
            send_welcome,
            relay_domain,
        }))
    }
}
