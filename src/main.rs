mod console;

use std::sync::Arc;

use console::ConsoleView;
use reminder_desk::{
    HttpReminderApi, ReminderClient, Session, appsettings::AppSettings, clock::Visibility,
};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load()?;
    let clock_settings = settings.clock_settings()?;
    log::info!("Using reminder service at {}", settings.api.base_url);

    let view = Arc::new(ConsoleView::default());
    let api = Arc::new(HttpReminderApi::new(&settings.api.base_url));
    let client = Arc::new(ReminderClient::new(
        api,
        view.clone(),
        settings.notice_delays(),
    ));

    let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);
    let session = Session::activate(client, view.clone(), visibility_rx, clock_settings).await;

    console::run(session.client(), &view, &visibility_tx, clock_settings.timezone).await?;

    session.teardown().await;
    Ok(())
}
