use netback_client::application_impl::*;
use netback_client::application_port::*;
use netback_client::infra::RedirectNavigator;
use netback_client::infra_http::*;
use netback_client::logger::*;
use netback_client::session::Session;
use netback_client::settings::*;
use serde::Serialize;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let base_url = resolve_base_url(&project_settings.api.origin, &project_settings.api.base_url)?;
    let transport = Arc::new(ReqwestTransport::new(project_settings.api.timeout())?);
    let cookies = Arc::new(transport.cookie_source(&base_url)?);
    let navigator = Arc::new(RedirectNavigator::new(
        project_settings.auth.login_path.clone(),
    ));
    let session = Arc::new(Session::new());

    let client = Arc::new(ApiClient::new(
        ApiClientConfig::from_settings(&project_settings).with_base_url(base_url),
        session,
        transport,
        cookies,
        navigator.clone(),
    ));
    let _session_log = client.subscribe(|token| {
        debug!(authenticated = token.is_some(), "session changed");
    });

    client.login(&cli.username, &cli.password).await?;
    let api = NetbackApiImpl::new(client.clone());

    let result = run(&api, cli.command).await;
    client.logout().await;

    if let Some(path) = navigator.take_redirect() {
        error!(%path, "session expired; log in again");
    }
    result
}

async fn run(api: &dyn NetbackApi, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Me => print(&api.current_user().await?),
        Command::Devices => print(&api.list_devices().await?),
        Command::Device { id } => print(&api.get_device(id).await?),
        Command::Backups { device_id } => print(&api.backup_history(device_id).await?),
        Command::LastBackups => print(&api.last_backups().await?),
        Command::Compare { old, new } => print(&api.compare_backups(old, new).await?),
        Command::Schedule => print(&api.backup_schedule().await?),
        Command::Ping { ip } => print(&api.ping(&ip).await?),
        Command::RuleSets => print(&api.list_rule_sets().await?),
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
