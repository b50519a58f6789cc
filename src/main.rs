use portfolio_contact::{configuration::get_configuration, telemetry, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber(telemetry::get_subscriber(
        "portfolio_contact".to_string(),
        std::io::stdout,
    ));

    let configuration = get_configuration()?;
    App::build(configuration)?.run_until_stopped().await?;

    Ok(())
}
