use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    config::load_config,
    error::{AppManagerError, Result},
    serde_json, tokio,
    tracing::info,
    tracing_subscriber,
};
use ::appmanager_provider::{
    config::{Args, Command, ProviderConfig},
    ResourceDefinition,
};

#[tokio::main]
async fn main() -> Result<()> {
    // setup tracing
    tracing_subscriber::fmt::init();

    let Args {
        config_path,
        command,
    } = Args::parse_args();
    let config: ProviderConfig = load_config(&config_path)?;
    let client = AppManagerClient::new(config.client_config()?);
    info!("Use Flink AppManager at {}", client.base_url());

    let definition: ResourceDefinition = load_config(command.resource_path())?;
    let result = match command {
        Command::Apply { .. } => definition.apply(&client).await?,
        Command::Update { .. } => definition.update(&client).await?,
        Command::Read { .. } => definition.read(&client).await?,
        Command::Destroy { .. } => {
            definition.destroy(&client).await?;
            info!("Resource destroyed");
            return Ok(());
        }
    };
    let output =
        serde_json::to_string_pretty(&result).map_err(AppManagerError::fail_to_decode_response)?;
    println!("{}", output);
    Ok(())
}
