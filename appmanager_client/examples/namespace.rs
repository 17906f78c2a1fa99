use ::appmanager_client::AppManagerClient;
use ::appmanager_common::{
    config::ClientConfig,
    error::Result,
    resource::{NamespaceState, Stateful},
};

#[tokio::main]
async fn main() -> Result<()> {
    let client = AppManagerClient::new(ClientConfig::new("http://localhost:8080"));
    client.create_namespace("etl").await?;
    let namespace = client
        .wait_namespace_state("etl", NamespaceState::Active.as_str())
        .await?;
    println!(
        "Namespace {} is {}",
        namespace.name().unwrap_or_default(),
        namespace.current_state().unwrap_or_default()
    );
    Ok(())
}
