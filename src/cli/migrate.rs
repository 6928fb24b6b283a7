//! Table migration command

use clap::Args;

#[derive(Args, Debug)]
pub struct MigrateArgs {}

impl MigrateArgs {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let store = super::connect_store().await?;
        store.migrate().await?;
        tracing::info!("Table \"price_data\" is ready");
        Ok(())
    }
}
