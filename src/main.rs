#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootswitch::bootstrapper::run().await
}
