#[tokio::main]
async fn main() -> anyhow::Result<()> {
    treino_api::run_server().await
}
