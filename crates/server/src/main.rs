#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jsonzip_server::start().await
}
