#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tiktok_uploader_lib::run().await
}
