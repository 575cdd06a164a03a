#[tokio::main]
async fn main() {
    candleview::cli::run().await;
}
