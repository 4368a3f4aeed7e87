#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    alma_backoffice::run().await
}
