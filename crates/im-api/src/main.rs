#[tokio::main]
async fn main() {
    if let Err(err) = im_api::run().await {
        tracing::error!(error = %err, "im-api failed");
        std::process::exit(1);
    }
}
