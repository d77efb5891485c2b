#[tokio::main]
async fn main() {
    tangled_backend::run().await;
}
