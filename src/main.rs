#[tokio::main]
async fn main() {
  // Logging may not be initialized yet if configuration failed
  if let Err(e) = goat_trainer_lib::run().await {
    eprintln!("Server failed: {}", e);
    std::process::exit(1);
  }
}
