use linklet::{
    startup,
    telementry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("linklet".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);
    startup::run().await
}
