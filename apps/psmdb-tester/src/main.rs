#[tokio::main]
async fn main() -> eyre::Result<()> {
    psmdb_tester::run().await
}
