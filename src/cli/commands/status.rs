use crate::state::SharedState;

pub async fn cmd_status(state: &SharedState) -> anyhow::Result<()> {
    let api = &state.search_api;
    let (database, backend) = tokio::join!(state.store.ping(), api.check_status());

    println!("Larder v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "  Database:   {}",
        if database.is_ok() { "ok" } else { "unreachable" }
    );
    println!(
        "  Search API: {} ({})",
        if backend { "running" } else { "offline, sample data will be used" },
        api.base_url()
    );

    Ok(())
}
