use crate::models::SearchDomain;
use crate::state::SharedState;

pub async fn cmd_popular(state: &SharedState, domain: SearchDomain, limit: u64) -> anyhow::Result<()> {
    let queries = state.search_service.popular(domain, limit).await;

    if queries.is_empty() {
        println!("No {domain} searches recorded yet");
        return Ok(());
    }

    println!("Most searched ({domain}):");
    println!("{:-<40}", "");
    for (i, q) in queries.iter().enumerate() {
        println!("{:>3}. {:<28} {:>6}", i + 1, q.query, q.search_count);
    }

    Ok(())
}
