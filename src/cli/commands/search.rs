use crate::models::{Record, SearchDomain, SearchQuery};
use crate::state::SharedState;

pub async fn cmd_search(
    state: &SharedState,
    domain: SearchDomain,
    query: &str,
    city: Option<&str>,
    related: bool,
) -> anyhow::Result<()> {
    let query = SearchQuery::new(domain, query)?.with_city(city);

    println!("Searching {domain} for: {}", query.text());

    let service = &state.search_service;
    let (records, origin, sample_data) = if related {
        let report = service.search_with_related(&query).await;
        let sample = report.uses_sample_data();
        (report.records, report.origin, sample)
    } else {
        let outcome = service.search(&query).await;
        let sample = outcome.uses_sample_data();
        (outcome.records, outcome.origin, sample)
    };

    // Let detached counter updates land before the process exits
    service.settle().await;

    if sample_data {
        println!("Using sample data");
    }

    println!();
    println!("{} results (from {}):", records.len(), origin.as_str());
    println!("{:-<60}", "");

    for record in &records {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &Record) {
    let card = record.card();

    match &card.original_price_label {
        Some(original) => println!("• {} {} (was {original})", card.title, card.price_label),
        None => println!("• {} {}", card.title, card.price_label),
    }
    if !card.subtitle.is_empty() {
        println!("  {}", card.subtitle);
    }
    println!(
        "  {} | ★ {:.1} | {} | ID: {}",
        card.source, card.rating, card.delivery_time, card.identity
    );
    if !card.in_stock {
        println!("  Out of stock");
    }
    println!();
}
