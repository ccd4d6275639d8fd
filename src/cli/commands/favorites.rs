use crate::models::SearchDomain;
use crate::state::SharedState;

pub async fn cmd_favorites_list(
    state: &SharedState,
    user_id: &str,
    domain: SearchDomain,
) -> anyhow::Result<()> {
    let set = state.favorites.load(user_id, domain).await?;

    if set.is_empty() {
        println!("{user_id} has no {domain} favorites");
        return Ok(());
    }

    println!("{} favorites for {user_id} ({domain}):", set.len());
    for identity in set.sorted() {
        println!("  ♥ {identity}");
    }

    Ok(())
}

pub async fn cmd_favorites_add(
    state: &SharedState,
    user_id: &str,
    domain: SearchDomain,
    identity: &str,
) -> anyhow::Result<()> {
    let mut set = state.favorites.load(user_id, domain).await?;

    if set.contains(identity) {
        println!("'{identity}' is already a favorite");
        return Ok(());
    }

    state.favorites.add(&mut set, identity).await?;
    println!("✓ Added '{identity}' to {domain} favorites");

    Ok(())
}

pub async fn cmd_favorites_remove(
    state: &SharedState,
    user_id: &str,
    domain: SearchDomain,
    identity: &str,
) -> anyhow::Result<()> {
    let mut set = state.favorites.load(user_id, domain).await?;

    if state.favorites.remove(&mut set, identity).await? {
        println!("✓ Removed '{identity}' from {domain} favorites");
    } else {
        println!("'{identity}' was not a favorite");
    }

    Ok(())
}
