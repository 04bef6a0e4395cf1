//! Browse Topics Example
//!
//! Walks a running topicdocs server with the client library: lists the
//! top-level topics, opens the first one and runs a search.
//!
//! Run with: cargo run --example browse_topics -- [base_url] [query]

use topicdocs_rs::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let query = args.next().unwrap_or_else(|| "focus".to_string());

    let client = Client::new(base_url);
    println!("Browsing {}\n", client.base_url());

    let topics = client.list_topics().await?;
    println!("Topics:");
    for topic in &topics {
        let marker = if topic.is_dir { "/" } else { "" };
        println!("   {}{}  {}", topic.slug, marker, topic.title);
    }

    if let Some(first) = topics.first() {
        let detail = client.get_topic(&first.slug).await?;
        println!("\n{} ({} children)", detail.title, detail.children.len());
        let trail: Vec<&str> = detail.breadcrumbs.iter().map(|b| b.title.as_str()).collect();
        println!("   {}", trail.join(" > "));
    }

    println!("\nSearch results for '{}':", query);
    for (i, hit) in client.search_topics(&query, None).await?.iter().enumerate() {
        println!("   {}. {} ({})", i + 1, hit.title, hit.path);
        println!("      {}", hit.snippet);
    }

    Ok(())
}
