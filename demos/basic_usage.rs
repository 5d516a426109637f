//! Walks through every user operation against a running user service.
//!
//! This example shows how to:
//! - Configure a client with a base path and an auth header
//! - Bound each call with a deadline
//! - Create, fetch, update, list and delete a user
//! - Tell service failures apart from unexpected statuses and timeouts
//!
//! Run with: `USERS_URL=http://localhost:8080 cargo run --example basic_usage`

use restuser::{Client, Context, Error, ListUsersParams, User};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("restuser=debug,basic_usage=info")
        .init();

    let url = std::env::var("USERS_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let client = Client::builder()
        .base_url(&url)?
        .base_path("/v1")
        .default_header("Authorization", "Bearer local-dev")?
        .build()?;

    let ctx = Context::background().with_timeout(Duration::from_secs(5));

    println!("=== Create ===");
    let created = client
        .create_user(&ctx, &User::new("Pepe", "pepe@faceit.com", "es"))
        .await?;
    println!("Created {} at {}", created.id, created.created_at);

    println!("=== Update ===");
    let renamed = User {
        name: "José".to_string(),
        ..created.clone()
    };
    let updated = client.update_user(&ctx, &renamed).await?;
    println!("Updated name: {} (updated_at {})", updated.name, updated.updated_at);

    println!("=== List (es) ===");
    for user in client
        .list_users(&ctx, &ListUsersParams::country("es"))
        .await?
    {
        println!("  {} <{}> [{}]", user.name, user.email, user.country);
    }

    println!("=== Delete ===");
    client.delete_user(&ctx, &created.id).await?;

    println!("=== Get after delete ===");
    match client.get_user(&ctx, &created.id).await {
        Ok(user) => println!("Still there: {:?}", user),
        Err(e) if e.is_not_found() => println!("Gone, as expected"),
        Err(Error::Service(err)) => println!("Service error {}: {:?}", err.status_code, err.message()),
        Err(e @ Error::UnexpectedStatus(_)) => println!("{}", e),
        Err(e) if e.is_cancellation() => println!("Timed out: {}", e),
        Err(e) => return Err(e),
    }

    Ok(())
}
