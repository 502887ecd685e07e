// hr-client/examples/dashboard_cli.rs
// Log in and page through the employee list from a terminal

use std::sync::Arc;

use hr_client::forms::LoginForm;
use hr_client::{ClientConfig, Dashboard, MemoryNavigator, Navigator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <email> <password> [search]", args[0]);
        println!("  HR_API_URL must point at the backend, e.g. http://localhost:5000");
        return Ok(());
    }

    let config = ClientConfig::from_env()?;
    let navigator = Arc::new(MemoryNavigator::new("/auth"));
    let dashboard = Dashboard::new(&config, navigator.clone())?;

    let mut notifications = dashboard.notifications();
    tokio::spawn(async move {
        while let Ok(n) = notifications.recv().await {
            println!("[{:?}] {}", n.level, n.message);
        }
    });

    dashboard.login(LoginForm::new(&args[1], &args[2])).await?;

    let employees = dashboard.employees();
    employees.mount().await?;
    if let Some(term) = args.get(3) {
        employees.search(term.as_str()).await?;
    }

    loop {
        println!(
            "-- {} page {}/{} ({} total)",
            navigator.current(),
            employees.page(),
            employees.total_pages(),
            employees.total_count()
        );
        for e in employees.records() {
            let status = if e.is_active { "active" } else { "inactive" };
            println!("{:>6}  {:<30} {}", e.id.as_str(), e.name, status);
        }
        if employees.page() >= employees.total_pages() {
            break;
        }
        employees.next_page().await?;
    }

    dashboard.logout().await?;
    Ok(())
}
