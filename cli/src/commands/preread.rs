use anyhow::Result;
use planscore::{PollPage, client::HttpFetcher, load_plan, plan::preread_description};
use time::OffsetDateTime;

use super::{plan_id, site_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::PrereadArgs) -> Result<()> {
    let config = site_config(cli)?;
    let mut fetcher = HttpFetcher::new(config.poll.request_timeout())?;

    let url = config.score_url(&plan_id(&args.plan));
    eprintln!("[preread] waiting for {url}");
    let loaded = load_plan(&mut fetcher, &url, PollPage::Preread, &config.poll)?;
    let plan = &loaded.plan;

    println!("{}", preread_description(plan, loaded.modified_at, OffsetDateTime::now_utc()));
    println!("Districts: {}", plan.districts_count().unwrap_or_default());

    let model = plan.model();
    if model.and_then(|m| m.incumbency).unwrap_or(false) {
        println!("Incumbency scenarios: available");
    } else {
        println!("Incumbency scenarios: unavailable for this model");
    }
    if let Some(version) = model.and_then(|m| m.preferred_version()) {
        println!("Model version: {version}");
    }
    match plan.geometry_key() {
        Some(key) => println!("Geometry: {}", config.geometry_url(key)),
        None => println!("Geometry: none"),
    }

    Ok(())
}
