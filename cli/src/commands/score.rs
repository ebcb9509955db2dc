use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use planscore::{
    DistrictMap, LoadedPlan, Plan, PollPage,
    client::{HttpFetcher, get_ok},
    display::{ftva_races, library_panel, metrics_table, plan_array, score_cards, seat_share_array, sensitivity},
    load_plan,
    map::read_district_geojson,
    plan::{model_link, plan_headings},
    write_output,
};
use time::OffsetDateTime;

use super::{plain, plan_id, site_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ScoreArgs) -> Result<()> {
    let config = site_config(cli)?;
    let mut fetcher = HttpFetcher::new(config.poll.request_timeout())?;

    let loaded = if Path::new(&args.plan).is_file() {
        let text = fs::read_to_string(&args.plan)
            .with_context(|| format!("[score] Failed to read {}", args.plan))?;
        LoadedPlan { plan: Plan::from_json_str(&text)?.with_derived_geometry_key(), modified_at: None }
    } else {
        let url = config.score_url(&plan_id(&args.plan));
        eprintln!("[score] waiting for {url}");
        load_plan(&mut fetcher, &url, PollPage::Score, &config.poll)?
    };
    let plan = &loaded.plan;

    let headings = plan_headings(plan, loaded.modified_at, OffsetDateTime::now_utc());
    if let Some(description) = &headings.description { println!("{description}"); }
    let place = [headings.state, headings.house].into_iter().flatten().collect::<Vec<_>>().join(" ");
    println!("{place} ({})", headings.seats);
    if let Some(uploaded) = &headings.uploaded { println!("{uploaded}"); }
    if let Some(link) = model_link(plan.model(), &config.model_url_pattern) { println!("Model: {link}"); }
    println!();

    let cards = score_cards(plan, &config.metric_urls, args.show_all);
    for card in &cards {
        println!("{}", plain(&card.heading())?);
        println!("    {}", plain(&card.text)?);
    }

    let seats = seat_share_array(plan);
    if let Some(seats) = &seats { println!("\n{}", seats.summary_text()); }

    if let Some(series) = sensitivity(plan) {
        println!("\nSensitivity to swing:\n{}", series.to_text());
    }

    let races = ftva_races(plan);
    for race in &races {
        println!("{}: {}", plain(&race.heading())?, plain(&race.text())?);
    }

    let table = plan_array(plan).ok_or_else(|| anyhow!("[score] Plan has no districts to show"))?;
    println!("\n{}", table.to_text()?);

    let Some(out_dir) = &args.output else {
        if !args.no_map { tracing::info!("no output directory given; skipping map"); }
        return Ok(());
    };

    write_output(out_dir, "districts.html", table.to_html().as_bytes())?;
    write_output(out_dir, "cards.json", &serde_json::to_vec_pretty(&cards)?)?;
    if let Some(metrics) = metrics_table(plan, &config.metric_urls, args.show_all) {
        write_output(out_dir, "metrics.html", metrics.to_html().as_bytes())?;
    }
    if let Some(seats) = &seats {
        write_output(out_dir, "seatshare.html", seats.to_html(&config.images).as_bytes())?;
    }
    if !races.is_empty() {
        let html = races.iter().map(|race| race.to_html()).collect::<String>();
        write_output(out_dir, "races.html", html.as_bytes())?;
    }
    if let Some(panel) = library_panel(plan, &config) {
        let links = panel.links.iter().map(|link| link.to_html()).collect::<Vec<_>>().join("<br>");
        write_output(out_dir, "library.html", format!("{links}<p>{}</p>", panel.notes).as_bytes())?;
    }

    if !args.no_map {
        let bytes = match (&args.geometry, plan.geometry_key()) {
            (Some(path), _) => fs::read(path)
                .with_context(|| format!("[score] Failed to read {}", path.display()))?,
            (None, Some(key)) => get_ok(&mut fetcher, &config.geometry_url(key))?.body,
            (None, None) => return Err(anyhow!("[score] Plan has no geometry key; pass --geometry or --no-map")),
        };
        let geometry = read_district_geojson(&bytes)?;
        let map = DistrictMap::new(plan, &geometry);
        map.to_svg_with_size(&out_dir.join("map.svg"), args.width, 10)?;
        write_output(out_dir, "map.geojson", &serde_json::to_vec(&map.styled_geojson())?)?;
    }

    eprintln!("[score] wrote {}", out_dir.display());
    Ok(())
}
