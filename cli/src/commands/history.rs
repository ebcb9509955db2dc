use anyhow::{Context, Result, anyhow};
use planscore::{
    ViewState,
    client::{HttpFetcher, get_ok},
    history::{find_state, legend_html, state_biases},
    io::csv::{read_bias_csv, read_bias_csv_str},
    write_output,
};

use super::{plain, site_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::HistoryArgs) -> Result<()> {
    let config = site_config(cli)?;

    let view = match &args.hash {
        Some(hash) => ViewState::from_hash(hash)?,
        None => {
            let mut view = ViewState::default();
            if let Some(boundary) = &args.boundary { view = view.with_boundary(boundary.parse()?)?; }
            if let Some(year) = args.year { view = view.with_year(year)?; }
            view
        }
    };

    let records = match &args.csv {
        Some(path) => read_bias_csv(path)?,
        None => {
            let mut fetcher = HttpFetcher::new(config.poll.request_timeout())?;
            let url = config.history_csv_url(&view.csv_name());
            let response = get_ok(&mut fetcher, &url)?;
            read_bias_csv_str(response.text()?).with_context(|| format!("[history] Bad CSV at {url}"))?
        }
    };

    let states = state_biases(&records, &view);
    println!("{view} ({})", view.to_hash());

    match &args.state {
        Some(code) => {
            let state = find_state(&states, code).ok_or_else(|| anyhow!("[history] Unknown state: {code}"))?;
            println!("{}: {}", state.name, plain(&state.analysis())?);
            println!("More: {}", state.more_info_url());
        }
        None => {
            for state in &states {
                let value = state.value.map(|v| format!("{v:+.3}")).unwrap_or_else(|| "–".to_string());
                println!("{:<3}{:<16}{value:>8}  {}", state.code, state.name, state.class().title);
            }
        }
    }

    if let Some(out_dir) = &args.output {
        write_output(out_dir, "legend.html", legend_html().as_bytes())?;
    }

    Ok(())
}
