use anyhow::{Result, ensure};
use planscore::{
    PollPage,
    client::{HttpFetcher, UploadForm, upload_id},
    load_plan,
};

use super::site_config;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::UploadArgs) -> Result<()> {
    let config = site_config(cli)?;
    ensure!(args.file.is_file(), "[upload] No such file: {}", args.file.display());

    let mut fetcher = HttpFetcher::new(config.poll.request_timeout())?;
    let form = UploadForm::fetch(&mut fetcher, &config.upload_url)?;

    if cli.verbose > 0 { eprintln!("[upload] {} -> {}", args.file.display(), form.action); }
    let location = form.submit(&args.file, config.poll.request_timeout())?;
    println!("{location}");

    let Some(id) = upload_id(&location) else { return Ok(()) };
    println!("Plan id: {id}");

    if args.wait {
        let loaded = load_plan(&mut fetcher, &config.score_url(&id), PollPage::Preread, &config.poll)?;
        println!("Read {} districts", loaded.plan.districts().len());
    }

    Ok(())
}
