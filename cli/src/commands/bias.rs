use anyhow::Result;
use planscore::{
    Chamber,
    bias::{BiasScale, MetricKey, lookup_bias_with},
};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::BiasArgs) -> Result<()> {
    let metric: MetricKey = args.metric.parse()?;
    let chamber: Chamber = args.chamber.parse()?;

    let lookup = lookup_bias_with(Some(args.score), metric, &BiasScale::for_chart(chamber, metric));

    println!("{}", lookup.description);
    println!("party:     {}", if lookup.party.is_empty() { "none" } else { lookup.party });
    println!("color:     {}", lookup.color);
    println!("extremity: {}", lookup.extremity);

    Ok(())
}
