use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use strgraph::parser::GFAParser;
use strgraph::{transitive_reduction, GraphParams};

fn parse_args() -> Result<(PathBuf, GraphParams)> {
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <graph.gfa> [min_overlap] [max_error_rate]", args[0]);
    }
    let path = PathBuf::from(&args[1]);

    let mut params = GraphParams::default();
    if let Some(min) = args.get(2) {
        let min = min
            .parse()
            .with_context(|| format!("invalid minimum overlap `{}`", min))?;
        params = params.with_min_overlap(min);
    }
    if let Some(er) = args.get(3) {
        let er = er
            .parse()
            .with_context(|| format!("invalid error rate `{}`", er))?;
        params = params.with_max_error_rate(er);
    }

    Ok((path, params))
}

fn main() -> Result<()> {
    env_logger::init();

    let (path, params) = parse_args()?;
    info!("loading {} with {}", path.display(), params);

    let mut graph = GFAParser::new(params)
        .parse_file(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    graph.validate().context("loaded graph is inconsistent")?;

    println!("# vertices: {}", graph.vertex_count());
    println!("# edges: {}", graph.edge_count() / 2);

    let stats = transitive_reduction(&mut graph)
        .context("transitive reduction failed")?;
    graph
        .validate()
        .context("reduced graph is inconsistent")?;

    println!("# edges removed: {}", stats.edges_removed);
    println!("# edges remaining: {}", graph.edge_count() / 2);

    Ok(())
}
