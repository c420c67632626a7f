use clap::{value_t_or_exit, App, Arg, ArgMatches};
use log::error;
use roadgraph_osm::{convert_osm_xml, ConvertError, ConvertOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let matches = App::new("roadgraph-osm")
        .about("Converts an OpenStreetMap XML extract into a weighted text graph")
        .arg(
            Arg::with_name("input")
                .help("OSM XML file")
                .required(true),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .help("Output file, <input>_<weights>.txt by default"),
        )
        .arg(
            Arg::with_name("weight")
                .short("w")
                .long("weight")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Overrides a road class multiplier, e.g. residential=3"),
        )
        .arg(
            Arg::with_name("scale")
                .long("scale")
                .takes_value(true)
                .default_value("1000")
                .help("Factor applied to longitude and latitude"),
        )
        .arg(
            Arg::with_name("drop-self-loops")
                .long("drop-self-loops")
                .help("Skips edges between a node and itself"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), ConvertError> {
    let input = value_t_or_exit!(matches, "input", String);
    let scale = value_t_or_exit!(matches, "scale", f64);

    let mut options = ConvertOptions {
        scale,
        drop_self_loops: matches.is_present("drop-self-loops"),
        output: matches.value_of("out").map(PathBuf::from),
        ..ConvertOptions::default()
    };
    for spec in matches.values_of("weight").into_iter().flatten() {
        options.weights.apply_override(spec)?;
    }

    let load_timer = Instant::now();

    let report = convert_osm_xml(Path::new(&input), &options)?;

    println!(
        "total nodes in xml {} ({} declarations)",
        report.stats.unique_nodes, report.stats.nodes_seen
    );
    println!(
        "Wrote graph with {} nodes and {} edges to {} in {:.2} seconds",
        report.retained_nodes,
        report.edges_written,
        report.output.display(),
        load_timer.elapsed().as_secs_f32()
    );
    println!(
        "\tways: {} seen, {} roads, {} degenerate; dangling refs: {}; self loops: {}",
        report.stats.ways_seen,
        report.stats.roads_accepted,
        report.stats.degenerate_ways,
        report.stats.dangling_refs,
        report.stats.self_loops
    );

    Ok(())
}
