use ffgraph::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(std::io::stderr)
        .init();

    println!("{}", ffgraph::render(&config)?);
    Ok(())
}
