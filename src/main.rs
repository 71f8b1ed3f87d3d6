use std::collections::BTreeMap;

use clap::Parser;

use hexgen::world::{World, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "hexgen")]
#[command(about = "Generate a hexagonal world grid with rivers and territories")]
struct Args {
    /// Grid width in hexes
    #[arg(short = 'W', long, default_value = "96")]
    width: usize,

    /// Grid height in hexes
    #[arg(short = 'H', long, default_value = "48")]
    height: usize,

    /// Average surface temperature in Celsius
    #[arg(short = 't', long, default_value = "15.0")]
    avg_temp: f32,

    /// Master seed (random if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Percent of hexes below sea level (random 50-70 if not specified)
    #[arg(long)]
    sea_percent: Option<u8>,

    /// Print the territory list as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = WorldConfig {
        width: args.width,
        height: args.height,
        avg_temperature: args.avg_temp,
        sea_percent: args.sea_percent,
        seed: Some(seed),
    };

    println!("Generating world with seed: {}", seed);
    println!("Grid size: {}x{}", args.width, args.height);

    let world = match World::generate(config) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("generation failed: {}", err);
            std::process::exit(1);
        }
    };

    let total = world.grid().len();
    let land = world.grid().land_count();
    println!(
        "Sea level: {:.1} ({}% of {} hexes below; {} land)",
        world.sealevel(),
        world.sea_percent(),
        total,
        land
    );
    println!("River segments: {}", world.rivers().len());
    println!("Territories: {}", world.territories().len());

    let mut deposits: BTreeMap<&str, usize> = BTreeMap::new();
    for hex in world.grid().iter() {
        if let Some(resource) = hex.resource {
            *deposits.entry(resource.kind.title()).or_insert(0) += 1;
        }
    }
    println!("Resource deposits: {}", deposits.values().sum::<usize>());
    for (kind, count) in &deposits {
        println!("\t{}: {}", kind, count);
    }

    if args.json {
        match serde_json::to_string_pretty(world.territories()) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("serialization failed: {}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    for t in world.territories() {
        println!(
            "Territory {}:\n\
             \tSize: {}\n\
             \tColor: {:?}\n\
             \tLandlocked: {}\n\
             \tAverage Temperature: {:.1}\n\
             \tAverage Moisture: {:.2}\n\
             \tNeighbors: {:?}",
            t.id.0,
            t.size,
            t.color,
            t.landlocked,
            t.avg_temp,
            t.avg_moisture,
            t.neighbors.iter().map(|n| n.0).collect::<Vec<_>>()
        );
        println!("\tBiomes:");
        for (biome, count) in &t.biomes {
            println!(
                "\t - {}: {} - {:.2}%",
                biome.title(),
                count,
                *count as f64 / t.size as f64 * 100.0
            );
        }
        println!("\tGroups: {}", t.groups.len());
        for g in &t.groups {
            println!("\t\tHexes: {}, X: {}, Y: {}", g.size, g.x, g.y);
        }
    }
}
