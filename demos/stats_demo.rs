use chain_hash::Config;
use chain_hash::HashTable;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    #[arg(short = 'c', long = "capacity", default_value_t = chain_hash::DEFAULT_CAPACITY)]
    capacity: usize,

    #[arg(short = 't', long = "threshold", default_value_t = chain_hash::DEFAULT_LOAD_FACTOR_THRESHOLD)]
    threshold: f64,
}

fn main() -> Result<(), chain_hash::Error> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Creating HashTable with capacity {} and load factor threshold {}",
        args.capacity, args.threshold
    );

    let mut table: HashTable<u64, u64> =
        HashTable::with_config(Config::new(args.capacity, args.threshold))?;

    println!("Filling table with {} u64 keys...", args.entries);
    for key in 0..args.entries {
        table.set(key, key * key);
    }

    println!(
        "Inserted {} keys; capacity grew to {}",
        table.count(),
        table.capacity()
    );
    println!("Final load factor: {:.2}%", table.load_factor() * 100.0);

    println!("=== Chain Length Histogram ===");
    for (length, buckets) in table.chain_histogram().iter().enumerate() {
        if *buckets > 0 {
            println!("{length:>4}: {buckets}");
        }
    }
    table.chain_stats().print();

    Ok(())
}
