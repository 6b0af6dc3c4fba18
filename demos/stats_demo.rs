use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;

use chain_hash::HashSet;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of values to insert.
    #[arg(short = 'n', long = "count", default_value_t = 1000)]
    count: u64,

    /// Initial bucket count; 0 selects the default.
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 0)]
    initial_capacity: usize,

    /// Print the full bucket dump after filling the set.
    #[arg(short = 'd', long = "dump")]
    dump: bool,
}

fn main() {
    let args = Args::parse();

    let mut set: HashSet<u64, BuildHasherDefault<DefaultHasher>> =
        HashSet::with_capacity(args.initial_capacity);

    println!("Initial capacity: {}", set.capacity());
    println!("Filling set with {} u64 values...", args.count);

    let mut growths = 0;
    for value in 0..args.count {
        let before = set.capacity();
        set.insert(value);
        if set.capacity() != before {
            growths += 1;
        }
    }

    println!(
        "Inserted {} values, table grew {} times to {} buckets",
        set.len(),
        growths,
        set.capacity()
    );
    println!("Final load factor: {:.2}%", set.load_factor() * 100.0);

    let hist = set.chain_histogram();
    for (length, buckets) in hist.iter().enumerate() {
        println!("{:>3} | {}", length, buckets);
    }
    set.debug_stats().print();

    if args.dump {
        println!("{set}");
    }
}
