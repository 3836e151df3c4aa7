//! CLI demonstration of the explicit-list allocator, mirroring the
//! original lab's `explicitTester`: allocates three blocks, frees the
//! first two, and prints both the block layout and the free list so a
//! reader can see the resulting coalesce.

use std::process::exit;

use rallocator::{ExplicitAllocator, Fit};

fn usage() -> ! {
    println!("Usage: explicit_tester [-h | -w <fit>]");
    println!("       -w <fit> is first (default), next, or best");
    println!("       -h prints usage information");
    exit(0);
}

fn parse_args() -> Fit {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => Fit::FirstFit,
        3 if args[1] == "-w" => args[2].parse().unwrap_or_else(|_| usage()),
        _ => usage(),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let fit = parse_args();
    println!("Explicit List Tester");
    println!("Using {fit:?} placement strategy");

    let mut a = ExplicitAllocator::init(rallocator::DEFAULT_MAX_HEAP_BYTES).unwrap();
    a.fit = fit;

    println!("Blocks after init:");
    a.print_blocks();
    a.print_free_list();

    println!("Blocks after malloc(0x7f8):");
    let bp1 = a.malloc(0x7f8).unwrap();
    a.print_blocks();
    a.print_free_list();

    println!("Blocks after malloc(0x3f8):");
    let bp2 = a.malloc(0x3f8).unwrap();
    a.print_blocks();
    a.print_free_list();

    println!("Blocks after malloc(0x7f8):");
    let _bp3 = a.malloc(0x7f8).unwrap();
    a.print_blocks();
    a.print_free_list();

    a.free(Some(bp1));
    a.free(Some(bp2));
    println!("Blocks after freeing the first two blocks (should coalesce):");
    a.print_blocks();
    a.print_free_list();
}
