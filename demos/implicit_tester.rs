//! CLI demonstration of the implicit-list allocator, mirroring the
//! original lab's `implicitTester`: runs a fixed sequence of
//! malloc/free calls under a chosen placement policy and prints the
//! heap's block layout after each step.

use std::process::exit;

use rallocator::{Fit, ImplicitAllocator};

fn usage() -> ! {
    println!("Usage: implicit_tester [-h | -w <fit>]");
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

/// Compares the placement a policy actually produced against the address
/// it should have produced; prints a diagnostic and exits 1 on mismatch.
fn address_compare(fit: Fit, correct: u32, returned: u32) {
    if correct != returned {
        println!("{fit:?} placement failed.");
        println!("Should have picked: {correct:#x}");
        println!("Instead chose: {returned:#x}");
        exit(1);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let fit = parse_args();
    println!("Implicit List Tester");
    println!("Using {fit:?} placement strategy");

    let mut a = ImplicitAllocator::init(rallocator::DEFAULT_MAX_HEAP_BYTES).unwrap();
    a.fit = fit;

    a.print_blocks();

    println!("Blocks after malloc(0x128), malloc(0x118), malloc(0x178)");
    let _bp1 = a.malloc(0x128).unwrap();
    let bp2 = a.malloc(0x118).unwrap();
    let bp3 = a.malloc(0x178).unwrap();
    a.print_blocks();

    println!("Blocks after free(bp2)");
    a.free(Some(bp2));
    a.print_blocks();

    println!("Blocks after malloc(0x38)");
    let bp4 = a.malloc(0x38).unwrap();
    a.print_blocks();

    // First fit picks the very first free block that is big enough: the
    // hole bp2 left behind. Next fit picks the hole after bp3 instead,
    // since the cursor has already advanced past bp2's hole by then.
    match fit {
        Fit::FirstFit => address_compare(fit, a.offset_of(bp2), a.offset_of(bp4)),
        Fit::NextFit => address_compare(fit, a.offset_of(bp3) + 0x180, a.offset_of(bp4)),
        Fit::BestFit => {}
    }
}
