//! Memblock benchmark
//!
//! Compares two ways of writing random bytes into a block:
//! - Test 1: one `as_uint8` projection over the whole block
//! - Test 2: one `Scalar<Uint8>` bound per byte
//!
//! Usage:
//!   cargo run --release --bin memblock_bench [OPTIONS]

use std::time::Instant;

use memblock::{Block, Codec, Result, Scalar, Uint8};

/// Benchmark configuration
struct BenchConfig {
    buffer_size: usize,
    iterations: usize,
    shared: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            iterations: 100_000,
            shared: false,
        }
    }
}

/// LCG sederhana untuk isi byte acak
struct Lcg(u64);

impl Lcg {
    fn next_byte(&mut self) -> u8 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

fn parse_args() -> BenchConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = BenchConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--size" | "-s" => {
                if i + 1 < args.len() {
                    config.buffer_size = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--iterations" | "-n" => {
                if i + 1 < args.len() {
                    config.iterations = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "--shared" => {
                config.shared = true;
            }
            "--help" | "-h" => {
                println!("Memblock Benchmark - projection vs per-byte scalar writes\n");
                println!("Usage: memblock_bench [OPTIONS]\n");
                println!("Options:");
                println!("  -s, --size <BYTES>    Block size in bytes (default: 1000)");
                println!("  -n, --iterations <N>  Passes over the block (default: 100000)");
                println!("      --shared          Use a shared (mmap-backed) block");
                println!("  -h, --help            Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn allocate(config: &BenchConfig) -> Result<Block> {
    if config.shared {
        Block::new_shared(config.buffer_size)
    } else {
        Ok(Block::new(config.buffer_size))
    }
}

fn print_result(label: &str, config: &BenchConfig, elapsed_ns: f64) {
    let ops = (config.buffer_size * config.iterations) as f64;
    let per_op = elapsed_ns / ops;
    println!("  {}", label);
    println!("    Total:      {:.2} ms", elapsed_ns / 1_000_000.0);
    println!("    Latency:    {:.2} ns/byte", per_op);
    println!(
        "    Throughput: {:.2} MB/sec\n",
        ops / (elapsed_ns / 1_000_000_000.0) / 1_000_000.0
    );
}

fn run_bench(config: BenchConfig) -> Result<()> {
    println!("🧱 Memblock Benchmark");
    println!("=====================\n");
    println!("  Block size: {} bytes", config.buffer_size);
    println!("  Iterations: {}", config.iterations);
    println!("  Shared:     {}\n", config.shared);

    let mut rng = Lcg(0x5EED);

    // Test 1: satu projection untuk seluruh block
    let block = allocate(&config)?;
    let bytes = block.view().as_uint8()?;
    let start = Instant::now();
    for _ in 0..config.iterations {
        for i in 0..bytes.len() {
            bytes.set(i, rng.next_byte())?;
        }
    }
    let projection_ns = start.elapsed().as_nanos() as f64;
    let checksum: u64 = bytes.iter().map(u64::from).sum();
    print_result("📊 Test 1: as_uint8 projection", &config, projection_ns);

    // Test 2: satu Scalar per byte
    let block = allocate(&config)?;
    let view = block.view();
    let scalars = (0..config.buffer_size)
        .map(|i| Uint8::bind(view.slice(i, 1)?))
        .collect::<Result<Vec<Scalar<'_, Uint8>>>>()?;
    let start = Instant::now();
    for _ in 0..config.iterations {
        for scalar in &scalars {
            scalar.set(rng.next_byte())?;
        }
    }
    let scalar_ns = start.elapsed().as_nanos() as f64;
    print_result("📊 Test 2: per-byte Scalar<Uint8>", &config, scalar_ns);

    println!("  Checksum (test 1): {}", checksum);
    if projection_ns > 0.0 {
        println!("  Ratio (test 2 / test 1): {:.2}x", scalar_ns / projection_ns);
    }
    println!("\n✅ Benchmark complete!");
    Ok(())
}

fn main() {
    let config = parse_args();

    if let Err(e) = run_bench(config) {
        eprintln!("❌ Benchmark error: {}", e);
        std::process::exit(1);
    }
}
