use std::{fs, process, time::Instant};

use clap::Parser;
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use huffpack::{compress_with_table, properties::{CliConfig, CompressionReport}, HuffmanError, Symbol, SENTINEL};

const DEMO_DATA: [u8; 24] = [
    0x03, 0x74, 0x04, 0x04, 0x04, 0x35, 0x35, 0x64,
    0x64, 0x64, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x56, 0x45, 0x56, 0x56, 0x56, 0x09, 0x09, 0x09,
];

#[derive(Parser, Debug)]
#[command(about = "Compress a byte buffer with a static Huffman code and report the gain")]
struct Args {
    /// File to compress; without it a built-in sample buffer is used
    source: Option<String>,
    /// Basename for the .huff, .properties and .codes output files
    #[arg(short, long)]
    output: Option<String>,
    /// Compress this many random bytes instead of a file
    #[arg(long)]
    sample: Option<usize>,
    /// Seed of the random sample
    #[arg(long)]
    seed: Option<u64>,
    /// Print the code of every symbol
    #[arg(long = "print-codes", default_value_t = false)]
    print_codes: bool,
    /// Print input and output as binary bytes
    #[arg(long = "print-bits", default_value_t = false)]
    print_bits: bool,
    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Properties file with defaults for the flags above
    #[arg(long)]
    config: Option<String>,
}

fn gen_sample(n: usize, seed: Option<u64>) -> Vec<u8> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..n)
        .map(|_| rng.gen_range(0..SENTINEL))
        .collect()
}

fn bit_dump(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run(args: Args) -> Result<(), HuffmanError> {
    let config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let print_codes = args.print_codes || config.print_codes;
    let print_bits = args.print_bits || config.print_bits;
    let json = args.json || config.json;

    let data = match (&args.source, args.sample.or(config.sample)) {
        (Some(source), _) => fs::read(source)?,
        (None, Some(n)) => gen_sample(n, args.seed.or(config.seed)),
        (None, None) => DEMO_DATA.to_vec(),
    };

    info!("Compressing {} bytes", data.len());

    let comp_time = Instant::now();
    let (compressed, codes) = compress_with_table(&data)?;
    info!("Compressed in {}ns", comp_time.elapsed().as_nanos());

    if print_bits {
        println!("{}", bit_dump(&data));
    }

    if print_codes {
        println!("Encoding used:");
        for (symbol, code) in codes.iter() {
            let name = match symbol {
                Symbol::Byte(b) => format!("{:08b}", b),
                Symbol::EndOfStream => "EOS".to_string(),
            };
            println!("byte: {} code: {} size: {}", name, code, code.len());
        }
    }

    if print_bits {
        println!("{}", bit_dump(compressed.bytes()));
    }

    let report = CompressionReport::new(data.len(), &compressed, &codes);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Number of bytes before compression: {}", report.original_bytes);
        println!("Number of bytes after compression: {}", report.compressed_bytes);
        println!("Number of bits after compression: {}", report.total_bits);
        println!("Compression ratio: {:.3}x", report.ratio());
        println!("Space savings: {:.2}%", report.space_savings());
    }

    if let Some(dest) = &args.output {
        fs::write(format!("{}.huff", dest), compressed.bytes())?;
        fs::write(format!("{}.codes", dest), bincode::serialize(&codes)?)?;
        report.store(dest)?;
        info!("Stored {}.huff, {}.codes and {}.properties", dest, dest, dest);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("huffpack: {}", e);
        process::exit(1);
    }
}
