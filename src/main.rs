use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::process;

use log::{debug, info, warn};

use zoscii::report::StrengthReport;
use zoscii::{
    analyze, decode_reader, stream, Bittage, ByteIndex, Encoder, Histogram, MemoryBlock,
    Profile, Rom, RomSurvey, ZRand, ZosciiError,
};

/// Options collects everything given on the command line after the subcommand
#[derive(Default)]
struct Options {
    bittage: Option<Bittage>,
    profile: Option<String>,
    charset: Option<String>,
    unmappable: Option<u32>,
    fallback: Option<String>,
    seed: Option<u64>,
    blocks: Vec<MemoryBlock>,
    text: bool,
    strict: bool,
    files: Vec<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Options, ZosciiError> {
        let mut opts = Options::default();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if let Some(bittage) = Bittage::from_flag(arg) {
                opts.bittage = Some(bittage);
                i += 1;
                continue;
            }
            match arg {
                "--profile" | "--charset" | "--unmappable" | "--fallback" | "--seed" | "--block" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| ZosciiError::Usage(format!("{} requires a value", arg)))?;
                    match arg {
                        "--profile" => opts.profile = Some(value.clone()),
                        "--charset" => opts.charset = Some(value.clone()),
                        "--fallback" => opts.fallback = Some(value.clone()),
                        "--unmappable" => opts.unmappable = Some(parse_number(arg, value)?),
                        "--seed" => opts.seed = Some(parse_number(arg, value)?),
                        _ => opts.blocks.push(MemoryBlock::parse(value)?),
                    }
                    i += 2;
                }
                "--text" => {
                    opts.text = true;
                    i += 1;
                }
                "--strict" => {
                    opts.strict = true;
                    i += 1;
                }
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(ZosciiError::Usage(format!("Unknown option '{}'", arg)));
                }
                _ => {
                    opts.files.push(arg.to_string());
                    i += 1;
                }
            }
        }
        Ok(opts)
    }

    /// Merge the profile file, if any, with command line overrides
    fn profile(&self) -> Result<Profile, ZosciiError> {
        let mut profile = match &self.profile {
            Some(path) => Profile::load(path)?,
            None => Profile::default(),
        };
        if let Some(bittage) = self.bittage {
            profile.bittage = bittage;
        }
        if let Some(charset) = &self.charset {
            profile.charset = charset.parse()?;
        }
        if let Some(unmappable) = self.unmappable {
            profile.unmappable = unmappable;
        }
        if let Some(fallback) = &self.fallback {
            profile.fallback = fallback.parse()?;
        }
        if self.seed.is_some() {
            profile.seed = self.seed;
        }
        if !self.blocks.is_empty() {
            profile.blocks = self.blocks.clone();
        }
        Ok(profile)
    }

    fn expect_files(&self, names: &[&str]) -> Result<(), ZosciiError> {
        if self.files.len() != names.len() {
            return Err(ZosciiError::Usage(format!(
                "Expected {} but got {} file argument(s)",
                names.join(" "),
                self.files.len()
            )));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ZosciiError> {
    value
        .parse()
        .map_err(|_| ZosciiError::Usage(format!("Invalid value '{}' for {}", value, flag)))
}

fn print_usage(program: &str) {
    eprintln!("zoscii - address-substitution encoder");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} encode   [options] <romfile> <inputfile> <encodedoutput>", program);
    eprintln!("  {} decode   [options] <romfile> <encodedinput> <outputfile>", program);
    eprintln!("  {} strength [options] <romfile> <inputfile>", program);
    eprintln!("  {} info     [options] <romfile>", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -16 | -32               Address width (default 16)");
    eprintln!("  --profile <file>        TOML profile with shared settings");
    eprintln!("  --charset <name>        ascii, petscii or ebcdic (default ascii)");
    eprintln!("  --unmappable <code>     Substitute for unmappable characters (default 42)");
    eprintln!("  --fallback <mode>       drop or sentinel for bytes absent from the ROM");
    eprintln!("  --block <start:size>    Restrict the ROM to a range; repeatable");
    eprintln!("  --seed <n>              Reproducible address selection");
    eprintln!("  --text                  Encode the input as UTF-8 text, not raw bytes");
    eprintln!("  --strict                Fail if any input symbol could not be encoded");
}

fn load_rom(path: &str, bittage: Bittage) -> Result<Rom, ZosciiError> {
    let bytes = fs::read(path)?;
    let rom = Rom::new(bytes, bittage)?;
    if rom.was_truncated() {
        warn!("ROM {} truncated to {} bytes", path, rom.len());
    }
    debug!("Loaded ROM {}: {}", path, rom);
    Ok(rom)
}

fn encode(opts: &Options) -> Result<(), ZosciiError> {
    opts.expect_files(&["<romfile>", "<inputfile>", "<encodedoutput>"])?;
    let profile = opts.profile()?;
    let rom = load_rom(&opts.files[0], profile.bittage)?;
    let index = ByteIndex::build(&rom, &profile.blocks);
    let encoder =
        Encoder::new(&index, profile.charset, profile.unmappable).with_fallback(profile.fallback);

    // ZRand is not a cryptographic generator; a predictable seed weakens the keyspace further
    let mut rng = ZRand::from_seed(profile.seed);
    let input = fs::read(&opts.files[1])?;
    let encoding = if opts.text {
        let text = String::from_utf8_lossy(&input);
        encoder.encode_str(&text, &mut rng)
    } else {
        encoder.encode_bytes(&input, &mut rng)
    };

    println!("Characters found in ROM: {}", encoding.matched);
    println!("Characters missing from ROM: {}", encoding.missing);
    if encoding.substituted > 0 {
        println!("Characters substituted: {}", encoding.substituted);
    }
    if opts.strict && !encoding.is_lossless() {
        return Err(ZosciiError::Usage(format!(
            "{} symbol(s) could not be encoded exactly; nothing written",
            encoding.missing + encoding.substituted
        )));
    }

    let out = BufWriter::new(File::create(&opts.files[2])?);
    stream::write_addresses(&encoding.addresses, profile.bittage, out)?;
    info!(
        "Wrote {} {} address(es) to {}",
        encoding.len(),
        profile.bittage,
        opts.files[2]
    );
    Ok(())
}

fn decode(opts: &Options) -> Result<(), ZosciiError> {
    opts.expect_files(&["<romfile>", "<encodedinput>", "<outputfile>"])?;
    let profile = opts.profile()?;
    let rom = load_rom(&opts.files[0], profile.bittage)?;
    let input = File::open(&opts.files[1])?;
    let output = File::create(&opts.files[2])?;
    let stats = decode_reader(input, &rom, output)?;
    println!("Decoded bytes: {}", stats.decoded);
    if stats.skipped > 0 {
        println!("Addresses outside ROM: {}", stats.skipped);
    }
    Ok(())
}

fn strength(opts: &Options) -> Result<(), ZosciiError> {
    opts.expect_files(&["<romfile>", "<inputfile>"])?;
    let profile = opts.profile()?;
    let rom = load_rom(&opts.files[0], profile.bittage)?;
    let rom_counts = Histogram::from_rom(&rom, &profile.blocks);
    let input_counts = Histogram::from_bytes(&fs::read(&opts.files[1])?);
    let report = StrengthReport {
        bittage: profile.bittage,
        metrics: analyze(&rom_counts, &input_counts),
        rom_counts: &rom_counts,
        input_counts: &input_counts,
    };
    print!("{}", report);
    Ok(())
}

fn info(opts: &Options) -> Result<(), ZosciiError> {
    opts.expect_files(&["<romfile>"])?;
    let profile = opts.profile()?;
    let rom = load_rom(&opts.files[0], profile.bittage)?;
    let index = ByteIndex::build(&rom, &profile.blocks);
    println!("ROM File: {}", opts.files[0]);
    println!("{}", index);
    println!();
    println!("{}", RomSurvey::survey(&index));
    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("zoscii");

    let Some(command) = args.get(1) else {
        print_usage(program);
        process::exit(1);
    };

    if command == "-h" || command == "--help" {
        print_usage(program);
        return;
    }

    let result = Options::parse(&args[2..]).and_then(|opts| match command.as_str() {
        "encode" => encode(&opts),
        "decode" => decode(&opts),
        "strength" => strength(&opts),
        "info" => info(&opts),
        other => Err(ZosciiError::Usage(format!("Unknown command '{}'", other))),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if matches!(e, ZosciiError::Usage(_)) {
            eprintln!();
            print_usage(program);
        }
        process::exit(1);
    }
}
