use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use kmerminhash::cmd::{compare, sketch_file};
use kmerminhash::sketch::SketchParameters;
use kmerminhash::{Error, DEFAULT_MINHASH_PRIME};

#[derive(Parser, Debug)]
#[command(name = "kmh", version, about = "bottom-k MinHash sketches of sequence files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sketch each input file and print its hashes
    Sketch {
        #[command(flatten)]
        params: ParamArgs,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Count the hashes shared by two files and estimate their Jaccard similarity
    Compare {
        #[command(flatten)]
        params: ParamArgs,

        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// k-mer size, in nucleotides
    #[arg(short, long, default_value_t = 21)]
    ksize: u32,

    /// maximum number of hashes kept
    #[arg(short, long, default_value_t = 500)]
    num: u32,

    #[arg(long, default_value_t = DEFAULT_MINHASH_PRIME)]
    prime: u64,

    /// translate k-mers before hashing
    #[arg(long)]
    protein: bool,

    /// skip records with non-ACGT characters instead of failing
    #[arg(long)]
    force: bool,
}

impl ParamArgs {
    fn parameters(&self) -> SketchParameters {
        SketchParameters::builder()
            .ksize(self.ksize)
            .num(self.num)
            .prime(self.prime)
            .is_protein(self.protein)
            .build()
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sketch { params, files } => {
            let sp = params.parameters();
            for file in &files {
                let mh = sketch_file(file, &sp, params.force)?;
                let hashes: Vec<String> = mh.iter_mins().map(|h| h.to_string()).collect();
                println!("{}\t{}\t{}", file.display(), hashes.len(), hashes.join(","));
            }
            info!("sketched {} files", files.len());
        }
        Commands::Compare {
            params,
            first,
            second,
        } => {
            let sp = params.parameters();
            let a = sketch_file(&first, &sp, params.force)?;
            let b = sketch_file(&second, &sp, params.force)?;

            let cmp = compare(&a, &b)?;
            println!("common: {}", cmp.common);
            println!("jaccard: {:.3}", cmp.jaccard);
            info!(
                "compared {} ({} hashes) and {} ({} hashes)",
                first.display(),
                cmp.sizes.0,
                second.display(),
                cmp.sizes.1
            );
        }
    }

    Ok(())
}
