use std::path::PathBuf;

use clap::Parser;

use wtrie_core::io;
use wtrie_core::model::chain::ChainModel;

/// Markov chain text generator backed by a character trie.
///
/// Trains a fixed-context chain on the input file, then generates text by
/// weighted random selection over the learned transitions.
#[derive(Parser)]
#[command(name = "wtrie")]
#[command(version)]
#[command(about = "Markov chain text generator backed by a character trie")]
struct Cli {
	/// Context window length in characters
	context: usize,

	/// Number of characters to generate
	length: usize,

	/// Input text file
	input: PathBuf,

	/// Custom start window (at least CONTEXT characters; defaults to the
	/// beginning of the input)
	#[arg(short, long)]
	seed: Option<String>,

	/// Print the trained trie structure before generating (debugging)
	#[arg(long)]
	dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let cli = Cli::parse();

	let text = io::read_file(&cli.input)?;
	log::info!("loaded {} characters from {}", text.chars().count(), cli.input.display());

	let mut chain = ChainModel::new(cli.context)?;
	let windows = chain.train(&text)?;
	log::info!("trained on {} windows, {} trie nodes", windows, chain.node_count());

	if let Some(seed) = &cli.seed {
		chain.set_seed(seed)?;
	}

	if cli.dump {
		eprint!("{}", chain.dump()?);
	}

	println!("{}", chain.generate(cli.length)?);
	Ok(())
}
