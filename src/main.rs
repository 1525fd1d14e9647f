#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "lwodoc", about = "LightWave .lwo inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		path: PathBuf,
	},
	Chunks {
		path: PathBuf,
		#[arg(long)]
		tag: Option<String>,
	},
	Surfs {
		path: PathBuf,
		#[arg(long)]
		name: Option<String>,
	},
	Model {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> lwodoc::lwo::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { path } => cmd::info::run(path),
		Commands::Chunks { path, tag } => cmd::chunks::run(path, tag),
		Commands::Surfs { path, name } => cmd::surfs::run(path, name),
		Commands::Model { path, json } => cmd::model::run(path, json),
	}
}
