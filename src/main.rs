use serde_json::{from_reader, to_writer_pretty};
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::{stdin, stdout, BufReader};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use ballot_commit::options::{ReverseAlignment, ReverseVerification};
use ballot_commit::schema::{BallotRequest, Submission};

#[derive(StructOpt)]
#[structopt(
    name = "ballot-commit",
    about = "Compute a voter's blinded ballots and commitments for every question of an election."
)]
struct Options {
    /// The path to the JSON ballot request.
    /// We read from STDIN if not present.
    #[structopt(parse(from_os_str))]
    #[structopt(short = "i", long = "input")]
    input: Option<std::path::PathBuf>,

    /// A JSON file of protocol options. Flags below override it.
    #[structopt(parse(from_os_str))]
    #[structopt(short = "o", long = "options")]
    options: Option<std::path::PathBuf>,

    /// Place the reverse vector at the exact bit mirror of the forward vector.
    #[structopt(long = "mirrored-reverse")]
    mirrored_reverse: bool,

    /// Derive the reverse secret from the collectors' forward verification shares.
    #[structopt(long = "legacy-reverse-shares")]
    legacy_reverse_shares: bool,
}

impl Options {
    fn protocol_options(&self) -> Result<ballot_commit::Options, Error> {
        let mut options = match &self.options {
            None => ballot_commit::Options::default(),
            Some(path) => from_reader(BufReader::new(File::open(path)?))?,
        };
        if self.mirrored_reverse {
            options.reverse_alignment = ReverseAlignment::Mirrored;
        }
        if self.legacy_reverse_shares {
            options.reverse_verification = ReverseVerification::ForwardShares;
        }
        Ok(options)
    }
}

#[derive(Debug)]
enum Error {
    IO(io::Error),
    JSON(serde_json::Error),
    Ballot(ballot_commit::Error),
}

impl From<ballot_commit::Error> for Error {
    fn from(error: ballot_commit::Error) -> Error {
        Error::Ballot(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::IO(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::JSON(error)
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = Options::from_args();
    let options = opt.protocol_options()?;

    let reader: Box<dyn Read> = match &opt.input {
        None => Box::new(stdin()),
        Some(path) => Box::new(File::open(path)?),
    };

    let request: BallotRequest = from_reader(BufReader::new(reader))?;

    let submissions = ballot_commit::cast(&request, &options)?
        .into_iter()
        .map(|ballot| ballot.into_submission())
        .collect::<Vec<Submission>>();

    to_writer_pretty(stdout(), &submissions)?;
    println!();

    Ok(())
}
