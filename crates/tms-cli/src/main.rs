use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{builder::RangedU64ValueParser, Parser};
use dotenvy::dotenv;
use tms_common::{
    api::{MatchRequest, MatchResponse},
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
    matching::{CarrierMatcher, JitterSource, MatcherConfig, NoJitter, RandomJitter},
};
use tracing::{error, info};

const APP_NAME: &str = "tms-match";

#[derive(Debug, Parser)]
#[command(
    name = "tms-match",
    about = "Rank carriers for a shipment job and print the matches as JSON"
)]
struct Cli {
    /// Match request JSON (`{ job, carriers, policy?, limit? }`); stdin when omitted
    #[arg(long, short = 'r')]
    request: Option<PathBuf>,

    /// Seed the score jitter for reproducible rankings
    #[arg(long, env = "TMS_MATCH_SEED")]
    seed: Option<u64>,

    /// Disable the score jitter entirely; takes precedence over `--seed`
    #[arg(long)]
    no_jitter: bool,

    /// Maximum number of matches to return (at least 1)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    limit: Option<usize>,

    /// Include per-carrier score breakdowns and excluded carriers
    #[arg(long)]
    explain: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {source_name}: {error}")]
    Read {
        source_name: String,
        error: io::Error,
    },
    #[error("invalid match request: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    let _ = dotenv();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "tms-match failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let raw = read_request(cli.request.as_ref())?;
    let response = match_from_json(cli, &raw)?;

    let encoded = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .map_err(CliError::Encode)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{encoded}")?;
    Ok(())
}

fn read_request(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|error| CliError::Read {
            source_name: path.display().to_string(),
            error,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|error| CliError::Read {
                    source_name: "stdin".into(),
                    error,
                })?;
            Ok(buf)
        }
    }
}

/// Parses a request, runs the matcher and builds the response.
fn match_from_json(cli: &Cli, raw: &str) -> Result<MatchResponse, CliError> {
    let request: MatchRequest = serde_json::from_str(raw).map_err(CliError::InvalidRequest)?;

    let mut config = MatcherConfig::from_env();
    // A request limit of 0 is treated as unset.
    if let Some(limit) = cli.limit.or(request.limit.filter(|limit| *limit > 0)) {
        config = config.with_max_results(limit);
    }

    let mut jitter = jitter_source(cli);
    info!(
        job_id = %request.job.id,
        carriers = request.carriers.len(),
        max_results = config.max_results,
        seeded = cli.seed.is_some() && !cli.no_jitter,
        jitter = !cli.no_jitter,
        "matching carriers"
    );

    let matcher = CarrierMatcher::new(config);
    let outcome = matcher.rank_carriers(
        &request.job,
        &request.carriers,
        &request.policy,
        jitter.as_mut(),
    );

    Ok(MatchResponse::from_outcome(outcome, cli.explain, Utc::now()))
}

fn jitter_source(cli: &Cli) -> Box<dyn JitterSource> {
    if cli.no_jitter {
        return Box::new(NoJitter);
    }

    match cli.seed {
        Some(seed) => Box::new(RandomJitter::seeded(seed)),
        None => Box::new(RandomJitter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "job": {
            "id": "J-42",
            "requiredCapabilities": ["refrigerated", "expedited"],
            "requiredRegions": ["midwest"]
        },
        "carriers": [
            {
                "id": "C-1",
                "name": "Cold Lane",
                "status": "Active",
                "complianceStatus": "Fully Compliant",
                "capabilities": ["refrigerated", "expedited"],
                "operatingRegions": ["midwest"]
            },
            {
                "id": "C-2",
                "name": "Half Cold",
                "status": "Active",
                "complianceStatus": "Compliant",
                "capabilities": ["refrigerated"],
                "operatingRegions": ["midwest"]
            },
            {
                "id": "C-3",
                "name": "Parked",
                "status": "Inactive",
                "complianceStatus": "Compliant",
                "capabilities": ["refrigerated", "expedited"]
            }
        ]
    }"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tms-match").chain(args.iter().copied()))
    }

    #[test]
    fn ranks_request_without_jitter() {
        let response = match_from_json(&cli(&["--no-jitter"]), REQUEST).unwrap();

        assert_eq!(response.job_id, "J-42");
        assert_eq!(response.evaluated, 3);
        assert_eq!(response.eligible, 2);
        let scores: Vec<_> = response.matches.iter().map(|m| m.match_score).collect();
        assert_eq!(scores, vec![100, 70]);
        assert!(response.breakdowns.is_none());
    }

    #[test]
    fn limit_flag_caps_results() {
        let response = match_from_json(&cli(&["--no-jitter", "--limit", "1"]), REQUEST).unwrap();
        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].carrier_id, "C-1");
    }

    #[test]
    fn explain_lists_excluded_carriers() {
        let response = match_from_json(&cli(&["--no-jitter", "--explain"]), REQUEST).unwrap();
        let excluded = response.excluded.unwrap();
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].carrier_id, "C-3");
        assert_eq!(response.breakdowns.unwrap().len(), 2);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let first = match_from_json(&cli(&["--seed", "11"]), REQUEST).unwrap();
        let second = match_from_json(&cli(&["--seed", "11"]), REQUEST).unwrap();
        assert_eq!(first.matches, second.matches);
    }

    #[test]
    fn rejects_malformed_requests() {
        let err = match_from_json(&cli(&["--no-jitter"]), r#"{"carriers": []}"#).unwrap_err();
        assert!(matches!(err, CliError::InvalidRequest(_)));
    }

    #[test]
    fn no_jitter_wins_over_seed() {
        let response =
            match_from_json(&cli(&["--seed", "1", "--no-jitter"]), REQUEST).unwrap();
        let scores: Vec<_> = response.matches.iter().map(|m| m.match_score).collect();
        assert_eq!(scores, vec![100, 70]);
    }

    #[test]
    fn seed_from_environment_does_not_block_no_jitter() {
        std::env::set_var("TMS_MATCH_SEED", "5");
        let parsed = Cli::try_parse_from(["tms-match", "--no-jitter"]);
        std::env::remove_var("TMS_MATCH_SEED");

        let args = parsed.unwrap();
        assert_eq!(args.seed, Some(5));
        let response = match_from_json(&args, REQUEST).unwrap();
        let scores: Vec<_> = response.matches.iter().map(|m| m.match_score).collect();
        assert_eq!(scores, vec![100, 70]);
    }

    #[test]
    fn zero_limit_flag_is_rejected() {
        assert!(Cli::try_parse_from(["tms-match", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["tms-match", "--limit", "2"]).is_ok());
    }

    #[test]
    fn zero_request_limit_falls_back_to_default() {
        let mut request: serde_json::Value = serde_json::from_str(REQUEST).unwrap();
        request["limit"] = serde_json::json!(0);

        let response = match_from_json(&cli(&["--no-jitter"]), &request.to_string()).unwrap();
        assert_eq!(response.above_threshold, 2);
        assert_eq!(response.matches.len(), 2);
    }
}
