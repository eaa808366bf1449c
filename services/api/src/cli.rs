use crate::demo::{run_demo, run_gaps, run_recommend, DemoArgs, GapsArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outfit_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Outfit AI",
    about = "Recommend outfits and audit wardrobes from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank outfits from a wardrobe JSON file
    Recommend(RecommendArgs),
    /// List purchase suggestions for a wardrobe JSON file
    Gaps(GapsArgs),
    /// Run recommendations, history and gap analysis against a built-in wardrobe
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Gaps(args) => run_gaps(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["outfit-ai-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_recommend_overrides() {
        let cli = Cli::try_parse_from([
            "outfit-ai-api",
            "recommend",
            "--wardrobe",
            "wardrobe.json",
            "--occasion",
            "工作",
            "--limit",
            "3",
            "--seed",
            "42",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.wardrobe.to_string_lossy(), "wardrobe.json");
                assert_eq!(args.occasion.as_deref(), Some("工作"));
                assert_eq!(args.limit, Some(3));
                assert_eq!(args.seed, Some(42));
            }
            other => panic!("expected recommend command, got {other:?}"),
        }
    }

    #[test]
    fn gaps_requires_a_wardrobe() {
        assert!(Cli::try_parse_from(["outfit-ai-api", "gaps"]).is_err());
    }
}
