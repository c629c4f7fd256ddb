use crate::server;
use careerwise::error::AppError;
use careerwise::quiz::{destination_for_raw_status, routing_table, DraftId};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "CareerWise quiz router",
    about = "Serve and inspect quiz draft routing from the command line",
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
    /// Print the page a draft with the given status resumes on
    Route(RouteArgs),
    /// Print the full status to destination table
    Table(TableArgs),
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

#[derive(Args, Debug)]
pub(crate) struct RouteArgs {
    /// Draft status as stored (e.g. intake_done)
    #[arg(long)]
    pub(crate) status: String,
    /// Draft identifier to embed in the path
    #[arg(long)]
    pub(crate) rid: String,
}

#[derive(Args, Debug)]
pub(crate) struct TableArgs {
    /// Draft identifier to embed in each path
    #[arg(long, default_value = "<rid>")]
    pub(crate) rid: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Route(args) => run_route(args),
        Command::Table(args) => {
            print!("{}", render_table(&args.rid));
            Ok(())
        }
    }
}

fn run_route(args: RouteArgs) -> Result<(), AppError> {
    let rid = DraftId::parse(args.rid)?;
    let routed = destination_for_raw_status(&args.status, rid.as_str());
    if routed.fallback {
        eprintln!(
            "note: status '{}' is not recognised; using the intake fallback",
            args.status
        );
    }
    println!("{}", routed.path);
    Ok(())
}

fn render_table(rid: &str) -> String {
    let table = routing_table(rid);
    let width = table
        .iter()
        .map(|(status, _)| status.as_str().len())
        .max()
        .unwrap_or(0);

    table
        .into_iter()
        .map(|(status, path)| format!("{:<width$}  {path}\n", status.as_str()))
        .collect()
}
