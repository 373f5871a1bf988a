use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod hn_api;
pub(crate) mod output;
pub(crate) mod stories;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Fetch Hacker News top stories (title + link)", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true, default_value = "false")]
    #[arg(help = "Log to console (stderr)")]
    log_to_console: bool,

    #[arg(short, long, global = true, value_parser = config::parse_delay)]
    #[arg(help = "Seconds to wait after each collected story [default: HN_DELAY_SECS or 1]")]
    delay: Option<std::time::Duration>,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Save the stories as a JSON array of {title, link} objects
    Save {
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        #[arg(help = "Number of stories to fetch, clamped to 1..=30")]
        num: i64,

        #[arg(short, long, default_value = "top_stories.json")]
        #[arg(help = "JSON file to write")]
        output: std::path::PathBuf,
    },
    /// Print each story to stdout as it is fetched
    Print {
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        #[arg(help = "Number of stories to fetch, clamped to 1..=30")]
        num: i64,
    },
}

async fn run(args: Args, config: config::Config) -> anyhow::Result<()> {
    let client = hn_api::HnClient::new(&config.api_base_url, config.request_timeout)?;
    let delay = args.delay.unwrap_or(config.delay);

    match args.command {
        Command::Save { num, output } => {
            let max_items = stories::clamp_count(num);
            let records = stories::collect(&client, max_items, delay, |_| Ok(())).await?;

            output::save_as_json(&output, &records)?;
            tracing::info!(
                path = %output.display(),
                num_records = records.len(),
                "Saved stories"
            );
        }
        Command::Print { num } => {
            let max_items = stories::clamp_count(num);
            stories::collect(&client, max_items, delay, |record| {
                output::print_record(&mut std::io::stdout(), record)
            })
            .await?;
        }
    }

    Ok(())
}

fn init_tracing(
    config: &config::Config,
    log_to_console: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "hn_top_stories.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    // Stdout carries the printed stories, so console logs go to stderr.
    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if config.log_to_console || log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    guard
}

#[tokio::main]
async fn main() {
    use clap::Parser;
    let args = Args::parse();

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(1);
        }
    };

    let guard = init_tracing(&config, args.log_to_console);

    tracing::info!(
        config =? config,
        args =? args,
        "Starting HN top stories"
    );

    match run(args, config).await {
        Ok(()) => tracing::info!("HN top stories finished"),
        Err(e) => {
            tracing::error!(error =? e, "Error when fetching top stories");
            eprintln!("Error: {e:?}");
            // Flush the file log before exiting.
            drop(guard);
            std::process::exit(1);
        }
    }
}
