use clap::ArgMatches;
use log::{debug, info};
use pollkit::config::Config;
use pollkit::image::{self, AspectRatio};
use pollkit::newsletter::{NewsletterClient, Subscription, SUBSCRIBE_SUCCESS_MESSAGE};
use pollkit::rate_limit::{debounce, throttle};
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn dispatch(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    match matches.subcommand() {
        Some(("optimize", m)) => {
            let url = required(m, "url")?;
            let width = m.get_one::<u32>("width").copied();
            println!("{}", image::optimize(url, width)?);
        }
        Some(("srcset", m)) => {
            println!("{}", image::build_source_set(required(m, "url")?)?);
        }
        Some(("placeholder", m)) => {
            let kind = m.get_one::<AspectRatio>("kind").copied().unwrap_or_default();
            println!("{}", image::placeholder(kind));
        }
        Some(("subscribe", m)) => {
            let email = required(m, "email")?;
            let name = m.get_one::<String>("name").map(String::as_str).unwrap_or("");
            return subscribe(email, name).await;
        }
        Some(("debounce", m)) => {
            let wait = Duration::from_millis(m.get_one::<u64>("wait-ms").copied().unwrap_or(0));
            echo_debounced(wait).await?;
        }
        Some(("throttle", m)) => {
            let limit = Duration::from_millis(m.get_one::<u64>("limit-ms").copied().unwrap_or(0));
            echo_throttled(limit).await?;
        }
        Some((other, _)) => anyhow::bail!("unknown command: {}", other),
        None => anyhow::bail!("no command given; see --help"),
    }
    Ok(ExitCode::SUCCESS)
}

fn required<'a>(m: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    m.get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing argument: {}", id))
}

async fn subscribe(email: &str, name: &str) -> anyhow::Result<ExitCode> {
    let cfg = Config::from_env().map_err(anyhow::Error::msg)?;
    let sub = match Subscription::new(email, name) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };
    let client = NewsletterClient::from_config(&cfg)?;
    info!("subscribing via {}", client.endpoint());
    match client.subscribe(&sub).await {
        Ok(()) => {
            println!("{}", SUBSCRIBE_SUCCESS_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!("subscribe failed: {}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

// Each stdin line is one trigger event; surviving events are echoed to stdout.
async fn echo_debounced(wait: Duration) -> anyhow::Result<()> {
    let debounced = debounce(|line: String| println!("{}", line), wait);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debounced.call(line);
    }
    // Let the trailing invocation fire before exiting.
    let poll = debounced.wait().max(Duration::from_millis(1));
    while debounced.is_pending() {
        tokio::time::sleep(poll).await;
    }
    Ok(())
}

async fn echo_throttled(limit: Duration) -> anyhow::Result<()> {
    let throttled = throttle(|line: String| println!("{}", line), limit);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        throttled.call(line);
    }
    Ok(())
}
