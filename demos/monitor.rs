use solis_local::{DeviceConfig, MessageLogMode, Poller, SolisClient, SENSORS};
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> solis_local::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let usage = "usage: monitor <host> <username> <password> [--interval <secs>] [--log <path>]";
    let (Some(host), Some(username), Some(password)) = (args.get(1), args.get(2), args.get(3))
    else {
        eprintln!("{usage}");
        std::process::exit(2);
    };
    let interval = args
        .iter()
        .position(|a| a == "--interval")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs);
    let log_path = args
        .iter()
        .position(|a| a == "--log")
        .and_then(|i| args.get(i + 1));

    let client = SolisClient::new(DeviceConfig::new(host, username, password))?;

    println!("Identifying logger at {}...", client.url());
    match client.identify().await {
        Ok(Some(serial)) => println!("Found logger {serial}"),
        Ok(None) => println!("Logger did not report a serial number"),
        Err(e) => {
            eprintln!("Setup failed ({}): {e}", e.setup_error_key());
            return Err(e);
        }
    }

    let mut builder = Poller::builder(client)
        .on_event(|event| {
            println!("{event:?}");
        })
        .on_status(|record| {
            let readings: Vec<String> = SENSORS
                .iter()
                .map(|s| match s.read(record) {
                    Some(v) => format!("{}: {v} {}", s.name, s.unit),
                    None => format!("{}: unavailable", s.name),
                })
                .collect();
            println!("{}", readings.join(" | "));
        });

    if let Some(secs) = interval {
        builder = builder.interval(secs);
    }
    if let Some(path) = log_path {
        println!("Logging polls to {path}");
        builder = builder.message_log(MessageLogMode::Diffed, path);
    }

    let mut poller = match builder.build() {
        Ok(poller) => poller,
        Err(e) => {
            eprintln!("cannot open poll log: {e}");
            std::process::exit(1);
        }
    };

    poller.run().await
}
