use std::env;
use std::sync::Arc;

use trx_transaction_builder::{reason, HttpProvider, NodeConfig, TransactionBuilder};

static USAGE: &str = "usage: send_trx <to> <from> <amount in sun>";

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 3 {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }
    let amount: i64 = match args[2].parse() {
        Ok(amount) => amount,
        Err(_) => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    let mut config = NodeConfig::default();
    if let Ok(url) = env::var("NODE_URL") {
        config.url = url;
    }
    if let Ok(key) = env::var("TRON_PRO_API_KEY") {
        config = config.with_header("TRON-PRO-API-KEY", key);
    }

    let provider = match HttpProvider::new(&config) {
        Ok(provider) => provider,
        Err(report) => {
            eprintln!("{:?}", report);
            std::process::exit(1);
        }
    };
    let builder = TransactionBuilder::new(Arc::new(provider));

    match builder.send_trx(&args[0], amount, Some(args[1].as_str())).await {
        Ok(transaction) => match serde_json::to_string_pretty(&transaction) {
            Ok(text) => println!("{}", text),
            Err(error) => eprintln!("{}", error),
        },
        Err(report) => {
            eprintln!("{}", reason(&report));
            log::debug!("{:?}", report);
            std::process::exit(1);
        }
    }
}
