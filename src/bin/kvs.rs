use chrono::Local;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use env_logger::Env;
use kvstore::{drivers, Error, KvStore};
use log::debug;
use std::env::current_dir;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kvs", author, version, about, long_about = None)]
struct Options {
    #[arg(short, long, env = "KVS_DRIVER", default_value = "redb", help = "DRIVER-NAME")]
    driver: String,
    #[arg(short, long, env = "KVS_INFO", help = "Driver info [default: ./kvs.redb]")]
    info: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set the value of a string key to a string
    Set(Set),
    /// Get the string value of a given string key
    Get(Get),
    /// Remove a given key
    Rm(Remove),
}

#[derive(Args, Debug)]
struct Set {
    key: String,
    value: String,
}

#[derive(Args, Debug)]
struct Get {
    key: String,
}

#[derive(Args, Debug)]
struct Remove {
    key: String,
}

fn main() -> anyhow::Result<()> {
    // log init
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(record.level()),
                record.module_path().unwrap_or("<unnamed>"),
                &record.args()
            )
        })
        .init();

    let options = parse_options()?;
    debug!("version = {:?}", env!("CARGO_PKG_VERSION"));
    debug!("{:?}", options);

    let info = match options.info {
        Some(info) => info,
        None => default_info()?.to_string_lossy().into_owned(),
    };
    let store = KvStore::new(&options.driver, &info)?;

    match options.command {
        Commands::Set(Set { key, value }) => {
            store.set(&key, value)?;
        }
        Commands::Get(Get { key }) => match store.get(&key) {
            Ok(value) => print!("{}", String::from_utf8_lossy(&value)),
            Err(Error::NotFound) => print!("Key not found"),
            Err(err) => return Err(err.into()),
        },
        Commands::Rm(Remove { key }) => {
            store.delete(&key)?;
        }
    }

    store.close()?;
    Ok(())
}

// `--help` lists whatever is registered in the process-wide registry.
fn parse_options() -> anyhow::Result<Options> {
    let registered = format!("Registered drivers: {}", drivers().names().join(", "));
    let matches = Options::command()
        .mut_arg("driver", |arg| arg.long_help(registered))
        .get_matches();
    Ok(Options::from_arg_matches(&matches)?)
}

fn default_info() -> std::io::Result<PathBuf> {
    Ok(current_dir()?.join("kvs.redb"))
}
