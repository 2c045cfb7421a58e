pub use log4rs;

use std::path::PathBuf;
use log::LevelFilter;
use log4rs::{
    append::{Append, console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::{json::JsonEncoder, pattern::PatternEncoder},
};

pub fn log_config(path: Option<PathBuf>, debug: bool) -> Config {
    let appender: Box<dyn Append> = match path {
        Some(path) => Box::new(
            FileAppender::builder()
                .encoder(Box::new(JsonEncoder::new()))
                .build(path)
                .unwrap(),
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {m}{n}")))
                .build(),
        ),
    };
    Config::builder()
        .appender(Appender::builder().build("log", appender))
        .build(
            Root::builder()
                .appender("log")
                .build(if debug { LevelFilter::Debug } else { LevelFilter::Info }),
        )
        .unwrap()
}
