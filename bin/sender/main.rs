use std::path::PathBuf;
use structopt::StructOpt;
use blive_api::{
    client::{Access, HttpClient},
    interact::{GetDanmakuColors, SendDanmaku, rnd_now},
};
use blive_log_config::{log_config, log4rs};

#[derive(StructOpt)]
struct Args {
    /// cookie file path, contents sent verbatim as the Cookie header
    #[structopt(short = "a", long)]
    access: PathBuf,
    /// api host override
    #[structopt(long)]
    api_proxy: Option<String>,
    /// log file path and name (logs to console when unset)
    #[structopt(short = "l", long)]
    log_path: Option<PathBuf>,
    /// set log level to debug (default is info)
    #[structopt(long)]
    log_debug: bool,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// send a danmaku to a live room
    Send {
        #[structopt(short = "r", long)]
        roomid: u32,
        #[structopt(short = "m", long)]
        msg: String,
        /// send as an emoji danmaku
        #[structopt(long)]
        emoji: bool,
        #[structopt(long)]
        color: Option<u32>,
        #[structopt(long)]
        mode: Option<i32>,
        #[structopt(long)]
        fontsize: Option<u32>,
        #[structopt(long)]
        bubble: Option<i32>,
    },
    /// list available danmaku colors and modes of a live room
    Colors {
        #[structopt(short = "r", long)]
        roomid: u32,
    },
}

#[tokio::main]
async fn main() {
    let Args { access, api_proxy, log_path, log_debug, command } = Args::from_args();
    log4rs::init_config(log_config(log_path, log_debug)).expect("FATAL: error during init logger");

    let cookie = tokio::fs::read_to_string(access).await.expect("FATAL: error during reading cookie file");
    let access = Access::from_cookie(cookie.trim_end())
        .expect("FATAL: cookie file is empty or has no SESSDATA");
    let client = HttpClient::new(Some(access), api_proxy);

    match command {
        Command::Send { roomid, msg, emoji, color, mode, fontsize, bubble } => {
            let mut send = SendDanmaku::new(roomid, msg, rnd_now(), emoji);
            if let Some(color) = color { send.color = color };
            if let Some(mode) = mode { send.mode = mode };
            if let Some(fontsize) = fontsize { send.fontsize = fontsize };
            if let Some(bubble) = bubble { send.bubble = bubble };
            log::debug!("[{: >10}] send rnd={} msg={}", send.roomid, send.rnd, send.msg);
            let sent = client.call(&send).await.expect("FATAL: send danmaku failed");
            log::info!("[{: >10}] sent", send.roomid);
            println!("{:?}", sent);
        },
        Command::Colors { roomid } => {
            let colors = client.call(&GetDanmakuColors { room_id: roomid }).await
                .expect("FATAL: get danmaku colors failed");
            log::info!("[{: >10}] colors fetched", roomid);
            println!("{}", serde_json::to_string(&colors).expect("FATAL: error during encoding colors"));
        },
    }
}
