use serde::{Serialize, Deserialize};
use crate::client::{RestApi, RestApiRequestKind};

/// freshness nonce carried as `rnd`, unix timestamp in seconds
pub fn rnd_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[derive(Serialize)]
pub struct SendDanmaku {
    pub bubble: i32,
    pub dm_type: Option<i32>, // Some(1) for emoji
    pub msg: String,
    pub color: u32,
    pub mode: i32,
    pub fontsize: u32,
    pub rnd: i64,
    pub roomid: u32,
}

#[derive(Debug, Deserialize)]
pub struct SentDanmaku {
    pub mode_info: SentDanmakuModeInfo,
}

#[derive(Debug, Deserialize)]
pub struct SentDanmakuModeInfo {
    pub mode: i32,
    pub show_player_type: i32,
    pub extra: String,
}

impl SendDanmaku {
    pub fn new(roomid: u32, msg: String, rnd: i64, emoji: bool) -> SendDanmaku {
        SendDanmaku {
            bubble: 0,
            dm_type: if emoji { Some(1) } else { None },
            msg,
            color: 16777215,
            mode: 1,
            fontsize: 25,
            rnd,
            roomid,
        }
    }
}

impl RestApi for SendDanmaku {
    type Response = SentDanmaku;

    fn kind(&self) -> RestApiRequestKind {
        RestApiRequestKind::PostWithForm
    }

    fn path(&self) -> String {
        "/msg/send".to_owned()
    }
}

#[derive(Serialize)]
pub struct GetDanmakuColors {
    pub room_id: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanmakuColors {
    pub group: Vec<DanmakuColorGroup>,
    pub mode: Vec<DanmakuModeDesc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanmakuColorGroup {
    pub name: String,
    pub sort: i32,
    pub color: Vec<DanmakuColor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanmakuColor {
    pub name: String,
    pub color: String,
    pub color_hex: String,
    pub status: i32,
    pub weight: i32,
    pub color_id: i32,
    pub origin: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DanmakuModeDesc {
    pub name: String,
    pub mode: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: i32,
}

impl RestApi for GetDanmakuColors {
    type Response = DanmakuColors;

    fn kind(&self) -> RestApiRequestKind {
        RestApiRequestKind::Get
    }

    fn path(&self) -> String {
        format!(
            "/xlive/web-room/v1/dM/GetDMConfigByGroup?room_id={}",
            self.room_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RestApiResponse;

    #[test]
    fn send_defaults() {
        let send = SendDanmaku::new(917818, "test".to_owned(), 1661500000, false);
        let body = serde_urlencoded::to_string(&send).unwrap();
        assert_eq!(body, "bubble=0&msg=test&color=16777215&mode=1&fontsize=25&rnd=1661500000&roomid=917818");
    }

    #[test]
    fn send_emoji() {
        let send = SendDanmaku::new(917818, "official_147".to_owned(), 1661500000, true);
        let body = serde_urlencoded::to_string(&send).unwrap();
        assert!(body.contains("dm_type=1"));
    }

    #[test]
    fn send_msg_is_form_encoded() {
        let send = SendDanmaku::new(1, "a b&c".to_owned(), 0, false);
        let body = serde_urlencoded::to_string(&send).unwrap();
        assert!(body.contains("msg=a+b%26c"));
    }

    #[test]
    fn rnd_progresses() {
        let first = rnd_now();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = rnd_now();
        assert!(second > first);
    }

    #[test]
    fn colors_path() {
        assert_eq!(
            GetDanmakuColors { room_id: 917818 }.path(),
            "/xlive/web-room/v1/dM/GetDMConfigByGroup?room_id=917818"
        );
    }

    #[test]
    fn colors_response() {
        let resptext = r##"{"code":0,"data":{"group":[{"name":"普通颜色","sort":0,"color":[{"name":"白色","color":"16777215","color_hex":"#ffffff","status":1,"weight":0,"color_id":4,"origin":0}]}],"mode":[{"name":"滚动","mode":1,"type":"all","status":1}]},"message":"0"}"##;
        let parsed: RestApiResponse<DanmakuColors> = serde_json::from_str(resptext).unwrap();
        assert_eq!(parsed.code, 0);
        assert_eq!(parsed.data.group[0].color[0].color, "16777215");
        assert_eq!(parsed.data.mode[0].kind, "all");
    }

    #[test]
    fn sent_response() {
        let resptext = r#"{"code":0,"data":{"mode_info":{"mode":1,"show_player_type":0,"extra":"{}"}},"message":""}"#;
        let parsed: RestApiResponse<SentDanmaku> = serde_json::from_str(resptext).unwrap();
        assert_eq!(parsed.data.mode_info.mode, 1);
    }
}
