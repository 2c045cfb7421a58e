use serde::{Serialize, Deserialize, de::DeserializeOwned};
use reqwest::{Client, header, Request, Response};

pub const REFERER: &str = "https://live.bilibili.com/";
pub const API_HOST: &str = "https://api.live.bilibili.com";
pub const WEB_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

#[derive(Debug)]
pub enum RestApiError {
    Network(reqwest::Error),
    HttpFailure(u16, String),
    Parse(serde_json::Error),
    Encode(serde_urlencoded::ser::Error),
    Header(header::InvalidHeaderValue),
    AccessRequired,
    RateLimited(String),
    Failure(i32, String),
}

impl From<reqwest::Error> for RestApiError {
    fn from(err: reqwest::Error) -> RestApiError {
        RestApiError::Network(err)
    }
}

impl From<serde_json::Error> for RestApiError {
    fn from(err: serde_json::Error) -> RestApiError {
        RestApiError::Parse(err)
    }
}

impl From<serde_urlencoded::ser::Error> for RestApiError {
    fn from(err: serde_urlencoded::ser::Error) -> RestApiError {
        RestApiError::Encode(err)
    }
}

impl From<header::InvalidHeaderValue> for RestApiError {
    fn from(err: header::InvalidHeaderValue) -> RestApiError {
        RestApiError::Header(err)
    }
}

pub type RestApiResult<Data> = Result<Data, RestApiError>;

#[derive(Clone)]
pub struct Access {
    pub uid: Option<u64>,
    pub key: String,
    pub csrf: Option<String>,
    cookie: String,
}

fn split_into_kv(pair: &str, pat: char) -> Option<(&str, &str)> {
    // ref: https://doc.servo.org/src/cookie/parse.rs.html#108-111
    match pair.find(pat) {
        Some(i) => Some((&pair[..i], &pair[(i + 1)..])),
        None => None,
    }
}

impl Access {
    pub fn from_cookie<T: Into<String>>(cookie: T) -> Option<Access> {
        let cookie = cookie.into();

        macro_rules! seat {
            ($name:tt, $ty:ty) => {
                let mut $name: Option<$ty> = None;
            };
        }

        seat!(uid, u64);
        seat!(key, String);
        seat!(csrf, String);

        for pair in cookie.split(';') {
            let (k, v) = split_into_kv(pair.trim(), '=')?;
            let (k, v) = (k.trim(), v.trim());

            macro_rules! occupy {
                ($name:ident) => {{
                    if let Some(_) = &$name { return None };
                    $name = Some(v.parse().ok()?);
                }};
            }

            match k {
                "DedeUserID" => occupy!(uid),
                "SESSDATA" => occupy!(key),
                "bili_jct" => occupy!(csrf),
                _ => { },
            }
        }

        Some(Access {
            uid,
            key: key?,
            csrf,
            cookie,
        })
    }

    /// the raw cookie text, sent verbatim as the `Cookie` header
    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

#[derive(Deserialize)]
pub struct RestApiResponse<Data> {
    pub code: i32,
    pub data: Data,
    pub message: String,
}

pub enum RestApiRequestKind {
    BareGet,
    Get,
    PostWithForm,
}

pub trait RestApi: Serialize {
    type Response: DeserializeOwned;

    fn kind(&self) -> RestApiRequestKind;
    fn path(&self) -> String;
}

// csrf and csrf_token must carry the same token for the server to accept
#[derive(Serialize)]
struct CsrfPair<'a> {
    csrf: &'a str,
    csrf_token: &'a str,
}

#[derive(Clone)]
pub struct HttpClient {
    host: String,
    client: Client,
    access: Option<Access>,
}

impl HttpClient {
    pub fn new(access: Option<Access>, api_proxy: Option<String>) -> Self {
        let host = match api_proxy {
            None => API_HOST.to_owned(),
            Some(host) => host,
        };
        Self {
            host,
            client: Client::builder().user_agent(WEB_USER_AGENT).build().unwrap(),
            access,
        }
    }

    pub fn new_bare() -> Self {
        Self {
            host: API_HOST.to_owned(),
            client: Client::new(),
            access: None,
        }
    }

    #[inline]
    pub fn url<T: AsRef<str>>(&self, path: T) -> String {
        format!("{}{}", self.host, path.as_ref())
    }

    fn cookie_header(access: &Access) -> RestApiResult<header::HeaderValue> {
        let mut cookie = header::HeaderValue::from_str(access.cookie())?;
        cookie.set_sensitive(true);
        Ok(cookie)
    }

    pub fn build_request<A: RestApi>(&self, api: &A) -> RestApiResult<Request> {
        let url = self.url(api.path());
        let builder = match api.kind() {
            RestApiRequestKind::BareGet => self.client.get(url),
            RestApiRequestKind::Get => {
                let mut builder = self.client.get(url).header(header::REFERER, REFERER);
                if let Some(access) = &self.access {
                    builder = builder.header(header::COOKIE, Self::cookie_header(access)?);
                }
                builder
            },
            RestApiRequestKind::PostWithForm => {
                let access = self.access.as_ref().ok_or(RestApiError::AccessRequired)?;
                let mut body = serde_urlencoded::to_string(api)?;
                if let Some(csrf) = &access.csrf {
                    let pair = serde_urlencoded::to_string(CsrfPair { csrf, csrf_token: csrf })?;
                    body.push('&');
                    body.push_str(pair.as_str());
                }
                self.client.post(url)
                    .header(header::ACCEPT, "*/*")
                    .header(header::REFERER, REFERER)
                    .header(header::COOKIE, Self::cookie_header(access)?)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(body)
            },
        };
        Ok(builder.build()?)
    }

    pub async fn call<A: RestApi>(&self, api: &A) -> RestApiResult<A::Response> {
        let request = self.build_request(api)?;
        self.proc_call(self.client.execute(request).await?).await
    }

    pub async fn proc_call<Data: DeserializeOwned>(&self, resp: Response) -> RestApiResult<Data>
    {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if status != 200 { return Err(RestApiError::HttpFailure(status, text)) };
        // classify `code` before the typed decode, so a failure envelope with
        // `data: null` keeps the server's message instead of becoming Parse
        let parsed: RestApiResponse<serde_json::Value> = serde_json::from_str(text.as_str())?;
        match parsed.code {
            0 => Ok(Data::deserialize(parsed.data)?),
            412 => Err(RestApiError::RateLimited(text)),
            code => Err(RestApiError::Failure(code, text)),
        }
    }
}
