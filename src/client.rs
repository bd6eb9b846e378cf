use crate::error::{Error, Result};
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{IntoUrl, Proxy, RequestBuilder, Response};

macro_rules! send {
    ($e:expr) => {
        $e.send().await.and_then(Response::error_for_status)
    };
}

/// User agent sent to the metadata endpoint and the thumbnail host
pub const DEFAULT_USER_AGENT: &str = "dpreview_scraper/1.0";

/// Thin wrapper over a shared reqwest client
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    user_agent: HeaderValue,
}

impl Client {
    pub fn new(user_agent: &str, proxy: Option<&str>) -> Result<Self> {
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|_| Error::Config(format!("bad user agent {:?}", user_agent)))?;
        let mut client = reqwest::Client::builder();
        if let Some(proxy) = proxy {
            client = client.proxy(Proxy::all(proxy)?);
        }
        // fixtures live on localhost, keep them away from any proxy in the environment
        #[cfg(test)]
        let client = client.no_proxy();
        let client = client.build()?;
        Ok(Self { client, user_agent })
    }

    /// GET with the transport's default headers only
    pub async fn get_text<U: IntoUrl>(&self, url: U) -> Result<String> {
        let response = send!(self.client.get(url))?;
        debug!("status: {}", response.status());
        Ok(response.text().await?)
    }

    /// GET carrying the identifying user agent
    pub(crate) fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.client
            .get(url)
            .header(USER_AGENT, self.user_agent.clone())
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = send!(request)?;
        debug!("status: {}", response.status());
        Ok(response)
    }
}
