use crate::atcoder::model::Submission;
use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::time::{self, Duration};

type Result<T> = std::result::Result<T, SubmissionApiError>;

/// APIが1回のリクエストで返す提出レコードの上限数
pub const SUBMISSION_PAGE_LIMIT: usize = 500;

/// ページ取得の間に挟む待ち時間(APIのレートリミットへの配慮)
const PAGE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum SubmissionApiError {
    #[error("failed to request to AtCoder Problems API")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize submission JSON data")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid API url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("{0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait SubmissionApi {
    /// 提出一覧のうち1ページ分(最大500件)を取得するメソッド
    async fn fetch_page(&self, user: &str, from_second: i64) -> Result<Vec<Submission>>;

    /// 指定時刻以降のユーザの提出を全ページ分取得するメソッド
    ///
    /// ページサイズが上限に達している間は、そのページの最大`epoch_second`を
    /// 次の`from_second`として取得を続ける。境界時刻ちょうどの提出は2回
    /// 取得されうるが、その重複は下流のユニークAC抽出が吸収する。
    async fn fetch_submissions(&self, user: &str, from_second: i64) -> Result<Vec<Submission>> {
        let mut submissions: Vec<Submission> = Vec::new();
        let mut cursor = from_second;
        loop {
            let page = self.fetch_page(user, cursor).await?;
            tracing::debug!("fetched {} submissions of {} from {}", page.len(), user, cursor);

            let newest = page.iter().map(|submission| submission.epoch_second).max();
            let last_page = page.len() < SUBMISSION_PAGE_LIMIT;
            submissions.extend(page);

            if last_page {
                break;
            }
            // a full page is never empty, so newest is always present here
            cursor = newest.unwrap_or(cursor);

            time::sleep(PAGE_INTERVAL).await;
        }

        Ok(submissions)
    }
}

pub struct AtCoderProblemsClient {
    url: Url,
    client: Client,
}

impl AtCoderProblemsClient {
    pub fn new() -> Result<Self> {
        Ok(AtCoderProblemsClient {
            url: Url::parse("https://kenkoooo.com/atcoder/atcoder-api/v3/user/submissions")?,
            client: Client::builder()
                .gzip(true)
                .timeout(Duration::from_secs(10))
                .build()?,
        })
    }
}

#[async_trait]
impl SubmissionApi for AtCoderProblemsClient {
    async fn fetch_page(&self, user: &str, from_second: i64) -> Result<Vec<Submission>> {
        let res = self
            .client
            .get(self.url.clone())
            .query(&[("user", user), ("from_second", &from_second.to_string())])
            .send()
            .await?;
        tracing::debug!("GET {}", res.url());

        match res.error_for_status_ref() {
            Ok(_) => {}
            Err(e) => {
                let message = format!(
                    "error response returned from AtCoder Problems API: {:?}",
                    e
                );
                tracing::error!(message);
                return Err(SubmissionApiError::UnexpectedError(message));
            }
        };

        let body = res.text().await?;
        let submissions: Vec<Submission> = serde_json::from_str(&body)?;

        Ok(submissions)
    }
}
