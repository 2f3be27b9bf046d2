use chrono::NaiveDate;
use serde::Serialize;
use shojin_chart_libs::SubmissionApiError;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown metric kind \"{0}\": specify \"score\" or \"ac_count\"")]
    UnknownMetric(String),
    #[error("failed to retrieve submissions")]
    ApiError(#[from] SubmissionApiError),
}

/// チャートに積み上げる指標の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// 獲得スコアの累積
    Score,
    /// AC数の累積
    AcCount,
}

impl FromStr for Metric {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(Metric::Score),
            "ac_count" => Ok(Metric::AcCount),
            _ => Err(ChartError::UnknownMetric(String::from(s))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Metric::Score => write!(f, "score"),
            Metric::AcCount => write!(f, "ac_count"),
        }
    }
}

/// ユニークAC抽出後の提出(1問題につき最初のACのみが残る)
///
/// `date`は`epoch_second`をJSTで解釈した提出日
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueAcSubmission {
    pub contest_id: String,
    pub problem_id: String,
    pub point: f64,
    pub date: NaiveDate,
}

/// 1ユーザ分のチャート系列
///
/// `dates`/`cumulative`/`tooltips`は常に同じ長さ(期間+1日分)になる
#[derive(Debug, Serialize)]
pub struct UserChartData {
    pub user_id: String,
    pub dates: Vec<String>,
    pub cumulative: Vec<i64>,
    pub tooltips: Vec<String>,
}
