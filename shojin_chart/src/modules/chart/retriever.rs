use crate::modules::chart::{aggregator, reducer};
use crate::modules::models::{ChartError, Metric, UniqueAcSubmission, UserChartData};
use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::Lazy;
use shojin_chart_libs::SubmissionApi;
use tokio::time::{self, Duration};

/// AtCoderの開催タイムゾーン(JST)。日付の割り付けはこれで固定する
static JST: Lazy<FixedOffset> = Lazy::new(|| FixedOffset::east_opt(9 * 3600).unwrap());

/// ユーザ処理の間に挟む待ち時間(APIのレートリミットへの配慮)
const USER_INTERVAL: Duration = Duration::from_secs(1);

pub struct ChartDataRetriever<A> {
    api: A,
}

impl<A> ChartDataRetriever<A>
where
    A: SubmissionApi + Send + Sync,
{
    pub fn new(api: A) -> Self {
        ChartDataRetriever { api }
    }

    /// ユーザ毎のチャート系列を入力順に組み立てるメソッド
    ///
    /// `kind`の検証は取得を始める前に行い、不正な指定は取得を伴わずに
    /// エラーとして返す。プロセスを終了するかどうかは呼び出し側が決める。
    pub async fn retrieve_chart_data(
        &self,
        users: &[String],
        period: i64,
        kind: &str,
    ) -> Result<Vec<UserChartData>, ChartError> {
        self.retrieve_chart_data_at(users, period, kind, Utc::now().with_timezone(&JST))
            .await
    }

    async fn retrieve_chart_data_at(
        &self,
        users: &[String],
        period: i64,
        kind: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<UserChartData>, ChartError> {
        let metric: Metric = kind.parse()?;

        let mut users_data = Vec::with_capacity(users.len());
        for user in users {
            let solves = self
                .retrieve_unique_ac_submissions(user, period, now)
                .await?;
            users_data.push(aggregator::build_series(
                user,
                &solves,
                period,
                now.date_naive(),
                metric,
            ));

            time::sleep(USER_INTERVAL).await;
        }

        Ok(users_data)
    }

    /// 1ユーザ分のユニークAC集合を取得するメソッド
    async fn retrieve_unique_ac_submissions(
        &self,
        user: &str,
        period: i64,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<UniqueAcSubmission>, ChartError> {
        let since = (now - chrono::Duration::days(period)).timestamp();
        let submissions = self.api.fetch_submissions(user, since).await?;
        tracing::info!("{} submissions retrieved for {}", submissions.len(), user);

        Ok(reducer::reduce_unique_ac(submissions, now.offset()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use shojin_chart_libs::{Submission, SubmissionApiError};
    use std::sync::Mutex;

    struct StubApi {
        submissions: Vec<Submission>,
        calls: Mutex<Vec<(String, i64)>>,
    }

    impl StubApi {
        fn new(submissions: Vec<Submission>) -> Self {
            StubApi {
                submissions,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SubmissionApi for StubApi {
        async fn fetch_page(
            &self,
            user: &str,
            from_second: i64,
        ) -> Result<Vec<Submission>, SubmissionApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((String::from(user), from_second));
            Ok(self.submissions.clone())
        }
    }

    fn fixed_now() -> DateTime<FixedOffset> {
        JST.with_ymd_and_hms(2024, 1, 10, 21, 0, 0).unwrap()
    }

    fn ac_submission(problem_id: &str, epoch_second: i64) -> Submission {
        Submission {
            id: 0,
            epoch_second,
            problem_id: String::from(problem_id),
            contest_id: String::from("abc100"),
            user_id: String::from("chokudai"),
            language: String::from("Rust (1.70.0)"),
            point: 100.0,
            length: 1024,
            result: String::from("AC"),
            execution_time: Some(17),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn one_series_per_user_in_input_order() {
        let now = fixed_now();
        let solved_at = JST
            .with_ymd_and_hms(2024, 1, 9, 12, 0, 0)
            .unwrap()
            .timestamp();
        let retriever = ChartDataRetriever::new(StubApi::new(vec![ac_submission(
            "abc100_a", solved_at,
        )]));
        let users = vec![String::from("chokudai"), String::from("tourist")];

        let users_data = retriever
            .retrieve_chart_data_at(&users, 2, "score", now)
            .await
            .unwrap();

        assert_eq!(users_data.len(), 2);
        assert_eq!(users_data[0].user_id, "chokudai");
        assert_eq!(users_data[1].user_id, "tourist");
        for data in &users_data {
            assert_eq!(data.dates.len(), 3);
            assert_eq!(data.cumulative, vec![0, 100, 100]);
            assert_eq!(data.tooltips.len(), 3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_cutoff_is_period_days_before_now() {
        let now = fixed_now();
        let retriever = ChartDataRetriever::new(StubApi::new(Vec::new()));
        let users = vec![String::from("chokudai")];

        retriever
            .retrieve_chart_data_at(&users, 90, "ac_count", now)
            .await
            .unwrap();

        let calls = retriever.api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                String::from("chokudai"),
                (now - chrono::Duration::days(90)).timestamp()
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_kind_fails_before_any_fetch() {
        let retriever = ChartDataRetriever::new(StubApi::new(Vec::new()));
        let users = vec![String::from("chokudai")];

        let err = retriever
            .retrieve_chart_data_at(&users, 90, "foo", fixed_now())
            .await
            .unwrap_err();

        assert!(matches!(err, ChartError::UnknownMetric(_)));
        assert!(retriever.api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_user_list_yields_empty_chart_data() {
        let retriever = ChartDataRetriever::new(StubApi::new(Vec::new()));

        let users_data = retriever
            .retrieve_chart_data_at(&[], 90, "score", fixed_now())
            .await
            .unwrap();

        assert!(users_data.is_empty());
    }
}
