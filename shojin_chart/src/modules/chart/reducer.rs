use crate::modules::models::UniqueAcSubmission;
use chrono::{FixedOffset, TimeZone};
use shojin_chart_libs::Submission;
use std::collections::HashSet;

/// ヒューリスティック(AHC)コンテストのID接頭辞
///
/// スコアの性質がアルゴリズムコンテストと異なるため集計から除外する
const HEURISTIC_CONTEST_PREFIX: &str = "ahc";

/// 取得済みの提出一覧からユニークAC集合を抽出する
///
/// AHCを除外し、ACのみを提出日(`tz`での暦日)の昇順に並べたうえで、
/// 問題ごとに最初のACだけを残す。同じ問題のACが複数あるときは最も早い
/// 日付のもの、同日なら取得順で先のものが勝つ。ページ境界で二重取得された
/// レコードもここで吸収される。
pub fn reduce_unique_ac(
    submissions: Vec<Submission>,
    tz: &FixedOffset,
) -> Vec<UniqueAcSubmission> {
    let algo_submissions: Vec<Submission> = submissions
        .into_iter()
        .filter(|submission| {
            !submission
                .contest_id
                .to_lowercase()
                .starts_with(HEURISTIC_CONTEST_PREFIX)
        })
        .collect();
    tracing::debug!("{} algorithm submissions", algo_submissions.len());

    let mut ac_submissions: Vec<UniqueAcSubmission> = algo_submissions
        .into_iter()
        .filter(|submission| submission.result == "AC")
        .map(|submission| UniqueAcSubmission {
            date: tz
                .timestamp_opt(submission.epoch_second, 0)
                .earliest()
                .map(|datetime| datetime.date_naive())
                .unwrap_or_default(),
            contest_id: submission.contest_id,
            problem_id: submission.problem_id,
            point: submission.point,
        })
        .collect();
    tracing::debug!("{} AC submissions", ac_submissions.len());

    // stable sort keeps same-date submissions in fetch order
    ac_submissions.sort_by_key(|submission| submission.date);

    let mut unique_ac_submissions: Vec<UniqueAcSubmission> = Vec::new();
    let mut seen_problems: HashSet<String> = HashSet::new();
    for submission in ac_submissions {
        if seen_problems.contains(&submission.problem_id) {
            continue;
        }
        seen_problems.insert(submission.problem_id.clone());
        unique_ac_submissions.push(submission);
    }
    tracing::debug!("{} unique AC submissions", unique_ac_submissions.len());

    unique_ac_submissions
}
