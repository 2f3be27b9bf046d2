use crate::modules::models::{Metric, UniqueAcSubmission, UserChartData};
use chrono::{Duration, NaiveDate};
use itertools::Itertools;
use std::collections::HashMap;

/// ツールチップ内で日付見出しと提出行を区切る線
const TOOLTIP_SEPARATOR: &str = "- - - - - - - - - - - ";

/// チャートの横軸となる日付列(今日を末尾とする`period+1`日分、昇順)
pub fn date_window(today: NaiveDate, period: i64) -> Vec<NaiveDate> {
    (0..=period)
        .map(|i| today - Duration::days(period - i))
        .collect()
}

/// 日毎のバケットへ加算し、累積値の列を作る
///
/// ウィンドウ外の日付を持つ提出は無視する(取得時のカットオフがあるため
/// 通常は発生しない)
pub fn accumulate(
    solves: &[UniqueAcSubmission],
    window: &[NaiveDate],
    metric: Metric,
) -> Vec<i64> {
    let mut buckets: HashMap<NaiveDate, i64> = window.iter().map(|date| (*date, 0)).collect();
    for solve in solves {
        if let Some(value) = buckets.get_mut(&solve.date) {
            match metric {
                Metric::Score => *value += solve.point as i64,
                Metric::AcCount => *value += 1,
            }
        }
    }

    let mut cumulative: Vec<i64> = window.iter().map(|date| buckets[date]).collect();
    for i in 1..cumulative.len() {
        cumulative[i] += cumulative[i - 1];
    }

    cumulative
}

/// 日毎のツールチップ文字列を組み立てる
///
/// ACのない日は日付と0件表記のみ、ACのある日は区切り線に続けて
/// `"{contest_id}  {問題記号}  {点数}"`の行を辞書順で並べる
pub fn tooltip_texts(window: &[NaiveDate], solves: &[UniqueAcSubmission]) -> Vec<String> {
    let mut day_summaries: HashMap<NaiveDate, Vec<&UniqueAcSubmission>> =
        window.iter().map(|date| (*date, Vec::new())).collect();
    for solve in solves {
        if let Some(summary) = day_summaries.get_mut(&solve.date) {
            summary.push(solve);
        }
    }

    window
        .iter()
        .map(|date| {
            let daily_solves = &day_summaries[date];
            let daily_points: i64 = daily_solves.iter().map(|solve| solve.point as i64).sum();
            let header = format!(
                "{}\n{} ACs, {} Pts",
                date.format("%Y-%m-%d"),
                daily_solves.len(),
                daily_points
            );
            if daily_solves.is_empty() {
                return header;
            }

            let problems = daily_solves
                .iter()
                .map(|solve| {
                    format!(
                        "{}  {}  {}",
                        solve.contest_id,
                        problem_suffix(&solve.problem_id),
                        solve.point as i64
                    )
                })
                .sorted()
                .join("\n");

            format!("{}\n{}\n{}", header, TOOLTIP_SEPARATOR, problems)
        })
        .collect()
}

/// 1ユーザ分の系列を組み立てる
pub fn build_series(
    user: &str,
    solves: &[UniqueAcSubmission],
    period: i64,
    today: NaiveDate,
    metric: Metric,
) -> UserChartData {
    let window = date_window(today, period);
    let cumulative = accumulate(solves, &window, metric);
    let tooltips = tooltip_texts(&window, solves);

    UserChartData {
        user_id: String::from(user),
        dates: window
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect(),
        cumulative,
        tooltips,
    }
}

/// `problem_id`の末尾セグメント(`abc100_a`なら`a`)
fn problem_suffix(problem_id: &str) -> &str {
    problem_id.rsplit('_').next().unwrap_or(problem_id)
}
