use crate::modules::chart::retriever::ChartDataRetriever;
use anyhow::{Context, Result};
use clap::Args;
use shojin_chart_libs::AtCoderProblemsClient;

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// AtCoder user ID
    user_id: String,
    /// comma separated rival user IDs
    #[arg(long)]
    rival_ids: Option<String>,
    /// trailing period in days
    #[arg(long, default_value_t = 90)]
    period: i64,
    /// metric to accumulate ("score" or "ac_count")
    #[arg(long, default_value = "score")]
    kind: String,
}

pub async fn run(args: ChartArgs) -> Result<()> {
    if args.user_id.is_empty() {
        tracing::info!("no user specified, nothing to chart");
        return Ok(());
    }

    let users = merge_user_ids(&args.user_id, args.rival_ids.as_deref());
    tracing::debug!("chart target users: {:?}", users);

    let client = AtCoderProblemsClient::new().with_context(|| {
        let message = "failed to create AtCoder Problems API client";
        tracing::error!(message);
        message
    })?;
    let retriever = ChartDataRetriever::new(client);

    let users_data = retriever
        .retrieve_chart_data(&users, args.period, &args.kind)
        .await
        .with_context(|| {
            let message = "failed to retrieve chart data";
            tracing::error!(message);
            message
        })?;

    println!("{}", serde_json::to_string_pretty(&users_data)?);

    Ok(())
}

/// 主ユーザとカンマ区切りのライバルIDをひとつのユーザ一覧へまとめる
fn merge_user_ids(user_id: &str, rival_ids: Option<&str>) -> Vec<String> {
    let mut users = vec![String::from(user_id)];
    if let Some(rival_ids) = rival_ids {
        let rival_ids = rival_ids.replace(' ', "");
        users.extend(
            rival_ids
                .split(',')
                .filter(|id| !id.is_empty())
                .map(String::from),
        );
    }

    users
}
