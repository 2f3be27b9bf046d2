use serde::{Deserialize, Serialize};

/// AtCoder Problems APIが返す提出レコード
///
/// `point`はAPI上は浮動小数点数で返ってくる(集計時に整数へ切り捨てる)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub epoch_second: i64,
    pub problem_id: String,
    pub contest_id: String,
    pub user_id: String,
    pub language: String,
    pub point: f64,
    pub length: i64,
    pub result: String,
    pub execution_time: Option<i64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize() {
        let body = r#"
        {
            "id": 48852107,
            "epoch_second": 1704034800,
            "problem_id": "abc100_a",
            "contest_id": "abc100",
            "user_id": "chokudai",
            "language": "Rust (1.70.0)",
            "point": 100.0,
            "length": 1024,
            "result": "AC",
            "execution_time": 17
        }
        "#;
        let submission: Submission = serde_json::from_str(body).unwrap();

        assert_eq!(submission.problem_id, "abc100_a");
        assert_eq!(submission.contest_id, "abc100");
        assert_eq!(submission.epoch_second, 1704034800);
        assert_eq!(submission.result, "AC");
        assert_eq!(submission.point, 100.0);
    }

    #[test]
    fn execution_time_may_be_null() {
        let body = r#"
        {
            "id": 48852108,
            "epoch_second": 1704034900,
            "problem_id": "abc100_b",
            "contest_id": "abc100",
            "user_id": "chokudai",
            "language": "Rust (1.70.0)",
            "point": 0.0,
            "length": 512,
            "result": "CE",
            "execution_time": null
        }
        "#;
        let submission: Submission = serde_json::from_str(body).unwrap();

        assert_eq!(submission.execution_time, None);
        assert_eq!(submission.result, "CE");
    }
}
