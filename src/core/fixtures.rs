//! 测试用例加载：本地 JSON 文件或静态站点上的 test-cases.json

use log::info;
use reqwest::blocking::Client;
use std::path::Path;
use thiserror::Error;

use crate::api::models::reco::TestCase;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("测试用例解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
}

pub fn load_test_cases<P: AsRef<Path>>(path: P) -> Result<Vec<TestCase>, FixtureError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let cases: Vec<TestCase> = serde_json::from_str(&content)?;
    info!("📂 loaded {} test cases from {:?}", cases.len(), path.as_ref());
    Ok(cases)
}

pub fn fetch_test_cases(client: &Client, url: &str) -> Result<Vec<TestCase>, FixtureError> {
    let text = client.get(url).send()?.error_for_status()?.text()?;
    let cases: Vec<TestCase> = serde_json::from_str(&text)?;
    info!("🌐 fetched {} test cases from {}", cases.len(), url);
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_server::serve_once;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_test_cases_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"shape": [[0, 0, 0]], "track": [[0, 0, 0]], "label": "你好"}},
                {{"shape": [], "track": [], "label": "谢谢"}}]"#
        )
        .unwrap();

        let cases = load_test_cases(file.path()).expect("加载测试用例失败");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].label, "你好");
        assert_eq!(cases[0].to_shape_track().shape, vec![vec![0.0, 0.0, 0.0]]);
        assert!(cases[1].to_shape_track().is_empty());
    }

    #[test]
    fn test_load_rejects_missing_label() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"shape": [], "track": []}}]"#).unwrap();

        assert!(matches!(load_test_cases(file.path()), Err(FixtureError::Json(_))));
    }

    #[test]
    fn test_fetch_test_cases_over_http() {
        let (origin, requests) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"shape": [[1.5]], "track": [[0]], "label": "再见"}]"#,
        );

        let cases = fetch_test_cases(&Client::new(), &format!("{}/test-cases.json", origin))
            .expect("获取测试用例失败");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].label, "再见");
        assert_eq!(cases[0].shape, vec![vec![1.5]]);

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /test-cases.json "));
    }

    #[test]
    fn test_fetch_error_status_is_http_error() {
        let (origin, _requests) = serve_once("HTTP/1.1 404 Not Found", r#"{"error":"missing"}"#);

        let result = fetch_test_cases(&Client::new(), &format!("{}/test-cases.json", origin));
        match result {
            Err(FixtureError::Http(e)) => {
                assert_eq!(e.status().map(|s| s.as_u16()), Some(404));
            }
            other => panic!("应该返回 Http 错误, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_test_cases(dir.path().join("test-cases.json")),
            Err(FixtureError::Io(_))
        ));
    }
}
