use log::{debug, error, info};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::api::models::reco::{RecoRequest, RecoResponse};
use crate::core::features::ShapeTrack;
use crate::core::recognition::{route, RecognitionError, Recognizer};
use crate::core::settings::ServerSettings;

/// 通过 HTTP POST 调用远端识别服务，不做重试
pub struct HttpRecognizer {
    client: Client,
    settings: ServerSettings,
}

impl HttpRecognizer {
    pub fn new(settings: ServerSettings) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }
}

impl Recognizer for HttpRecognizer {
    fn recognize(&self, param: &ShapeTrack) -> Result<RecoResponse, RecognitionError> {
        let target = route(&self.settings);
        let body = RecoRequest::new(param, target.addr().map(str::to_string));
        info!("📤 POST {} ({} rows)", target.url(), param.len());

        let resp = self.client.post(target.url()).json(&body).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            error!("❌ recognition service returned {}", status);
            return Err(RecognitionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let result: RecoResponse = serde_json::from_str(&text)?;
        debug!("recognition result: code={} data={}", result.code, result.data);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_server::serve_once;

    fn sample_param() -> ShapeTrack {
        ShapeTrack {
            shape: vec![vec![0.0, 1.5]],
            track: vec![vec![0.0, 0.0]],
        }
    }

    #[test]
    fn test_direct_request_in_debug_mode() {
        let (addr, requests) = serve_once("HTTP/1.1 200 OK", r#"{"code":0,"data":"你好"}"#);
        let recognizer = HttpRecognizer::new(ServerSettings {
            address: addr,
            debug: true,
            ..ServerSettings::default()
        })
        .unwrap();

        let resp = recognizer.recognize(&sample_param()).expect("识别请求失败");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, "你好");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /reco "));
        assert!(request.contains(r#""shape":[[0.0,1.5]]"#));
        assert!(!request.contains(r#""addr""#));
    }

    #[test]
    fn test_plain_http_is_proxied_with_addr() {
        let (origin, requests) = serve_once("HTTP/1.1 200 OK", r#"{"code":7,"data":"再见"}"#);
        let recognizer = HttpRecognizer::new(ServerSettings {
            address: "http://10.0.0.2:5000".to_string(),
            origin,
            ..ServerSettings::default()
        })
        .unwrap();

        let resp = recognizer.recognize(&sample_param()).unwrap();
        assert_eq!(resp.code, 7);

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /api/proxy "));
        assert!(request.contains(r#""addr":"http://10.0.0.2:5000/reco""#));
    }

    #[test]
    fn test_error_status_is_reported() {
        let (addr, _requests) = serve_once("HTTP/1.1 502 Bad Gateway", r#"{"error":"down"}"#);
        let recognizer = HttpRecognizer::new(ServerSettings {
            address: addr,
            debug: true,
            ..ServerSettings::default()
        })
        .unwrap();

        match recognizer.recognize(&sample_param()) {
            Err(RecognitionError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.contains("down"));
            }
            other => panic!("应该返回 Status 错误, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_response_is_json_error() {
        let (addr, _requests) = serve_once("HTTP/1.1 200 OK", r#"{"label":"x"}"#);
        let recognizer = HttpRecognizer::new(ServerSettings {
            address: addr,
            debug: true,
            ..ServerSettings::default()
        })
        .unwrap();

        assert!(matches!(
            recognizer.recognize(&sample_param()),
            Err(RecognitionError::Json(_))
        ));
    }
}
