use crate::core::{build_report, extract_snapshot, ConfigProvider, Pipeline, Report, Storage};
use crate::utils::error::{ReportError, Result};
use std::path::Path;

pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_JSON: &str = "json";

/// Reads the organisation document through a [`Storage`], builds the report and
/// writes it back in the configured formats.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_path(&self, format: &str) -> String {
        let file = Path::new(self.config.output_file()).with_extension(format);
        Path::new(self.config.output_dir())
            .join(file)
            .to_string_lossy()
            .into_owned()
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading organisation document from: {}", input_path);

        let bytes = self.storage.read_file(input_path).await?;
        String::from_utf8(bytes).map_err(|e| {
            ReportError::malformed("document", None, format!("input is not valid UTF-8: {}", e))
        })
    }

    async fn transform(&self, document: String) -> Result<Report> {
        let snapshot = extract_snapshot(&document)?;
        tracing::debug!(
            "Extracted {} departments and {} employees",
            snapshot.departments_by_head.len(),
            snapshot.employees.len()
        );

        build_report(&snapshot)
    }

    async fn load(&self, report: Report) -> Result<String> {
        let mut written = Vec::new();

        if self.wants(FORMAT_CSV) {
            let path = self.output_path(FORMAT_CSV);
            let csv = report.to_csv()?;
            tracing::debug!("Writing CSV report ({} bytes) to {}", csv.len(), path);
            self.storage.write_file(&path, csv.as_bytes()).await?;
            written.push(path);
        }

        if self.wants(FORMAT_JSON) {
            let path = self.output_path(FORMAT_JSON);
            let json = report.to_json()?;
            tracing::debug!("Writing JSON report ({} bytes) to {}", json.len(), path);
            self.storage.write_file(&path, json.as_bytes()).await?;
            written.push(path);
        }

        written.into_iter().next().ok_or_else(|| ReportError::ConfigError {
            message: "No output format selected".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ReportError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_dir: String,
        output_file: String,
        output_formats: Vec<String>,
    }

    impl MockConfig {
        fn new(formats: &[&str]) -> Self {
            Self {
                input_path: "org.json".to_string(),
                output_dir: "out".to_string(),
                output_file: "report.csv".to_string(),
                output_formats: formats.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_dir(&self) -> &str {
            &self.output_dir
        }

        fn output_file(&self) -> &str {
            &self.output_file
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    const DOCUMENT: &str = r#"{
        "departments": [{"id": 1, "name": "Eng", "department_head_id": 10}],
        "employees": [
            {"id": 11, "name": "Bob", "manager_id": 10},
            {"id": 10, "name": "Alice", "manager_id": null}
        ]
    }"#;

    fn out_path(file: &str) -> String {
        Path::new("out").join(file).to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_extract_reads_input_document() {
        let storage = MockStorage::new();
        storage.put_file("org.json", DOCUMENT).await;
        let pipeline = ReportPipeline::new(storage, MockConfig::new(&["csv"]));

        let document = pipeline.extract().await.unwrap();
        assert_eq!(document, DOCUMENT);
    }

    #[tokio::test]
    async fn test_extract_missing_input_is_io_error() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(&["csv"]));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ReportError::IoError(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_utf8_input() {
        let storage = MockStorage::new();
        storage
            .files
            .lock()
            .await
            .insert("org.json".to_string(), vec![0xff, 0xfe, 0x00]);
        let pipeline = ReportPipeline::new(storage, MockConfig::new(&["csv"]));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ReportError::MalformedRecord { .. }));
    }

    #[tokio::test]
    async fn test_transform_orders_rows() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(&["csv"]));

        let report = pipeline.transform(DOCUMENT.to_string()).await.unwrap();
        let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_load_writes_csv() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(&["csv"]));
        let report = pipeline.transform(DOCUMENT.to_string()).await.unwrap();

        let output_path = pipeline.load(report).await.unwrap();

        assert_eq!(output_path, out_path("report.csv"));
        assert_eq!(
            storage.get_file(&output_path).await.unwrap(),
            "id,name,department,manager\n10,Alice,Eng,\n11,Bob,Eng,Alice\n"
        );
        assert!(storage.get_file(&out_path("report.json")).await.is_none());
    }

    #[tokio::test]
    async fn test_load_writes_json_alongside_csv() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(&["csv", "json"]));
        let report = pipeline.transform(DOCUMENT.to_string()).await.unwrap();

        let output_path = pipeline.load(report).await.unwrap();
        assert_eq!(output_path, out_path("report.csv"));

        let json = storage.get_file(&out_path("report.json")).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Alice");
        assert_eq!(value[1]["manager"], "Alice");
    }

    #[tokio::test]
    async fn test_load_json_only() {
        let storage = MockStorage::new();
        let pipeline = ReportPipeline::new(storage.clone(), MockConfig::new(&["json"]));
        let report = pipeline.transform(DOCUMENT.to_string()).await.unwrap();

        let output_path = pipeline.load(report).await.unwrap();

        assert_eq!(output_path, out_path("report.json"));
        assert!(storage.get_file(&out_path("report.csv")).await.is_none());
    }

    #[tokio::test]
    async fn test_load_without_formats_fails() {
        let pipeline = ReportPipeline::new(MockStorage::new(), MockConfig::new(&[]));

        let err = pipeline.load(Report::default()).await.unwrap_err();
        assert!(matches!(err, ReportError::ConfigError { .. }));
    }
}
