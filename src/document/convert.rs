/*!
 * Legacy .doc conversion through a headless office suite.
 */

use log::{debug, error};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::DocumentConfig;
use crate::errors::DocumentError;

/// Convert a legacy Word document to .docx bytes.
///
/// Runs `<converter> --headless --convert-to docx --outdir <tmp> <tmp>/input.doc`
/// and reads the produced file back. The child is killed if it outlives the
/// configured timeout.
pub async fn convert_doc_to_docx(bytes: &[u8], config: &DocumentConfig) -> Result<Vec<u8>, DocumentError> {
    let work_dir = tempfile::tempdir()?;
    let input_path = work_dir.path().join("input.doc");
    let output_path = work_dir.path().join("input.docx");
    tokio::fs::write(&input_path, bytes).await?;

    debug!("Converting {:?} with {}", input_path, config.converter_command);

    let conversion = Command::new(&config.converter_command)
        .arg("--headless")
        .arg("--convert-to")
        .arg("docx")
        .arg("--outdir")
        .arg(work_dir.path())
        .arg(&input_path)
        .kill_on_drop(true)
        .output();

    let timeout = Duration::from_secs(config.conversion_timeout_secs);
    let output = tokio::select! {
        result = conversion => match result {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(DocumentError::ConverterUnavailable),
            Err(e) => return Err(DocumentError::ConversionFailed(format!("could not run {}: {}", config.converter_command, e))),
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(DocumentError::ConversionTimeout(config.conversion_timeout_secs));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Document conversion failed: {}", stderr.trim());
        return Err(DocumentError::ConversionFailed(format!("{} exited with {}", config.converter_command, output.status)));
    }

    match tokio::fs::read(&output_path).await {
        Ok(converted) if !converted.is_empty() => Ok(converted),
        _ => Err(DocumentError::ConversionFailed("no .docx output was produced".to_string())),
    }
}
