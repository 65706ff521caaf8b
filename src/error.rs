use std::path::PathBuf;

/// Everything that can end a single meal analysis.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Nie wybrano pliku. Wgraj zdjęcie, aby rozpocząć analizę.")]
    MissingImage,

    #[error("Uzupełnij zmienną GEMINI_API_KEY własnym kluczem, zanim rozpoczniesz analizę.")]
    MissingApiKey,

    #[error("Błąd API ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Nie udało się przeprowadzić analizy. Spróbuj ponownie później.")]
    Transport(#[from] reqwest::Error),

    #[error("Błąd odczytu pliku {}.", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// HTTP status used when the error is reported by the upload server
    pub fn http_status(&self) -> u16 {
        match self {
            AnalysisError::MissingImage => 400,
            AnalysisError::MissingApiKey => 503,
            AnalysisError::Api { .. } | AnalysisError::Transport(_) => 502,
            AnalysisError::FileRead { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = AnalysisError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "Błąd API (429): quota exceeded");
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn test_file_read_message_names_path() {
        let err = AnalysisError::FileRead {
            path: PathBuf::from("/tmp/obiad.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Błąd odczytu pliku /tmp/obiad.jpg.");
        assert_eq!(err.http_status(), 500);
    }
}
