pub const DOGMA_DISPLAY_VERSION: &str = env!("DOGMA_DISPLAY_VERSION");
pub const DOGMA_BUILD_N: &str = env!("DOGMA_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "dogma {}\nBuild {}\nInteractive transcription and translation simulator",
        DOGMA_DISPLAY_VERSION, DOGMA_BUILD_N
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_text() {
        let text = version_cli_text();
        assert!(text.starts_with("dogma "));
        assert!(text.contains(DOGMA_BUILD_N));
    }
}
